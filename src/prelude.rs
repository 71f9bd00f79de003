pub use crate::{
    ListboxEvent, ListboxGlyphs, ListboxNode, ListboxPalette, ListboxRenderer, ListboxRowContext,
    ListboxSnapshot, ListboxState, ListboxStyle, ListboxView, Role, RowKind, TextRows, Theme,
    VisibleRow, listbox_row_line,
};
