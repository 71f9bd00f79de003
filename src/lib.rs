//! Role-polymorphic listbox/accordion widget for ratatui.
//!
//! One node type, [`ListboxNode`], renders as a themed container, a header
//! label, a collapsible group, a leaf item, or a footer slot depending on
//! its [`Role`]. Nested groups form accordion trees; mouse clicks translate
//! into typed [`ListboxEvent`] notifications that bubble from the clicked
//! row toward the root, so a deep interaction surfaces as a well-typed
//! event at the container boundary.
//!
//! Feature flags:
//! - `serde`: serde support for [`ListboxSnapshot`].

mod context;
mod event;
mod glyphs;
mod node;
pub mod prelude;
mod role;
mod state;
mod style;
mod widget;

pub use context::ListboxRowContext;
pub use event::ListboxEvent;
pub use glyphs::{ListboxGlyphs, ListboxRenderer, TextRows, listbox_row_line};
pub use node::ListboxNode;
pub use role::Role;
pub use state::{ListboxSnapshot, ListboxState, RowKind, VisibleRow};
pub use style::{ListboxPalette, ListboxStyle, Theme};
pub use widget::ListboxView;
