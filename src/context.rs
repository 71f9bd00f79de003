use crate::role::Role;
use crate::style::Theme;

/// Per-row data handed to a row renderer.
#[derive(Clone, Copy, Debug)]
pub struct ListboxRowContext {
    /// Nesting depth of the row; top-level body rows are level 0.
    pub level: u16,
    /// Role of the node behind the row.
    pub role: Role,
    /// Theme of the node behind the row.
    pub theme: Theme,
    /// Effective open flag (groups and nested containers).
    pub is_open: bool,
    /// Whether the node has body content to reveal.
    pub has_children: bool,
    /// Whether the node is selected.
    pub is_selected: bool,
    /// Whether the node is disabled.
    pub is_disabled: bool,
}
