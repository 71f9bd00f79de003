/// Presentation mode of a node. Exactly one role applies per node.
///
/// `None` is a valid degenerate state: the node and its whole subtree render
/// nothing. This replaces the conventional set of mutually exclusive boolean
/// flags with a single tagged variant, so two roles can never be set at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    /// Themed frame with a header region, a scrollable body, and a footer.
    Container,
    /// Header/label content for the parent container or group; no row of its own.
    Label,
    /// Collapsible row that renders its nested content only while open.
    Group,
    /// Leaf row reacting to clicks.
    Item,
    /// Footer content for the parent container; no body row of its own.
    Footer,
    /// Renders nothing.
    #[default]
    None,
}

impl Role {
    /// Returns `true` for roles that carry an open/closed flag.
    #[inline]
    pub const fn is_collapsible(self) -> bool {
        matches!(self, Self::Container | Self::Group)
    }

    /// Returns `true` for roles that mark slot content of an ancestor
    /// instead of rendering as a body row.
    #[inline]
    pub const fn is_slot(self) -> bool {
        matches!(self, Self::Label | Self::Footer)
    }
}
