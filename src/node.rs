use crossterm::event::MouseEvent;

use crate::event::{ListboxEvent, Propagation};
use crate::role::Role;
use crate::style::Theme;

/// A single node of a listbox tree.
///
/// One node type serves every presentation role; [`Role`] selects the render
/// branch and the click semantics. Children are owned directly, so the tree
/// shape is plain value composition: no registry, no parent pointers, no
/// shared state between siblings.
///
/// `V` is an opaque payload chosen by the host. It is carried in emitted
/// [`ListboxEvent`]s and never touched otherwise.
#[derive(Clone, Debug)]
pub struct ListboxNode<V> {
    role: Role,
    text: String,
    value: Option<V>,
    open: Option<bool>,
    disabled: bool,
    selected: bool,
    custom: bool,
    theme: Theme,
    children: Vec<ListboxNode<V>>,
}

impl<V> Default for ListboxNode<V> {
    fn default() -> Self {
        Self::inert()
    }
}

impl<V> ListboxNode<V> {
    fn with_role(role: Role, text: String) -> Self {
        Self {
            role,
            text,
            value: None,
            open: None,
            disabled: false,
            selected: false,
            custom: false,
            theme: Theme::Light,
            children: Vec::new(),
        }
    }

    /// Creates a container: a themed frame with header, body, and footer regions.
    pub fn container() -> Self {
        Self::with_role(Role::Container, String::new())
    }

    /// Creates a label node carrying header text for its parent.
    pub fn label(text: impl Into<String>) -> Self {
        Self::with_role(Role::Label, text.into())
    }

    /// Creates a collapsible group row. Its visible text comes from a
    /// label-role child.
    pub fn group() -> Self {
        Self::with_role(Role::Group, String::new())
    }

    /// Creates a leaf item row.
    pub fn item(text: impl Into<String>) -> Self {
        Self::with_role(Role::Item, text.into())
    }

    /// Creates a footer node carrying footer text for its parent.
    pub fn footer(text: impl Into<String>) -> Self {
        Self::with_role(Role::Footer, text.into())
    }

    /// Creates a node with no role. It renders nothing, subtree included.
    pub fn inert() -> Self {
        Self::with_role(Role::None, String::new())
    }

    /// Attaches the opaque payload carried in emitted events.
    #[must_use]
    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Presets the open flag, overriding the attachment-time default.
    #[must_use]
    pub const fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Marks an item as disabled: clicks are swallowed without an event.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Marks an item as selected (styling only).
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Defers open/close control of a group to an external controller.
    ///
    /// A custom group never toggles itself and lets clicks keep bubbling,
    /// so the controller observes the raw interaction and decides.
    #[must_use]
    pub const fn with_custom(mut self, custom: bool) -> Self {
        self.custom = custom;
        self
    }

    /// Sets the theme of this node only. See [`Self::set_theme`] for the
    /// cascading update.
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends every node of `children`.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends a label child carrying the header text.
    #[must_use]
    pub fn with_header(self, text: impl Into<String>) -> Self {
        self.child(Self::label(text))
    }

    /// Appends a footer child carrying the footer text.
    #[must_use]
    pub fn with_footer(self, text: impl Into<String>) -> Self {
        self.child(Self::footer(text))
    }

    /// Returns the node's role.
    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the node's own display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the opaque payload, if one is attached.
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Returns the raw open flag; `None` until first attachment.
    #[inline]
    pub const fn open(&self) -> Option<bool> {
        self.open
    }

    /// Returns the effective open flag. An unset flag reads as closed, so a
    /// tree that was never attached renders collapsed.
    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self.open, Some(true))
    }

    /// Returns `true` if the node is disabled.
    #[inline]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns `true` if the node is selected.
    #[inline]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns `true` if the group defers open/close control to the host.
    #[inline]
    pub const fn is_custom(&self) -> bool {
        self.custom
    }

    /// Returns the node's theme.
    #[inline]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the node's children.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Replaces the display text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the opaque payload.
    pub fn set_value(&mut self, value: Option<V>) {
        self.value = value;
    }

    /// Sets the open flag directly. Used by external controllers of custom
    /// groups; regular groups toggle themselves on click.
    pub const fn set_open(&mut self, open: bool) {
        self.open = Some(open);
    }

    /// Enables or disables an item.
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Selects or deselects an item.
    pub const fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Initializes open flags for this node and its whole subtree.
    ///
    /// A collapsible node whose flag is still unset gets its default: a
    /// container starts open, a group starts closed. Nodes with an explicit
    /// flag keep it. Idempotent; the host calls this once after building
    /// the tree.
    pub fn attach(&mut self) {
        if self.open.is_none() && self.role.is_collapsible() {
            self.open = Some(!matches!(self.role, Role::Group));
        }
        for child in &mut self.children {
            child.attach();
        }
    }

    /// Sets the theme on this node and every descendant.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        for child in &mut self.children {
            child.set_theme(theme);
        }
    }

    /// Returns the node addressed by `path`, where each element indexes
    /// `children` of the previous node. The empty path addresses `self`.
    pub fn node_at(&self, path: &[usize]) -> Option<&Self> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// Mutable variant of [`Self::node_at`].
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &idx in path {
            node = node.children.get_mut(idx)?;
        }
        Some(node)
    }

    /// Returns the first label-role child, the source of header/row text.
    pub fn label_child(&self) -> Option<&Self> {
        self.children.iter().find(|c| c.role == Role::Label)
    }

    /// Mutable variant of [`Self::label_child`].
    pub fn label_child_mut(&mut self) -> Option<&mut Self> {
        self.children.iter_mut().find(|c| c.role == Role::Label)
    }

    /// Returns `true` if a click on this item produces `select-item`.
    pub(crate) const fn accepts_click(&self) -> bool {
        self.value.is_some() && !self.disabled
    }

    pub(crate) const fn toggle_open(&mut self) {
        self.open = Some(!self.is_open());
    }

    /// Applies group click semantics: toggle unless custom, then notify.
    ///
    /// The open/closed transition happens before the event is built, so a
    /// listener re-reading the node observes post-transition state.
    pub(crate) fn group_click(&mut self, original: MouseEvent) -> (ListboxEvent<V>, Propagation)
    where
        V: Clone,
    {
        let propagation = if self.custom {
            Propagation::Continue
        } else {
            self.toggle_open();
            Propagation::Stop
        };
        let event = ListboxEvent::SelectGroup {
            value: self.value.clone(),
            original,
        };
        (event, propagation)
    }
}
