use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use rustc_hash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::event::{ListboxEvent, Propagation};
use crate::node::ListboxNode;
use crate::role::Role;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) type NodePath = SmallVec<[usize; 8]>;

/// Kind of a visible body row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// A collapsible group row.
    Group,
    /// A leaf item row.
    Item,
    /// The header row of a nested container.
    Header,
    /// An inert footer row of a nested container.
    Footer,
}

/// One visible body row, with the path addressing its node from the root.
#[derive(Clone, Debug)]
pub struct VisibleRow {
    pub(crate) path: NodePath,
    pub(crate) level: u16,
    pub(crate) kind: RowKind,
}

impl VisibleRow {
    /// Returns the child-index path from the root to the row's node.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Returns the nesting depth of the row.
    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Returns the row kind.
    pub const fn kind(&self) -> RowKind {
        self.kind
    }
}

/// Widget state: scroll offset, the flattened row cache, and the hit
/// regions captured at render time.
///
/// The row cache is rebuilt lazily when marked dirty. Click handling marks
/// it dirty itself after a toggle; call [`Self::invalidate`] after editing
/// the tree (adding/removing nodes, setting `open` directly) so the next
/// render picks the change up.
pub struct ListboxState {
    offset: usize,
    rows: Vec<VisibleRow>,
    // Fast lookup from node path to visible row index.
    row_index: FxHashMap<NodePath, usize>,
    dirty: bool,
    header_area: Rect,
    body_area: Rect,
    footer_area: Rect,
}

/// Snapshot of open flags (by node path) and scroll position.
///
/// With the `serde` feature enabled, this type derives
/// `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct ListboxSnapshot {
    /// Open flags of collapsible nodes as `(path, open)` pairs.
    pub open: Vec<(Vec<usize>, bool)>,
    /// Scroll offset within the body rows.
    pub offset: usize,
}

impl Default for ListboxState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListboxState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            offset: 0,
            rows: Vec::new(),
            row_index: FxHashMap::with_hasher(FxBuildHasher),
            dirty: true,
            header_area: Rect::default(),
            body_area: Rect::default(),
            footer_area: Rect::default(),
        }
    }

    /// Marks the row cache as dirty.
    pub const fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Returns the cached visible body rows.
    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    /// Returns the number of visible body rows.
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the scroll offset within the body rows.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the header hit region from the last render.
    pub const fn header_area(&self) -> Rect {
        self.header_area
    }

    /// Returns the body hit region from the last render.
    pub const fn body_area(&self) -> Rect {
        self.body_area
    }

    /// Returns the footer hit region from the last render.
    pub const fn footer_area(&self) -> Rect {
        self.footer_area
    }

    pub(crate) const fn set_areas(&mut self, header: Rect, body: Rect, footer: Rect) {
        self.header_area = header;
        self.body_area = body;
        self.footer_area = footer;
    }

    /// Scrolls the body up by the given number of rows.
    pub const fn scroll_up_by(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    /// Scrolls the body down by the given number of rows.
    pub fn scroll_down_by(&mut self, amount: usize) {
        let viewport = (self.body_area.height as usize).max(1);
        let max_offset = self.rows.len().saturating_sub(viewport);
        self.offset = (self.offset + amount).min(max_offset);
    }

    pub(crate) fn clamp_offset(&mut self, viewport: usize) {
        let max_offset = self.rows.len().saturating_sub(viewport.max(1));
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    /// Returns the visible row under a terminal position, if any.
    pub fn row_at(&self, position: Position) -> Option<&VisibleRow> {
        if !self.body_area.contains(position) {
            return None;
        }
        let idx = self.offset + (position.y - self.body_area.y) as usize;
        self.rows.get(idx)
    }

    /// Returns the visible row index of the node at `path`, if it is
    /// currently visible.
    pub fn row_index_of(&self, path: &[usize]) -> Option<usize> {
        self.row_index.get(path).copied()
    }

    /// Adjusts the scroll offset so the row at `path` sits inside the
    /// viewport captured at the last render.
    pub fn ensure_row_visible(&mut self, path: &[usize]) {
        let Some(idx) = self.row_index_of(path) else {
            return;
        };
        let viewport = (self.body_area.height as usize).max(1);
        if idx < self.offset {
            self.offset = idx;
        } else if idx >= self.offset + viewport {
            self.offset = idx + 1 - viewport;
        }
    }

    /// Ensures the row cache matches the tree (if marked dirty).
    pub fn ensure_rows<V>(&mut self, root: &ListboxNode<V>) {
        if !self.dirty {
            return;
        }
        self.rows.clear();
        self.row_index.clear();
        let mut path = NodePath::new();
        match root.role() {
            Role::None => {}
            // The root container's header and footer render as regions,
            // not rows; its body hides entirely while closed.
            Role::Container => {
                if root.is_open() {
                    self.flatten_children(root, &mut path, 0);
                }
            }
            _ => self.flatten(root, &mut path, 0),
        }
        self.dirty = false;
    }

    /// Captures the open flags of the tree plus the scroll offset.
    pub fn snapshot<V>(&self, root: &ListboxNode<V>) -> ListboxSnapshot {
        fn collect<V>(
            node: &ListboxNode<V>,
            path: &mut Vec<usize>,
            out: &mut Vec<(Vec<usize>, bool)>,
        ) {
            if node.role().is_collapsible()
                && let Some(flag) = node.open()
            {
                out.push((path.clone(), flag));
            }
            for (idx, child) in node.children().iter().enumerate() {
                path.push(idx);
                collect(child, path, out);
                path.pop();
            }
        }

        let mut open = Vec::new();
        collect(root, &mut Vec::new(), &mut open);
        ListboxSnapshot {
            open,
            offset: self.offset,
        }
    }

    /// Restores open flags and scroll position from a snapshot.
    ///
    /// Paths that no longer resolve (the tree changed shape) are skipped.
    pub fn restore<V>(&mut self, root: &mut ListboxNode<V>, snapshot: ListboxSnapshot) {
        for (path, flag) in snapshot.open {
            if let Some(node) = root.node_at_mut(&path)
                && node.role().is_collapsible()
            {
                node.set_open(flag);
            }
        }
        self.offset = snapshot.offset;
        self.dirty = true;
    }

    /// Routes a mouse event and returns the emitted notifications in
    /// bubbling order, deepest node first.
    ///
    /// Left clicks on the header region emit `select-header`; left clicks
    /// on a body row run the role click contract of the row's node and its
    /// ancestors; the scroll wheel moves the body viewport. Anything else
    /// returns no events.
    pub fn handle_mouse<V: Clone>(
        &mut self,
        root: &mut ListboxNode<V>,
        event: MouseEvent,
    ) -> SmallVec<[ListboxEvent<V>; 2]> {
        let mut events = SmallVec::new();
        let position = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::ScrollUp if self.body_area.contains(position) => {
                self.scroll_up_by(1);
            }
            MouseEventKind::ScrollDown if self.body_area.contains(position) => {
                self.scroll_down_by(1);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.header_area.contains(position) {
                    events.push(ListboxEvent::SelectHeader {
                        value: root.value().cloned(),
                        original: event,
                    });
                } else if let Some(row) = self.row_at(position).cloned() {
                    self.bubble_click(root, &row, event, &mut events);
                }
            }
            _ => {}
        }
        events
    }

    /// Runs the click contract: the target row's node first, then every
    /// ancestor group until something stops the propagation.
    fn bubble_click<V: Clone>(
        &mut self,
        root: &mut ListboxNode<V>,
        row: &VisibleRow,
        original: MouseEvent,
        events: &mut SmallVec<[ListboxEvent<V>; 2]>,
    ) {
        let path = row.path.as_slice();
        match row.kind {
            RowKind::Item => {
                let Some(node) = root.node_at_mut(path) else {
                    return;
                };
                if !node.accepts_click() {
                    // Swallowed: no event, and no ancestor reacts either.
                    return;
                }
                if let Some(value) = node.value().cloned() {
                    events.push(ListboxEvent::SelectItem { value, original });
                }
            }
            RowKind::Group => {
                let Some(node) = root.node_at_mut(path) else {
                    return;
                };
                let custom = node.is_custom();
                let (event, propagation) = node.group_click(original);
                if !custom {
                    self.dirty = true;
                }
                events.push(event);
                if propagation == Propagation::Stop {
                    return;
                }
            }
            RowKind::Header => {
                let Some(node) = root.node_at_mut(path) else {
                    return;
                };
                events.push(ListboxEvent::SelectHeader {
                    value: node.value().cloned(),
                    original,
                });
            }
            RowKind::Footer => {}
        }

        for depth in (0..path.len()).rev() {
            let Some(node) = root.node_at_mut(&path[..depth]) else {
                return;
            };
            if node.role() == Role::Group {
                let custom = node.is_custom();
                let (event, propagation) = node.group_click(original);
                if !custom {
                    self.dirty = true;
                }
                events.push(event);
                if propagation == Propagation::Stop {
                    return;
                }
            }
        }
    }

    fn flatten<V>(&mut self, node: &ListboxNode<V>, path: &mut NodePath, level: u16) {
        match node.role() {
            Role::None | Role::Label | Role::Footer => {}
            Role::Item => self.push_row(path, level, RowKind::Item),
            Role::Group => {
                self.push_row(path, level, RowKind::Group);
                if node.is_open() {
                    self.flatten_children(node, path, level + 1);
                }
            }
            // A nested container renders inline: a header row, its body
            // while open, and inert footer rows.
            Role::Container => {
                self.push_row(path, level, RowKind::Header);
                if node.is_open() {
                    self.flatten_children(node, path, level + 1);
                    for (idx, child) in node.children().iter().enumerate() {
                        if child.role() == Role::Footer {
                            path.push(idx);
                            self.push_row(path, level + 1, RowKind::Footer);
                            path.pop();
                        }
                    }
                }
            }
        }
    }

    fn flatten_children<V>(&mut self, node: &ListboxNode<V>, path: &mut NodePath, level: u16) {
        for (idx, child) in node.children().iter().enumerate() {
            path.push(idx);
            self.flatten(child, path, level);
            path.pop();
        }
    }

    fn push_row(&mut self, path: &NodePath, level: u16, kind: RowKind) {
        let idx = self.rows.len();
        self.row_index.insert(path.clone(), idx);
        self.rows.push(VisibleRow {
            path: path.clone(),
            level,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn click_at(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn scroll_at(column: u16, row: u16, kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Container with one group (label + two items) and one plain item.
    fn sample_tree() -> ListboxNode<u32> {
        let mut tree = ListboxNode::container()
            .with_value(99)
            .with_header("Heading")
            .child(
                ListboxNode::group()
                    .with_value(1)
                    .child(ListboxNode::label("Group one"))
                    .child(ListboxNode::item("origin").with_value(10))
                    .child(ListboxNode::item("description").with_value(11)),
            )
            .child(ListboxNode::item("loose").with_value(2))
            .with_footer("Done");
        tree.attach();
        tree
    }

    /// State with a 20x10 body at the origin, rows already built.
    fn ready_state(tree: &ListboxNode<u32>) -> ListboxState {
        let mut state = ListboxState::new();
        state.ensure_rows(tree);
        state.set_areas(
            Rect::new(0, 0, 20, 1),
            Rect::new(0, 1, 20, 10),
            Rect::new(0, 11, 20, 1),
        );
        state
    }

    #[test]
    fn node_without_role_produces_no_rows() {
        let tree = ListboxNode::<u32>::inert()
            .child(ListboxNode::item("hidden").with_value(1));
        let mut state = ListboxState::new();
        state.ensure_rows(&tree);

        assert_eq!(state.row_count(), 0);
    }

    #[test]
    fn closed_group_hides_children_rows() {
        let tree = sample_tree();
        let mut state = ListboxState::new();
        state.ensure_rows(&tree);

        // Group row (closed) and the loose item; label/footer are regions.
        let kinds: Vec<_> = state.rows().iter().map(VisibleRow::kind).collect();
        assert_eq!(kinds, vec![RowKind::Group, RowKind::Item]);
    }

    #[test]
    fn open_group_reveals_children_rows() {
        let mut tree = sample_tree();
        tree.node_at_mut(&[1]).unwrap().set_open(true);
        let mut state = ListboxState::new();
        state.ensure_rows(&tree);

        let kinds: Vec<_> = state.rows().iter().map(VisibleRow::kind).collect();
        assert_eq!(
            kinds,
            vec![RowKind::Group, RowKind::Item, RowKind::Item, RowKind::Item]
        );
        let levels: Vec<_> = state.rows().iter().map(VisibleRow::level).collect();
        assert_eq!(levels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn closed_container_hides_all_body_rows() {
        let mut tree = sample_tree();
        tree.set_open(false);
        let mut state = ListboxState::new();
        state.ensure_rows(&tree);

        assert_eq!(state.row_count(), 0);
    }

    #[test]
    fn group_click_toggles_once_and_emits_once() {
        let mut tree = sample_tree();
        let mut state = ready_state(&tree);

        // Row 0 is the group.
        let events = state.handle_mouse(&mut tree, click_at(3, 1));

        assert!(tree.node_at(&[1]).unwrap().is_open());
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ListboxEvent::SelectGroup { value: Some(1), .. }
        ));
    }

    #[test]
    fn custom_group_click_keeps_bubbling_without_toggling() {
        let mut tree = ListboxNode::container()
            .child(
                ListboxNode::group()
                    .with_value(1)
                    .with_open(true)
                    .child(ListboxNode::label("outer"))
                    .child(
                        ListboxNode::group()
                            .with_value(2)
                            .with_custom(true)
                            .child(ListboxNode::label("inner")),
                    ),
            );
        tree.attach();
        let mut state = ready_state(&tree);

        // Row 1 is the inner (custom) group.
        let events = state.handle_mouse(&mut tree, click_at(3, 2));

        // The inner group did not toggle itself, but the click reached the
        // outer group, which did.
        assert_eq!(tree.node_at(&[0, 1]).unwrap().open(), Some(false));
        assert!(!tree.node_at(&[0]).unwrap().is_open());
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            ListboxEvent::SelectGroup { value: Some(2), .. }
        ));
        assert!(matches!(
            events[1],
            ListboxEvent::SelectGroup { value: Some(1), .. }
        ));
    }

    #[test]
    fn item_click_emits_iff_value_and_enabled() {
        let cases = [
            (Some(5_u32), false, true),
            (Some(5), true, false),
            (None, false, false),
            (None, true, false),
        ];
        for (value, disabled, expect_event) in cases {
            let mut item = ListboxNode::item("x").with_disabled(disabled);
            if let Some(v) = value {
                item = item.with_value(v);
            }
            let mut tree = ListboxNode::container().child(item);
            tree.attach();
            let mut state = ready_state(&tree);

            let events = state.handle_mouse(&mut tree, click_at(1, 1));

            assert_eq!(
                !events.is_empty(),
                expect_event,
                "value={value:?} disabled={disabled}"
            );
        }
    }

    #[test]
    fn valid_item_click_bubbles_to_enclosing_group() {
        let mut tree = sample_tree();
        tree.node_at_mut(&[1]).unwrap().set_open(true);
        let mut state = ready_state(&tree);

        // Row 1 is the first item inside the open group.
        let events = state.handle_mouse(&mut tree, click_at(3, 2));

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            ListboxEvent::SelectItem { value: 10, .. }
        ));
        assert!(matches!(events[1], ListboxEvent::SelectGroup { .. }));
        // The bubbled click closed the group again.
        assert!(!tree.node_at(&[1]).unwrap().is_open());
    }

    #[test]
    fn disabled_item_click_is_swallowed_before_the_group() {
        let mut tree = ListboxNode::container().child(
            ListboxNode::group()
                .with_value(1)
                .with_open(true)
                .child(ListboxNode::label("g"))
                .child(ListboxNode::item("x").with_value(9).with_disabled(true)),
        );
        tree.attach();
        let mut state = ready_state(&tree);

        // Row 1 is the disabled item.
        let events = state.handle_mouse(&mut tree, click_at(3, 2));

        assert!(events.is_empty());
        assert!(tree.node_at(&[0]).unwrap().is_open());
    }

    #[test]
    fn header_click_carries_the_container_value() {
        let mut tree = sample_tree();
        let mut state = ready_state(&tree);

        let events = state.handle_mouse(&mut tree, click_at(5, 0));

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ListboxEvent::SelectHeader { value: Some(99), .. }
        ));
    }

    #[test]
    fn wheel_scrolls_and_clamps() {
        let mut tree = ListboxNode::container().with_children(
            (0..30).map(|i| ListboxNode::item(format!("row {i}")).with_value(i)),
        );
        tree.attach();
        let mut state = ListboxState::new();
        state.ensure_rows(&tree);
        state.set_areas(Rect::default(), Rect::new(0, 0, 20, 10), Rect::default());

        for _ in 0..100 {
            let _ = state.handle_mouse(&mut tree, scroll_at(1, 1, MouseEventKind::ScrollDown));
        }
        assert_eq!(state.offset(), 20);

        let _ = state.handle_mouse(&mut tree, scroll_at(1, 1, MouseEventKind::ScrollUp));
        assert_eq!(state.offset(), 19);

        // A click two rows into the viewport resolves through the offset.
        let events = state.handle_mouse(&mut tree, click_at(1, 2));
        assert!(matches!(
            events[0],
            ListboxEvent::SelectItem { value: 21, .. }
        ));
    }

    #[test]
    fn snapshot_restores_open_flags_and_offset() {
        let mut tree = sample_tree();
        let mut state = ready_state(&tree);

        let _ = state.handle_mouse(&mut tree, click_at(3, 1));
        state.ensure_rows(&tree);
        let snapshot = state.snapshot(&tree);

        let mut fresh_tree = sample_tree();
        let mut fresh = ListboxState::new();
        fresh.restore(&mut fresh_tree, snapshot);
        fresh.ensure_rows(&fresh_tree);

        assert!(fresh_tree.node_at(&[1]).unwrap().is_open());
        assert_eq!(fresh.row_count(), state.row_count());
    }
}
