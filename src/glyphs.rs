use ratatui::text::{Line, Span};

use crate::context::ListboxRowContext;
use crate::node::ListboxNode;
use crate::role::Role;

/// Glyph set used for row prefixes.
#[derive(Clone, Copy)]
pub struct ListboxGlyphs<'a> {
    /// One indentation step.
    pub indent: &'a str,
    /// Expander of an open group.
    pub expanded: &'a str,
    /// Expander of a closed group.
    pub collapsed: &'a str,
    /// Marker of a leaf item.
    pub leaf: &'a str,
}

impl ListboxGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "  ",
            expanded: "▼",
            collapsed: "▶",
            leaf: "•",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "  ",
            expanded: "v",
            collapsed: ">",
            leaf: "*",
        }
    }
}

/// Maps a node to the visible content of its row.
///
/// The default [`TextRows`] renders the node's own text (or its label
/// child's, for groups and nested containers); implement this to render
/// richer per-row content from the payload.
pub trait ListboxRenderer<V> {
    /// Returns the line shown for `node`'s row.
    fn row_line<'a>(
        &'a self,
        node: &'a ListboxNode<V>,
        ctx: &ListboxRowContext,
        glyphs: &ListboxGlyphs<'a>,
    ) -> Line<'a>;
}

/// Default renderer: indentation, expander glyph, and the node's text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRows;

impl<V> ListboxRenderer<V> for TextRows {
    fn row_line<'a>(
        &'a self,
        node: &'a ListboxNode<V>,
        ctx: &ListboxRowContext,
        glyphs: &ListboxGlyphs<'a>,
    ) -> Line<'a> {
        let text = match node.role() {
            // Groups and nested containers show their label child's text.
            Role::Group | Role::Container => {
                node.label_child().map_or_else(|| node.text(), ListboxNode::text)
            }
            _ => node.text(),
        };
        listbox_row_line(text, ctx, glyphs)
    }
}

/// Builds the standard row line: indent, expander/leaf glyph, text.
pub fn listbox_row_line<'a>(
    text: &'a str,
    ctx: &ListboxRowContext,
    glyphs: &ListboxGlyphs<'a>,
) -> Line<'a> {
    let marker = match ctx.role {
        Role::Group => {
            if ctx.is_open {
                glyphs.expanded
            } else {
                glyphs.collapsed
            }
        }
        Role::Item => glyphs.leaf,
        _ => "",
    };

    let mut spans = Vec::with_capacity(ctx.level as usize + 3);
    for _ in 0..ctx.level {
        spans.push(Span::raw(glyphs.indent));
    }
    if !marker.is_empty() {
        spans.push(Span::raw(marker));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(text));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;

    fn ctx(role: Role, level: u16, is_open: bool) -> ListboxRowContext {
        ListboxRowContext {
            level,
            role,
            theme: Theme::Light,
            is_open,
            has_children: true,
            is_selected: false,
            is_disabled: false,
        }
    }

    #[test]
    fn group_rows_show_expander_state() {
        let glyphs = ListboxGlyphs::ascii();
        let open = listbox_row_line("g", &ctx(Role::Group, 0, true), &glyphs);
        let closed = listbox_row_line("g", &ctx(Role::Group, 0, false), &glyphs);

        assert_eq!(open.to_string(), "v g");
        assert_eq!(closed.to_string(), "> g");
    }

    #[test]
    fn item_rows_indent_by_level() {
        let glyphs = ListboxGlyphs::ascii();
        let line = listbox_row_line("leaf", &ctx(Role::Item, 2, false), &glyphs);
        assert_eq!(line.to_string(), "    * leaf");
    }

    #[test]
    fn text_rows_uses_group_label_child() {
        let group = ListboxNode::<u32>::group()
            .child(ListboxNode::label("Heading"))
            .child(ListboxNode::item("leaf"));
        let glyphs = ListboxGlyphs::ascii();
        let line = TextRows.row_line(&group, &ctx(Role::Group, 0, false), &glyphs);

        assert_eq!(line.to_string(), "> Heading");
    }
}
