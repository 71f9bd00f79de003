use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
};

use crate::context::ListboxRowContext;
use crate::glyphs::{ListboxGlyphs, ListboxRenderer};
use crate::node::ListboxNode;
use crate::role::Role;
use crate::state::{ListboxState, RowKind};
use crate::style::ListboxStyle;

/// Role-dispatching listbox widget.
///
/// A container root renders as a themed frame with a header region (its
/// label children), a scrollable body (group/item descendants flattened to
/// rows), and a footer region (its footer children). Other roles render as
/// bare rows; a `None` root renders nothing at all.
///
/// Rendering also captures the hit regions in the state, which
/// [`ListboxState::handle_mouse`] uses to translate clicks into events.
pub struct ListboxView<'a, V, R> {
    root: &'a ListboxNode<V>,
    renderer: &'a R,
    style: ListboxStyle,
    glyphs: ListboxGlyphs<'a>,
}

impl<'a, V, R> ListboxView<'a, V, R>
where
    R: ListboxRenderer<V>,
{
    /// Creates a widget over the given tree.
    pub const fn new(root: &'a ListboxNode<V>, renderer: &'a R, style: ListboxStyle) -> Self {
        Self {
            root,
            renderer,
            style,
            glyphs: ListboxGlyphs::unicode(),
        }
    }

    /// Replaces the glyph set.
    #[must_use]
    pub const fn glyphs(mut self, glyphs: ListboxGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    fn render_slot_lines(
        &self,
        area: Rect,
        buf: &mut Buffer,
        nodes: &[&ListboxNode<V>],
        footer: bool,
    ) {
        for (i, node) in nodes.iter().take(area.height as usize).enumerate() {
            let line_area = Rect {
                y: area.y + i as u16,
                height: 1,
                ..area
            };
            let palette = self.style.palette(node.theme());
            let style = if footer {
                palette.footer_style
            } else {
                palette.header_style
            };
            buf.set_style(line_area, style);
            Line::raw(node.text()).render(line_area, buf);
        }
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer, state: &ListboxState) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let start = state.offset();
        let end = (start + area.height as usize).min(state.row_count());
        if start >= end {
            return;
        }
        for (i, row) in state.rows()[start..end].iter().enumerate() {
            let Some(node) = self.root.node_at(row.path()) else {
                continue;
            };
            let row_area = Rect {
                y: area.y + i as u16,
                height: 1,
                ..area
            };
            let palette = self.style.palette(node.theme());
            let row_style = match row.kind() {
                RowKind::Group => palette.group_style,
                RowKind::Header => palette.header_style,
                RowKind::Footer => palette.footer_style,
                RowKind::Item => {
                    if node.is_disabled() {
                        palette.disabled_style
                    } else if node.is_selected() {
                        palette.selected_style
                    } else {
                        palette.row_style
                    }
                }
            };
            buf.set_style(row_area, row_style);
            let ctx = ListboxRowContext {
                level: row.level(),
                role: node.role(),
                theme: node.theme(),
                is_open: node.is_open(),
                has_children: !node.children().is_empty(),
                is_selected: node.is_selected(),
                is_disabled: node.is_disabled(),
            };
            let line = self.renderer.row_line(node, &ctx, &self.glyphs);
            line.render(row_area, buf);
        }
    }

    fn render_scrollbar(&self, area: Rect, buf: &mut Buffer, state: &ListboxState, viewport: usize) {
        let scroll_rows = state.row_count().saturating_sub(viewport);
        let mut scrollbar_state = ScrollbarState::new(scroll_rows.saturating_add(1))
            .position(state.offset().min(scroll_rows))
            .viewport_content_length(viewport);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl<V, R> StatefulWidget for ListboxView<'_, V, R>
where
    R: ListboxRenderer<V>,
{
    type State = ListboxState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.ensure_rows(self.root);

        match self.root.role() {
            Role::None => {
                // Degenerate state: nothing rendered, no hit regions.
                state.set_areas(Rect::default(), Rect::default(), Rect::default());
                return;
            }
            Role::Container => {}
            _ => {
                // Bare roots (group/item) render as rows without a frame.
                state.set_areas(Rect::default(), area, Rect::default());
                state.clamp_offset(area.height as usize);
                self.render_rows(area, buf, state);
                return;
            }
        }

        let palette = self.style.palette(self.root.theme());
        let block = Block::default()
            .borders(self.style.borders)
            .border_style(palette.border_style)
            .style(palette.block_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let labels: Vec<&ListboxNode<V>> = self
            .root
            .children()
            .iter()
            .filter(|c| c.role() == Role::Label)
            .collect();
        let footers: Vec<&ListboxNode<V>> = self
            .root
            .children()
            .iter()
            .filter(|c| c.role() == Role::Footer)
            .collect();

        let header_height = labels.len().min(inner.height as usize) as u16;
        let footer_height = footers.len().min(inner.height as usize) as u16;
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Fill(1),
            Constraint::Length(footer_height),
        ])
        .areas(inner);

        self.render_slot_lines(header_area, buf, &labels, false);
        self.render_slot_lines(footer_area, buf, &footers, true);

        let viewport = body_area.height as usize;
        state.clamp_offset(viewport);
        let overflow = state.row_count() > viewport;
        let mut body = body_area;
        if self.style.show_scrollbar && overflow && body.width > 0 {
            body.width -= 1;
            let scrollbar_area = Rect {
                x: body_area.x + body_area.width - 1,
                y: body_area.y,
                width: 1,
                height: body_area.height,
            };
            self.render_scrollbar(scrollbar_area, buf, state, viewport);
        }
        self.render_rows(body, buf, state);

        state.set_areas(header_area, body, footer_area);
    }
}
