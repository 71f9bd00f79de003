use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Borders;

/// Color scheme selector. Purely presentational; cascaded from the root
/// node into every descendant by [`crate::ListboxNode::set_theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

/// Resolved styles for one theme.
#[derive(Clone, Copy, Debug)]
pub struct ListboxPalette {
    /// Base style of the container frame and body background.
    pub block_style: Style,
    /// Border of the container frame.
    pub border_style: Style,
    /// Header region rows.
    pub header_style: Style,
    /// Plain item rows.
    pub row_style: Style,
    /// Group rows.
    pub group_style: Style,
    /// Selected item rows.
    pub selected_style: Style,
    /// Disabled item rows.
    pub disabled_style: Style,
    /// Footer region rows.
    pub footer_style: Style,
}

impl ListboxPalette {
    /// Default light palette.
    pub fn light() -> Self {
        Self {
            block_style: Style::default().fg(Color::Black).bg(Color::White),
            border_style: Style::default().fg(Color::Rgb(191, 191, 191)),
            header_style: Style::default()
                .fg(Color::Rgb(128, 130, 140))
                .bg(Color::Rgb(238, 238, 238))
                .add_modifier(Modifier::BOLD),
            row_style: Style::default().fg(Color::Black).bg(Color::White),
            group_style: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            selected_style: Style::default()
                .fg(Color::Rgb(0, 143, 195))
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            disabled_style: Style::default()
                .fg(Color::Rgb(128, 130, 140))
                .bg(Color::White)
                .add_modifier(Modifier::DIM),
            footer_style: Style::default().fg(Color::Rgb(0, 143, 195)).bg(Color::White),
        }
    }

    /// Default dark palette.
    pub fn dark() -> Self {
        let bg = Color::Rgb(55, 62, 72);
        Self {
            block_style: Style::default().fg(Color::White).bg(bg),
            border_style: Style::default().fg(Color::Rgb(90, 100, 115)),
            header_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(255, 150, 0))
                .add_modifier(Modifier::BOLD),
            row_style: Style::default().fg(Color::White).bg(bg),
            group_style: Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            selected_style: Style::default()
                .fg(Color::Rgb(29, 155, 201))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            disabled_style: Style::default()
                .fg(Color::Rgb(120, 131, 148))
                .bg(bg)
                .add_modifier(Modifier::DIM),
            footer_style: Style::default().fg(Color::Rgb(29, 155, 201)).bg(bg),
        }
    }
}

/// Visual settings for the listbox widget.
///
/// Both palettes are carried so per-node themes resolve at render time:
/// a subtree keeping its own theme is styled by it, not by the root's.
#[derive(Clone, Copy, Debug)]
pub struct ListboxStyle {
    /// Palette used by light-themed nodes.
    pub light: ListboxPalette,
    /// Palette used by dark-themed nodes.
    pub dark: ListboxPalette,
    /// Borders drawn around the container frame.
    pub borders: Borders,
    /// Draws a vertical scrollbar when the body overflows.
    pub show_scrollbar: bool,
}

impl ListboxStyle {
    /// Returns the palette for the given theme.
    #[inline]
    pub const fn palette(&self, theme: Theme) -> &ListboxPalette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Default for ListboxStyle {
    fn default() -> Self {
        Self {
            light: ListboxPalette::light(),
            dark: ListboxPalette::dark(),
            borders: Borders::ALL,
            show_scrollbar: true,
        }
    }
}
