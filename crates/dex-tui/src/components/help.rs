//! Help panel component.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
    /// Views or modes where the binding applies.
    scope: &'static str,
}

const fn binding(key: &'static str, description: &'static str, scope: &'static str) -> KeyBinding {
    KeyBinding {
        key,
        description,
        scope,
    }
}

const KEY_BINDINGS: &[KeyBinding] = &[
    // Selection
    binding("j / ↓", "Next entry", "Lists"),
    binding("k / ↑", "Previous entry", "Lists"),
    binding("g / Home", "First entry", "Lists"),
    binding("G / End", "Last entry", "Lists"),
    binding("PgDn / PgUp", "Page down / up", "Lists"),
    binding("Click", "Select entry", "Lists"),
    binding("Enter", "Open detail / evolution", "Lists, Detail"),
    // Views
    binding("h", "Home", "Any view"),
    binding("l", "Full list", "Any view"),
    binding("F", "Favorites", "Any view"),
    binding("Esc / Bksp", "Back", "Any view"),
    binding("Esc", "Dismiss status message", "Home"),
    // Search and filters
    binding("/", "Search catalog", "Home, List, Detail"),
    binding("/", "Filter favorites by name", "Favorites"),
    binding("f", "Cycle type / legendary filter", "List"),
    binding("Enter", "Commit search", "Search"),
    binding("Esc", "Cancel search / clear filter", "Search, Filter"),
    // Actions
    binding("Space", "Toggle favorite", "Lists, Detail"),
    binding("r", "Retry failed load", "Any view"),
    binding("?", "Toggle help", "Any view"),
    binding("q / Ctrl+c", "Quit", "Any"),
];

/// A help panel overlay listing key bindings.
pub struct HelpPanel<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        binding.key,
                        self.theme.favorite_style().add_modifier(Modifier::BOLD),
                    )),
                    Cell::from(Span::styled(binding.description, self.theme.base_style())),
                    Cell::from(Span::styled(binding.scope, self.theme.dimmed_style())),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let heading = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Help - Key Bindings ",
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.overlay_bg));

        let header = Row::new(vec![
            Cell::from(Span::styled("Key", heading)),
            Cell::from(Span::styled("Action", heading)),
            Cell::from(Span::styled("Where", heading)),
        ])
        .height(1)
        .bottom_margin(1);

        let widths = [
            Constraint::Length(13),
            Constraint::Min(24),
            Constraint::Length(18),
        ];

        Table::new(self.build_rows(), widths)
            .block(block)
            .header(header)
            .render(area, buf);
    }
}
