//! Header bar component.

use dex_core::Route;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

/// Title, current view, catalog size and favorite count.
pub struct HeaderBar<'a> {
    route: &'a Route,
    catalog: usize,
    favorites: usize,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    /// Creates a new header bar.
    #[must_use]
    pub const fn new(route: &'a Route, catalog: usize, favorites: usize, theme: &'a Theme) -> Self {
        Self {
            route,
            catalog,
            favorites,
            theme,
        }
    }

    fn view_label(&self) -> String {
        match self.route {
            Route::Detail { id, .. } => format!("{} #{id:03}", self.route.title()),
            route => route.title().to_owned(),
        }
    }
}

impl Widget for &HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(" │ ", self.theme.dimmed_style());

        let line = Line::from(vec![
            Span::styled("Pokédex", self.theme.header_style),
            separator.clone(),
            Span::styled(self.view_label(), self.theme.base_style()),
            separator.clone(),
            Span::styled(format!("{} Pokémon", self.catalog), self.theme.dimmed_style()),
            separator.clone(),
            Span::styled(format!("★ {}", self.favorites), self.theme.favorite_style()),
            separator,
            Span::styled("? for help", self.theme.accent_style()),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
