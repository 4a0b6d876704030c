//! Status bar component.
//!
//! Displays the input mode, the latest status message, the active search
//! term or filter, and the row count of the current view.

use dex_core::{CatalogFilter, Route};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::{App, AppMode};
use crate::theme::Theme;

/// The status bar component.
pub struct StatusBar<'a> {
    app: &'a App,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn build_line(&self) -> Line<'a> {
        let separator = || Span::styled(" │ ", self.theme.dimmed_style());
        let mut spans = Vec::new();

        let mode_text = match self.app.mode {
            AppMode::Normal => "NORMAL",
            AppMode::Searching => "SEARCH",
            AppMode::Filtering => "FILTER",
            AppMode::Help => "HELP",
        };
        spans.push(Span::styled(
            format!(" {mode_text} "),
            Style::default()
                .fg(Color::Black)
                .bg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));

        if let Some(status) = &self.app.status {
            let style = if status.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(status.text.clone(), style));
            spans.push(separator());
        }

        let committed = self.app.search.committed_term();
        if !committed.is_empty() {
            spans.push(Span::styled("Search: ", self.theme.dimmed_style()));
            spans.push(Span::styled(format!("\"{committed}\""), self.theme.accent_style()));
            spans.push(separator());
        }

        match &self.app.route {
            Route::List if self.app.filter != CatalogFilter::All => {
                spans.push(Span::styled("Filter: ", self.theme.dimmed_style()));
                spans.push(Span::styled(self.app.filter.to_string(), self.theme.accent_style()));
                spans.push(separator());
            }
            Route::Favorites if !self.app.favorites_filter.is_empty() => {
                spans.push(Span::styled("Name: ", self.theme.dimmed_style()));
                spans.push(Span::styled(
                    format!("\"{}\"", self.app.favorites_filter),
                    self.theme.accent_style(),
                ));
                spans.push(separator());
            }
            _ => {}
        }

        if let Some(count) = self.row_count() {
            spans.push(Span::styled(
                format!("{count}/{}", self.app.search.catalog().len()),
                self.theme.dimmed_style(),
            ));
        }

        Line::from(spans)
    }

    fn row_count(&self) -> Option<usize> {
        match self.app.route {
            Route::List | Route::Favorites => Some(self.app.visible_entries().len()),
            Route::Home | Route::Detail { .. } | Route::NotFound => None,
        }
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line())
            .style(self.theme.status_bar_style)
            .render(area, buf);
    }
}
