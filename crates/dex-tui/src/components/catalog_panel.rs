//! Catalog panel component.
//!
//! While the catalog loads this shows a progress gauge; afterwards it shows
//! catalog counts and the active list filter. A failed load shows the error
//! and how to retry.

use dex_core::CatalogFilter;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};

use crate::app::LoadState;
use crate::theme::Theme;

/// Load progress or catalog counts.
pub struct CatalogPanel<'a> {
    load: &'a LoadState,
    catalog: usize,
    legendary: usize,
    filter: CatalogFilter,
    theme: &'a Theme,
}

impl<'a> CatalogPanel<'a> {
    /// Creates a new catalog panel.
    #[must_use]
    pub const fn new(
        load: &'a LoadState,
        catalog: usize,
        legendary: usize,
        filter: CatalogFilter,
        theme: &'a Theme,
    ) -> Self {
        Self {
            load,
            catalog,
            legendary,
            filter,
            theme,
        }
    }

    fn progress_line(&self) -> Line<'a> {
        let counts = match self.load {
            LoadState::Loading {
                discovered: Some(total),
                loaded,
            } => format!("{loaded}/{total} Pokémon"),
            _ => "fetching index".to_owned(),
        };
        Line::from(vec![
            Span::styled(
                "Loading catalog... ",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(counts, self.theme.base_style()),
        ])
    }

    fn counts_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled("Catalog: ", self.theme.dimmed_style()),
            Span::styled(self.catalog.to_string(), self.theme.base_style()),
            Span::raw(" │ "),
            Span::styled("Legendary: ", self.theme.dimmed_style()),
            Span::styled(
                self.legendary.to_string(),
                Style::default().fg(self.theme.legendary_fg),
            ),
            Span::raw(" │ "),
            Span::styled("Filter: ", self.theme.dimmed_style()),
            Span::styled(self.filter.to_string(), self.theme.accent_style()),
        ])
    }
}

impl Widget for &CatalogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        match self.load {
            LoadState::Loading { .. } => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(30), Constraint::Length(30)])
                    .split(inner);

                Paragraph::new(self.progress_line()).render(chunks[0], buf);

                let percent = self.load.progress_percent();
                Gauge::default()
                    .gauge_style(
                        Style::default()
                            .fg(self.theme.accent)
                            .bg(self.theme.overlay_bg),
                    )
                    .percent(percent)
                    .label(format!("{percent}%"))
                    .render(chunks[1], buf);
            }
            LoadState::Failed(err) => {
                let line = Line::from(vec![
                    Span::styled(format!("Catalog failed: {err}"), self.theme.error_style()),
                    Span::styled("  (r to retry)", self.theme.dimmed_style()),
                ]);
                Paragraph::new(line).render(inner, buf);
            }
            LoadState::Idle | LoadState::Ready => {
                Paragraph::new(self.counts_line()).render(inner, buf);
            }
        }
    }
}
