//! Pokémon table component.
//!
//! Displays a scrollable, selectable table of catalog entries with their
//! favorite marker, ID, name, type badges and base-stat total.

use dex_core::PokemonSummary;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table, TableState,
    Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{ListRow, SelectionState};
use crate::theme::Theme;

/// Width of the name column.
const NAME_WIDTH: u16 = 16;

/// A stateful table of catalog entries.
pub struct PokemonTable<'a> {
    rows: &'a [ListRow<'a>],
    title: String,
    empty_message: &'a str,
    theme: &'a Theme,
}

impl<'a> PokemonTable<'a> {
    /// Creates a table over `rows`.
    #[must_use]
    pub fn new(rows: &'a [ListRow<'a>], title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            rows,
            title: title.into(),
            empty_message: "Nothing to show",
            theme,
        }
    }

    /// Sets the text shown when there are no rows.
    #[must_use]
    pub const fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    fn build_row(&self, row: &ListRow<'a>) -> Row<'a> {
        let summary = row.summary;
        let marker = if row.favorite {
            Span::styled("★", self.theme.favorite_style())
        } else if summary.is_legendary {
            Span::styled("◆", Style::default().fg(self.theme.legendary_fg))
        } else {
            Span::raw(" ")
        };

        Row::new(vec![
            Cell::from(marker),
            Cell::from(Span::styled(
                format!("#{:03}", summary.id),
                self.theme.dimmed_style(),
            )),
            Cell::from(Span::styled(
                truncate_to_width(&summary.name, usize::from(NAME_WIDTH)),
                self.theme.base_style(),
            )),
            Cell::from(type_badges(summary, self.theme)),
            Cell::from(Line::from(Span::styled(
                summary.total().to_string(),
                self.theme.base_style(),
            ))
            .alignment(Alignment::Right)),
        ])
        .height(1)
    }
}

impl StatefulWidget for &PokemonTable<'_> {
    type State = SelectionState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                format!(" {} ({}) ", self.title, self.rows.len()),
                self.theme.header_style,
            ));

        if self.rows.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                self.empty_message,
                self.theme.dimmed_style(),
            )))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
            return;
        }

        let header = Row::new(vec!["", "ID", "Name", "Types", "Total"])
            .style(self.theme.dimmed_style())
            .height(1);

        let rows: Vec<_> = self.rows.iter().map(|row| self.build_row(row)).collect();

        let widths = [
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(NAME_WIDTH),
            Constraint::Min(16),
            Constraint::Length(5),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default()
            .with_selected(state.selected)
            .with_offset(state.scroll_offset);

        StatefulWidget::render(table, area, buf, &mut table_state);
        state.scroll_offset = table_state.offset();
    }
}

/// Type labels as colored badges, slot order.
pub fn type_badges<'a>(summary: &PokemonSummary, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::with_capacity(summary.types.len() * 2);
    for (i, ty) in summary.types.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(ty.label(), theme.type_style(*ty)));
    }
    Line::from(spans)
}

/// Truncates `text` to at most `max_width` terminal columns, ending in `…`
/// when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
