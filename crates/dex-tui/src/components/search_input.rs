//! Text input overlay used for the catalog search and the favorites filter.

use dex_core::PokemonSummary;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

/// A text input overlay with an optional suggestion list below the input.
pub struct SearchInput<'a> {
    text: &'a str,
    title: &'a str,
    placeholder: &'a str,
    suggestions: Option<&'a [&'a PokemonSummary]>,
    theme: &'a Theme,
}

impl<'a> SearchInput<'a> {
    /// Creates an input showing `text`.
    #[must_use]
    pub const fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self {
            text,
            title: " Search (Enter to commit, Esc to cancel) ",
            placeholder: "Name, type or #id...",
            suggestions: None,
            theme,
        }
    }

    /// Overrides the title and placeholder.
    #[must_use]
    pub const fn labels(mut self, title: &'a str, placeholder: &'a str) -> Self {
        self.title = title;
        self.placeholder = placeholder;
        self
    }

    /// Shows `suggestions` under the input.
    #[must_use]
    pub const fn suggestions(mut self, suggestions: &'a [&'a PokemonSummary]) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Rows needed to show the input and its suggestions.
    #[must_use]
    pub fn height(&self) -> u16 {
        let rows = self.suggestions.map_or(0, |s| s.len().max(1) + 1);
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(3)
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let cursor = Span::styled("▌", Style::default().fg(self.theme.accent));
        let input = if self.text.is_empty() {
            Line::from(vec![
                Span::styled(
                    self.placeholder,
                    self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                ),
                cursor,
            ])
        } else {
            Line::from(vec![Span::styled(self.text, self.theme.base_style()), cursor])
        };

        let mut lines = vec![input];
        let Some(suggestions) = self.suggestions else {
            return lines;
        };

        lines.push(Line::from(""));
        if suggestions.is_empty() {
            let hint = if self.text.trim().is_empty() {
                "Type to see suggestions"
            } else {
                "No matches"
            };
            lines.push(Line::from(Span::styled(hint, self.theme.dimmed_style())));
        }
        for summary in suggestions {
            lines.push(Line::from(vec![
                Span::styled(format!("#{:03} ", summary.id), self.theme.dimmed_style()),
                Span::styled(summary.name.as_str(), self.theme.base_style()),
                Span::styled(format!("  {}", summary.type_labels()), self.theme.dimmed_style()),
            ]));
        }
        lines
    }
}

impl Widget for &SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                self.title,
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.overlay_bg));

        Paragraph::new(Text::from(self.lines()))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use dex_core::{BaseStats, PokemonType};

    use super::*;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_empty_input_shows_placeholder() {
        let theme = Theme::dark();
        let input = SearchInput::new("", &theme);
        assert_eq!(text(&input.lines()), vec!["Name, type or #id...▌"]);
        assert_eq!(input.height(), 3);
    }

    #[test]
    fn test_suggestions_listed() {
        let theme = Theme::dark();
        let charmander = PokemonSummary::new(
            4,
            "Charmander",
            [PokemonType::Fire],
            BaseStats::default(),
            false,
        );
        let suggestions = [&charmander];
        let input = SearchInput::new("char", &theme).suggestions(&suggestions);

        assert_eq!(
            text(&input.lines()),
            vec!["char▌", "", "#004 Charmander  Fire"]
        );
        assert_eq!(input.height(), 5);
    }

    #[test]
    fn test_no_matches_hint() {
        let theme = Theme::dark();
        let input = SearchInput::new("zzz", &theme).suggestions(&[]);
        assert_eq!(text(&input.lines()), vec!["zzz▌", "", "No matches"]);
    }
}
