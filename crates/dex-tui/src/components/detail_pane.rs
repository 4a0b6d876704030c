//! Detail pane component.
//!
//! Shows one entry's profile and base stats on the left, and its species
//! description and evolution chain on the right. Species and evolution
//! failures are shown in place; the profile is always complete once the
//! report exists.

use dex_client::{DetailReport, StageFailure};
use dex_core::{BaseStats, EvolutionStage, PokemonId};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph, StatefulWidget,
    Widget, Wrap,
};

use crate::app::{DetailState, SelectionState};
use crate::components::pokemon_list::type_badges;
use crate::theme::Theme;

/// Width of a full stat bar, in cells.
const BAR_WIDTH: usize = 24;

/// Largest possible base stat.
const STAT_MAX: usize = 255;

/// A stateful detail pane; the state selects an evolution stage.
pub struct DetailPane<'a> {
    detail: &'a DetailState,
    favorite: bool,
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    /// Creates a new detail pane.
    #[must_use]
    pub const fn new(detail: &'a DetailState, favorite: bool, theme: &'a Theme) -> Self {
        Self {
            detail,
            favorite,
            theme,
        }
    }

    fn block(&self, title: &str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(format!(" {title} "), self.theme.header_style))
    }

    fn render_message(&self, lines: Vec<Line<'a>>, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(self.block("Detail"))
            .render(area, buf);
    }

    fn profile_lines(&self, report: &DetailReport) -> Vec<Line<'a>> {
        let profile = &report.profile;
        let summary = &profile.summary;

        let mut title = vec![
            Span::styled(format!("#{:03} ", summary.id), self.theme.dimmed_style()),
            Span::styled(
                summary.name.clone(),
                self.theme.base_style().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.favorite {
            title.push(Span::styled(" ★", self.theme.favorite_style()));
        }
        if summary.is_legendary {
            title.push(Span::styled(
                " Legendary",
                Style::default().fg(self.theme.legendary_fg),
            ));
        }

        let mut lines = vec![
            Line::from(title),
            type_badges(summary, self.theme),
            Line::from(""),
            Line::from(vec![
                Span::styled("Height ", self.theme.dimmed_style()),
                Span::styled(format!("{:.1} m", profile.height_m()), self.theme.base_style()),
                Span::styled("   Weight ", self.theme.dimmed_style()),
                Span::styled(format!("{:.1} kg", profile.weight_kg()), self.theme.base_style()),
            ]),
            Line::from(vec![
                Span::styled("Abilities ", self.theme.dimmed_style()),
                Span::styled(profile.abilities.join(", "), self.theme.base_style()),
            ]),
            Line::from(""),
        ];

        let values = summary.stats.values();
        for (label, value) in BaseStats::LABELS.iter().zip(values) {
            lines.push(self.stat_line(label, value));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}", "Total"), self.theme.dimmed_style()),
            Span::styled(
                format!("{:>4}", summary.total()),
                self.theme.base_style().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines
    }

    fn stat_line(&self, label: &str, value: u8) -> Line<'a> {
        let filled = stat_bar_len(value);
        Line::from(vec![
            Span::styled(format!("{label:<8}"), self.theme.dimmed_style()),
            Span::styled(format!("{value:>4} "), self.theme.base_style()),
            Span::styled(
                "█".repeat(filled),
                Style::default().fg(self.theme.stat_color(value)),
            ),
            Span::styled("░".repeat(BAR_WIDTH - filled), self.theme.dimmed_style()),
        ])
    }

    fn render_ready(&self, report: &DetailReport, area: Rect, buf: &mut Buffer, state: &SelectionState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        Paragraph::new(Text::from(self.profile_lines(report)))
            .block(self.block(&report.profile.summary.name))
            .render(columns[0], buf);

        let description = match &report.species {
            Ok(info) => Line::from(Span::styled(
                info.description
                    .clone()
                    .unwrap_or_else(|| "No description available.".to_owned()),
                self.theme.base_style(),
            )),
            Err(failure) => self.failure_line("Description unavailable", failure),
        };
        Paragraph::new(description)
            .wrap(Wrap { trim: true })
            .block(self.block("Description"))
            .render(right[0], buf);

        match &report.evolution {
            Ok(stages) => {
                self.render_evolution(stages, report.profile.summary.id, right[1], buf, state);
            }
            Err(failure) => {
                Paragraph::new(self.failure_line("Evolution chain unavailable", failure))
                    .wrap(Wrap { trim: true })
                    .block(self.block("Evolution"))
                    .render(right[1], buf);
            }
        }
    }

    fn render_evolution(
        &self,
        stages: &[EvolutionStage],
        current: PokemonId,
        area: Rect,
        buf: &mut Buffer,
        state: &SelectionState,
    ) {
        let items: Vec<ListItem<'_>> = stages
            .iter()
            .enumerate()
            .map(|(step, stage)| {
                let style = if stage.id == current {
                    self.theme.accent_style().add_modifier(Modifier::BOLD)
                } else {
                    self.theme.base_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", step + 1), self.theme.dimmed_style()),
                    Span::styled(stage.name.clone(), style),
                    Span::styled(format!(" #{:03}", stage.id), self.theme.dimmed_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(self.block("Evolution"))
            .highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default().with_selected(state.selected);
        StatefulWidget::render(list, area, buf, &mut list_state);
    }

    fn failure_line(&self, what: &str, failure: &StageFailure) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{what}: "), self.theme.error_style()),
            Span::styled(failure.to_string(), self.theme.dimmed_style()),
        ])
    }
}

impl StatefulWidget for &DetailPane<'_> {
    type State = SelectionState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        match self.detail {
            DetailState::Ready(report) => self.render_ready(report, area, buf, state),
            DetailState::Loading(id) => self.render_message(
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Loading #{id:03}..."),
                        self.theme.dimmed_style(),
                    )),
                ],
                area,
                buf,
            ),
            DetailState::Failed { id, failure } => self.render_message(
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Could not load #{id:03}"),
                        self.theme.error_style(),
                    )),
                    Line::from(Span::styled(failure.to_string(), self.theme.dimmed_style())),
                    Line::from(""),
                    Line::from(Span::styled("Press r to retry", self.theme.accent_style())),
                ],
                area,
                buf,
            ),
            DetailState::Idle => self.render_message(
                vec![Line::from(Span::styled(
                    "No entry selected",
                    self.theme.dimmed_style(),
                ))],
                area,
                buf,
            ),
        }
    }
}

/// Filled cells of a stat bar, rounded to the nearest cell.
fn stat_bar_len(value: u8) -> usize {
    (usize::from(value) * BAR_WIDTH + STAT_MAX / 2) / STAT_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bar_len() {
        assert_eq!(stat_bar_len(0), 0);
        assert_eq!(stat_bar_len(255), BAR_WIDTH);
        assert_eq!(stat_bar_len(128), BAR_WIDTH / 2);
        assert!(stat_bar_len(1) <= 1);
    }

    #[test]
    fn test_stat_line_layout() {
        let theme = Theme::dark();
        let state = DetailState::Idle;
        let pane = DetailPane::new(&state, false, &theme);
        let line = pane.stat_line("Speed", 90);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("Speed     90 "));
        assert_eq!(text.chars().filter(|c| *c == '█' || *c == '░').count(), BAR_WIDTH);
        assert_eq!(line.spans[2].style.fg, Some(theme.stat_mid_fg));
    }
}
