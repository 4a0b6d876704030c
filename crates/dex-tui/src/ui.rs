//! Main UI layout and rendering orchestration.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | Pokédex │ Pokédex │ 151 Pokémon │ ★ 3 │ ? for help                |
//! +------------------------------------------------------------------+
//! | Catalog: 151 │ Legendary: 5 │ Filter: All                        |
//! +------------------------------------------------------------------+
//! | Home: featured table                                             |
//! | List / Favorites: catalog table                                  |
//! | Detail: profile + stats | description + evolution chain          |
//! +------------------------------------------------------------------+
//! | NORMAL  Loaded 151 Pokémon │ 151/151                             |
//! +------------------------------------------------------------------+
//! ```
//!
//! The search input and help panel are drawn as overlays on top.

use dex_core::Route;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, AppMode, LoadState};
use crate::components::{
    CatalogPanel, DetailPane, HeaderBar, HelpPanel, PokemonTable, SearchInput, StatusBar,
};
use crate::theme::Theme;

/// Renders the entire UI based on the current application state.
pub fn render(app: &App, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(2), // Catalog panel
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let catalog = app.search.catalog().len();

    let header = HeaderBar::new(&app.route, catalog, app.favorites.len(), theme);
    frame.render_widget(&header, chunks[0]);

    let panel = CatalogPanel::new(
        &app.load,
        catalog,
        app.legendary_count(),
        app.filter,
        theme,
    );
    frame.render_widget(&panel, chunks[1]);

    render_main_content(app, frame, chunks[2], theme);

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, chunks[3]);

    match app.mode {
        AppMode::Searching => {
            let preview = app.preview();
            let input = SearchInput::new(app.search.term(), theme).suggestions(&preview);
            frame.render_widget(&input, centered_rect(60, input.height(), area));
        }
        AppMode::Filtering => {
            let input = SearchInput::new(&app.favorites_filter, theme)
                .labels(" Filter favorites (Enter to keep, Esc to clear) ", "Name...");
            frame.render_widget(&input, centered_rect(60, input.height(), area));
        }
        AppMode::Help => {
            let help = HelpPanel::new(theme);
            frame.render_widget(&help, centered_percent_rect(70, 80, area));
        }
        AppMode::Normal => {}
    }
}

fn render_main_content(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    match &app.route {
        Route::Home | Route::List | Route::Favorites => {
            let rows = app.visible_rows();
            let (title, empty) = list_labels(app);
            let table = PokemonTable::new(&rows, title, theme).empty_message(empty);
            frame.render_stateful_widget(&table, area, &mut app.selection.clone());
        }
        Route::Detail { id, .. } => {
            let pane = DetailPane::new(&app.detail, app.favorites.is_favorite(*id), theme);
            frame.render_stateful_widget(&pane, area, &mut app.selection.clone());
        }
        Route::NotFound => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(Span::styled("No such Pokémon", theme.error_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to go home, / to search",
                    theme.dimmed_style(),
                )),
            ]);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style)
                .title(Span::styled(" Not Found ", theme.header_style));
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
        }
    }
}

/// Table title and empty-state text for the list views.
fn list_labels(app: &App) -> (&'static str, &'static str) {
    let empty = match app.load {
        LoadState::Loading { .. } => "Loading catalog...",
        LoadState::Failed(_) => "Catalog unavailable. Press r to retry",
        LoadState::Idle | LoadState::Ready => "",
    };

    match app.route {
        Route::Home => ("Featured", if empty.is_empty() { "Catalog is empty" } else { empty }),
        Route::Favorites => (
            "Favorites",
            if !empty.is_empty() {
                empty
            } else if app.favorites_filter.is_empty() {
                "No favorites yet. Press Space on an entry to add it"
            } else {
                "No favorites match the filter"
            },
        ),
        _ => ("Pokédex", if empty.is_empty() { "No Pokémon match" } else { empty }),
    }
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);

    horizontal_center(percent_x, vertical[1])
}

/// A rectangle with the given percentage width and height, centered in `area`.
fn centered_percent_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    horizontal_center(percent_x, vertical[1])
}

fn horizontal_center(percent_x: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area)[1]
}
