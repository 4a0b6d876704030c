//! Application state and lifecycle management.
//!
//! [`App`] is plain state: it never spawns work itself. Anything that needs
//! the network is raised as a request ([`App::take_load_request`],
//! [`App::take_detail_request`]) and picked up by the event loop, which
//! reports results back as events.
//!
//! ```text
//! App
//!  ├── route: Route              # Current view
//!  ├── mode: AppMode             # Input mode
//!  ├── search: SearchStore       # Catalog, live term, committed results
//!  ├── favorites: Favorites      # Persisted favorite set
//!  ├── filter: CatalogFilter     # Type/legendary narrowing of the list
//!  ├── selection: SelectionState # Row or evolution-stage selection
//!  ├── load: LoadState           # Catalog load progress
//!  ├── detail: DetailState       # Detail pipeline result
//!  └── status: Option<StatusMessage>
//! ```

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dex_client::{DetailReport, LoadError, LoadUpdate, StageFailure};
use dex_core::{CatalogFilter, EvolutionStage, PokemonId, PokemonSummary, Route};
use dex_store::{FavoritesStore, KeyValueStore, SearchStore};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::action::Action;

/// Favorites persisted through any storage backend.
pub type Favorites = FavoritesStore<Box<dyn KeyValueStore>>;

/// Entries shown on the home view.
pub const FEATURED_COUNT: usize = 3;

/// Suggestions shown under the search input.
pub const PREVIEW_LIMIT: usize = 5;

/// Rows taken by everything around the main table (header, catalog panel,
/// status bar, table borders and column header).
const CHROME_ROWS: u16 = 8;

/// Screen row of the first table entry: below the header, the catalog
/// panel, the table border and the column header.
const TABLE_FIRST_ROW: u16 = 6;

/// The current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal browsing mode.
    #[default]
    Normal,

    /// Typing into the search overlay.
    Searching,

    /// Typing the favorites name filter.
    Filtering,

    /// Help panel is displayed.
    Help,
}

/// Selection and scroll position within the current view.
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Currently selected index (if any).
    pub selected: Option<usize>,

    /// First visible row.
    pub scroll_offset: usize,

    /// Number of visible rows (for page navigation).
    pub visible_height: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_height: 10,
        }
    }
}

impl SelectionState {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next item, wrapping to the start.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) | None => 0,
        });
        self.ensure_visible();
    }

    /// Moves to the previous item, wrapping to the end.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        });
        self.ensure_visible();
    }

    /// Moves to the first item.
    pub fn select_first(&mut self, len: usize) {
        self.reset(len);
    }

    /// Moves to the last item.
    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(len - 1);
            self.ensure_visible();
        }
    }

    /// Moves down by one page, stopping at the last item.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page = self.page_size();
        self.selected = Some(self.selected.map_or(0, |i| i + page).min(len - 1));
        self.ensure_visible();
    }

    /// Moves up by one page, stopping at the first item.
    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page = self.page_size();
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page)));
        self.ensure_visible();
    }

    /// Selects `index` if it is in range.
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.selected = Some(index);
            self.ensure_visible();
        }
    }

    /// Selects the first item of a fresh list of `len` items.
    pub fn reset(&mut self, len: usize) {
        self.selected = (len > 0).then_some(0);
        self.scroll_offset = 0;
    }

    /// Pulls the selection back into range after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.ensure_visible();
    }

    const fn page_size(&self) -> usize {
        if self.visible_height == 0 {
            1
        } else {
            self.visible_height
        }
    }

    fn ensure_visible(&mut self) {
        let Some(selected) = self.selected else {
            self.scroll_offset = 0;
            return;
        };
        let height = self.page_size();
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + height {
            self.scroll_offset = selected + 1 - height;
        }
    }
}

/// Progress of the catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet, or the load was cancelled.
    #[default]
    Idle,

    /// The load is running.
    Loading {
        /// References returned by the index, once known.
        discovered: Option<usize>,
        /// Records loaded so far.
        loaded: usize,
    },

    /// The catalog is available.
    Ready,

    /// The load failed; the catalog is empty.
    Failed(LoadError),
}

impl LoadState {
    /// Returns `true` while the load is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Completion in percent, `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> u16 {
        match self {
            Self::Loading {
                discovered: Some(total),
                loaded,
            } if *total > 0 => u16::try_from((loaded * 100 / total).min(100)).unwrap_or(100),
            Self::Ready => 100,
            _ => 0,
        }
    }
}

/// What the detail view currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    /// No detail view is open.
    #[default]
    Idle,

    /// Waiting for the pipeline.
    Loading(PokemonId),

    /// Pipeline finished; later stages may still carry failures.
    Ready(Box<DetailReport>),

    /// The entity stage failed.
    Failed {
        /// Requested entry.
        id: PokemonId,
        /// Why it failed.
        failure: StageFailure,
    },
}

impl DetailState {
    /// The report, once loaded.
    #[must_use]
    pub fn report(&self) -> Option<&DetailReport> {
        match self {
            Self::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// Evolution stages of the loaded report, or nothing.
    #[must_use]
    pub fn evolution(&self) -> &[EvolutionStage] {
        self.report()
            .and_then(|report| report.evolution.as_deref().ok())
            .unwrap_or_default()
    }
}

/// One row of a list view.
#[derive(Debug, Clone, Copy)]
pub struct ListRow<'a> {
    /// The entry.
    pub summary: &'a PokemonSummary,
    /// Whether the entry is a favorite.
    pub favorite: bool,
}

/// Status message to display in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl StatusMessage {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` once the message is older than five seconds.
    #[must_use]
    pub fn should_hide(&self) -> bool {
        self.timestamp.elapsed().as_secs() > 5
    }
}

/// The main application state.
pub struct App {
    /// Current view.
    pub route: Route,

    /// Current input mode.
    pub mode: AppMode,

    /// Catalog and search state.
    pub search: SearchStore,

    /// Favorite set.
    pub favorites: Favorites,

    /// Narrowing applied to the list view.
    pub filter: CatalogFilter,

    /// Name filter for the favorites view.
    pub favorites_filter: String,

    /// Selection within the current view.
    pub selection: SelectionState,

    /// Selection of the view a detail was opened from.
    stashed_selection: Option<SelectionState>,

    /// Catalog load progress.
    pub load: LoadState,

    /// Detail pipeline state.
    pub detail: DetailState,

    /// Status message to display.
    pub status: Option<StatusMessage>,

    pending_load: bool,
    pending_detail: Option<PokemonId>,

    /// Whether the application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the application on the home view and requests the catalog
    /// load.
    #[must_use]
    pub fn new(favorites: Favorites) -> Self {
        Self {
            route: Route::Home,
            mode: AppMode::Normal,
            search: SearchStore::default(),
            favorites,
            filter: CatalogFilter::All,
            favorites_filter: String::new(),
            selection: SelectionState::new(),
            stashed_selection: None,
            load: LoadState::Loading {
                discovered: None,
                loaded: 0,
            },
            detail: DetailState::Idle,
            status: None,
            pending_load: true,
            pending_detail: None,
            should_quit: false,
        }
    }

    /// Returns `true` once per requested catalog load.
    pub fn take_load_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_load)
    }

    /// Returns the entry whose detail should be fetched, once per request.
    pub fn take_detail_request(&mut self) -> Option<PokemonId> {
        self.pending_detail.take()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Searching => self.handle_search_key(key),
            AppMode::Filtering => self.handle_filter_key(key),
            AppMode::Help => Self::handle_help_key(key),
        }
    }

    /// Handles a mouse event: the wheel moves the selection and a left click
    /// selects the clicked row.
    #[must_use]
    pub fn handle_mouse(&self, mouse: MouseEvent) -> Action {
        if self.mode != AppMode::Normal {
            return Action::None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => Action::NextItem,
            MouseEventKind::ScrollUp => Action::PreviousItem,
            MouseEventKind::Down(MouseButton::Left) => {
                self.entry_at_row(mouse.row).map_or(Action::None, Action::SelectItem)
            }
            _ => Action::None,
        }
    }

    /// Index of the table entry drawn at screen `row`, on the list views.
    fn entry_at_row(&self, row: u16) -> Option<usize> {
        if !matches!(self.route, Route::Home | Route::List | Route::Favorites) {
            return None;
        }
        let offset = usize::from(row.checked_sub(TABLE_FIRST_ROW)?);
        if offset >= self.selection.visible_height {
            return None;
        }
        let index = self.selection.scroll_offset + offset;
        (index < self.visible_entries().len()).then_some(index)
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('j') | KeyCode::Down => Action::NextItem,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousItem,
            KeyCode::Char('g') | KeyCode::Home => Action::FirstItem,
            KeyCode::Char('G') | KeyCode::End => Action::LastItem,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Enter => Action::OpenSelected,
            KeyCode::Char('/') if self.route == Route::Favorites => Action::EnterFilterMode,
            KeyCode::Char('/') => Action::EnterSearchMode,
            KeyCode::Char('f') => Action::CycleFilter,
            KeyCode::Char(' ') => Action::ToggleFavorite,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('h') => Action::Navigate(Route::Home),
            KeyCode::Char('l') => Action::Navigate(Route::List),
            KeyCode::Char('F') => Action::Navigate(Route::Favorites),
            KeyCode::Esc
                if self.route == Route::Favorites && !self.favorites_filter.is_empty() =>
            {
                Action::ClearFilter
            }
            KeyCode::Esc if self.route == Route::Home && self.status.is_some() => {
                Action::ClearStatus
            }
            KeyCode::Esc | KeyCode::Backspace if self.route != Route::Home => Action::Back,
            _ => Action::None,
        }
    }

    fn handle_search_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ExitSearchMode,
            KeyCode::Enter => Action::CommitSearch,
            KeyCode::Backspace => {
                let mut term = self.search.term().to_owned();
                term.pop();
                Action::SetSearchTerm(term)
            }
            KeyCode::Char(c) => Action::SetSearchTerm(format!("{}{c}", self.search.term())),
            _ => Action::None,
        }
    }

    fn handle_filter_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClearFilter,
            KeyCode::Enter => Action::ExitFilterMode,
            KeyCode::Backspace => {
                let mut text = self.favorites_filter.clone();
                text.pop();
                Action::SetFavoritesFilter(text)
            }
            KeyCode::Char(c) => Action::SetFavoritesFilter(format!("{}{c}", self.favorites_filter)),
            _ => Action::None,
        }
    }

    fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    // =========================================================================
    // Background results
    // =========================================================================

    /// Applies a catalog load update.
    pub fn handle_load_update(&mut self, update: LoadUpdate) -> Action {
        match update {
            LoadUpdate::ReferencesDiscovered(total) => {
                self.load = LoadState::Loading {
                    discovered: Some(total),
                    loaded: 0,
                };
            }
            LoadUpdate::BatchLoaded {
                batch,
                batches,
                loaded,
                ..
            } => {
                debug!(batch, batches, loaded, "Catalog batch arrived");
                if let LoadState::Loading { loaded: current, .. } = &mut self.load {
                    *current = loaded;
                }
            }
            LoadUpdate::Complete(Ok(catalog)) => {
                let count = catalog.len();
                self.search.set_catalog(catalog);
                self.load = LoadState::Ready;
                self.status = Some(StatusMessage::info(format!("Loaded {count} Pokémon")));
                if !matches!(self.route, Route::Detail { .. }) {
                    self.reset_selection();
                }
                info!(count, "Catalog ready");
            }
            LoadUpdate::Complete(Err(LoadError::Cancelled)) => {
                debug!("Catalog load cancelled");
                self.load = LoadState::Idle;
            }
            LoadUpdate::Complete(Err(err)) => {
                debug!(error = %err, "Catalog load failed");
                self.status = Some(StatusMessage::error(format!("Load failed: {err}")));
                self.load = LoadState::Failed(err);
            }
        }
        Action::Render
    }

    /// Applies a detail pipeline result. Results for a view that is no
    /// longer open are dropped.
    pub fn handle_detail(
        &mut self,
        id: PokemonId,
        result: Result<Box<DetailReport>, StageFailure>,
    ) -> Action {
        if !matches!(self.route, Route::Detail { id: current, .. } if current == id) {
            debug!(id, "Dropping stale detail result");
            return Action::None;
        }

        match result {
            Ok(report) => {
                let stages = report.evolution.as_deref().unwrap_or_default();
                let current = stages.iter().position(|stage| stage.id == id);
                self.selection.reset(stages.len());
                if let Some(index) = current {
                    self.selection.select(index, stages.len());
                }
                self.detail = DetailState::Ready(report);
                Action::Render
            }
            Err(failure) if failure.error().is_some_and(LoadError::is_not_found) => {
                debug!(id, "Unknown entry");
                self.detail = DetailState::Idle;
                Action::Navigate(Route::NotFound)
            }
            Err(failure) => {
                self.status = Some(StatusMessage::error(format!("#{id}: {failure}")));
                self.detail = DetailState::Failed { id, failure };
                Action::Render
            }
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Updates the application state based on an action.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::NextItem => {
                let len = self.selection_len();
                self.selection.select_next(len);
            }
            Action::PreviousItem => {
                let len = self.selection_len();
                self.selection.select_previous(len);
            }
            Action::FirstItem => {
                let len = self.selection_len();
                self.selection.select_first(len);
            }
            Action::LastItem => {
                let len = self.selection_len();
                self.selection.select_last(len);
            }
            Action::PageDown => {
                let len = self.selection_len();
                self.selection.page_down(len);
            }
            Action::PageUp => {
                let len = self.selection_len();
                self.selection.page_up(len);
            }
            Action::SelectItem(index) => {
                let len = self.selection_len();
                self.selection.select(index, len);
            }

            Action::Navigate(route) => self.navigate(route),
            Action::Back => self.navigate(self.route.back()),
            Action::OpenSelected => self.open_selected(),

            Action::EnterSearchMode => self.mode = AppMode::Searching,
            Action::ExitSearchMode | Action::ExitFilterMode | Action::HideHelp => {
                self.mode = AppMode::Normal;
            }
            Action::SetSearchTerm(term) => self.search.set_term(term),
            Action::CommitSearch => self.commit_search(),

            Action::CycleFilter => {
                self.filter = self.filter.cycle();
                if self.route == Route::List {
                    self.reset_selection();
                }
                self.status = Some(StatusMessage::info(format!("Filter: {}", self.filter)));
            }
            Action::EnterFilterMode => {
                if self.route == Route::Favorites {
                    self.mode = AppMode::Filtering;
                }
            }
            Action::SetFavoritesFilter(text) => {
                self.favorites_filter = text;
                self.reset_selection();
            }
            Action::ClearFilter => {
                self.favorites_filter.clear();
                self.mode = AppMode::Normal;
                self.reset_selection();
            }

            Action::ToggleFavorite => self.toggle_favorite(),
            Action::Retry => self.retry(),

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::ShowStatus(text) => self.status = Some(StatusMessage::info(text)),
            Action::ClearStatus => self.status = None,

            Action::Render | Action::Tick | Action::None => {}
        }
    }

    /// Handles a tick event: expires stale status messages.
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::should_hide) {
            self.status = None;
        }
    }

    /// Recomputes the page size after a resize.
    pub fn set_terminal_size(&mut self, size: Rect) {
        let rows = usize::from(size.height.saturating_sub(CHROME_ROWS));
        self.selection.visible_height = rows;
        if let Some(stashed) = &mut self.stashed_selection {
            stashed.visible_height = rows;
        }
    }

    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!(from = %self.route, to = %route, "Navigating");

        let from_detail = matches!(self.route, Route::Detail { .. });
        let to_detail = matches!(route, Route::Detail { .. });
        let returning = from_detail && !to_detail && self.route.back() == route;

        if to_detail && !from_detail {
            self.stashed_selection = Some(self.selection.clone());
        }

        self.detail = match route {
            Route::Detail { id, .. } => {
                self.pending_detail = Some(id);
                DetailState::Loading(id)
            }
            _ => DetailState::Idle,
        };
        self.route = route;
        self.mode = AppMode::Normal;

        if to_detail {
            self.selection.reset(0);
        } else if let Some(stashed) = self.stashed_selection.take().filter(|_| returning) {
            self.selection = stashed;
            let len = self.selection_len();
            self.selection.clamp(len);
        } else {
            self.reset_selection();
        }
    }

    fn open_selected(&mut self) {
        let target = match &self.route {
            Route::Detail { id, .. } => self
                .selection
                .selected
                .and_then(|index| self.detail.evolution().get(index))
                .map(|stage| stage.id)
                .filter(|next| next != id),
            Route::NotFound => None,
            _ => self.selected_entry().map(|summary| summary.id),
        };

        if let Some(id) = target {
            self.navigate(Route::detail(id, self.route.clone()));
        }
    }

    fn commit_search(&mut self) {
        let term = self.search.term().to_owned();
        self.search.commit_search(&term);
        self.mode = AppMode::Normal;

        if let Some(route) = self.search.take_navigation() {
            self.navigate(route);
        }
        if self.route == Route::List {
            self.reset_selection();
        }

        let count = self.search.result_count();
        let text = if term.is_empty() {
            format!("Showing all {count}")
        } else {
            format!("{count} results for \"{term}\"")
        };
        self.status = Some(StatusMessage::info(text));
    }

    fn toggle_favorite(&mut self) {
        let target = match &self.route {
            Route::Detail { id, .. } => Some(*id),
            _ => self.selected_entry().map(|summary| summary.id),
        };
        let Some(id) = target else {
            return;
        };

        let now_favorite = self.favorites.toggle(id);
        let name = self.display_name(id);
        let text = if now_favorite {
            format!("Added {name} to favorites")
        } else {
            format!("Removed {name} from favorites")
        };
        self.status = Some(StatusMessage::info(text));

        if self.route == Route::Favorites {
            let len = self.selection_len();
            self.selection.clamp(len);
        }
    }

    fn retry(&mut self) {
        if matches!(self.load, LoadState::Failed(_)) {
            info!("Retrying catalog load");
            self.load = LoadState::Loading {
                discovered: None,
                loaded: 0,
            };
            self.pending_load = true;
            return;
        }

        if let (Route::Detail { id, .. }, DetailState::Failed { .. }) = (&self.route, &self.detail)
        {
            let id = *id;
            info!(id, "Retrying detail");
            self.detail = DetailState::Loading(id);
            self.pending_detail = Some(id);
        }
    }

    fn reset_selection(&mut self) {
        let len = self.selection_len();
        self.selection.reset(len);
    }

    fn selection_len(&self) -> usize {
        match self.route {
            Route::Detail { .. } => self.detail.evolution().len(),
            _ => self.visible_entries().len(),
        }
    }

    fn display_name(&self, id: PokemonId) -> String {
        self.search
            .get(id)
            .map(|summary| summary.name.clone())
            .or_else(|| {
                self.detail
                    .report()
                    .filter(|report| report.profile.summary.id == id)
                    .map(|report| report.profile.summary.name.clone())
            })
            .unwrap_or_else(|| format!("#{id}"))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entries listed by the current view, in display order.
    #[must_use]
    pub fn visible_entries(&self) -> Vec<&PokemonSummary> {
        match self.route {
            Route::Home => self.featured(),
            Route::List => self
                .search
                .results()
                .filter(|summary| self.filter.matches(summary))
                .collect(),
            Route::Favorites => self
                .favorites
                .filter_list(self.search.catalog(), &self.favorites_filter),
            Route::Detail { .. } | Route::NotFound => Vec::new(),
        }
    }

    /// [`visible_entries`](Self::visible_entries) with favorite flags.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<ListRow<'_>> {
        self.visible_entries()
            .into_iter()
            .map(|summary| ListRow {
                summary,
                favorite: self.favorites.is_favorite(summary.id),
            })
            .collect()
    }

    /// The selected row of a list view.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&PokemonSummary> {
        let index = self.selection.selected?;
        self.visible_entries().get(index).copied()
    }

    /// The highest base-stat totals, ties broken by ID.
    #[must_use]
    pub fn featured(&self) -> Vec<&PokemonSummary> {
        let mut ranked: Vec<_> = self.search.catalog().iter().collect();
        ranked.sort_by(|a, b| b.total().cmp(&a.total()).then(a.id.cmp(&b.id)));
        ranked.truncate(FEATURED_COUNT);
        ranked
    }

    /// Suggestions for the live search term.
    #[must_use]
    pub fn preview(&self) -> Vec<&PokemonSummary> {
        self.search.preview(PREVIEW_LIMIT)
    }

    /// Number of legendary entries in the catalog.
    #[must_use]
    pub fn legendary_count(&self) -> usize {
        self.search
            .catalog()
            .iter()
            .filter(|summary| summary.is_legendary)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use dex_client::{ApiError, DetailStage};
    use dex_core::{BaseStats, PokemonProfile, PokemonType, SpeciesInfo};
    use dex_store::{FAVORITES_KEY, MemoryStore};

    use super::*;

    fn mon(id: PokemonId, name: &str, ty: PokemonType, stats: [u8; 6]) -> PokemonSummary {
        let stats = BaseStats::from_positional(&stats).unwrap();
        PokemonSummary::new(id, name, [ty], stats, id == 150)
    }

    fn catalog() -> Vec<PokemonSummary> {
        vec![
            mon(1, "Bulbasaur", PokemonType::Grass, [45, 49, 49, 65, 65, 45]),
            mon(4, "Charmander", PokemonType::Fire, [39, 52, 43, 60, 50, 65]),
            mon(6, "Charizard", PokemonType::Fire, [78, 84, 78, 109, 85, 100]),
            mon(25, "Pikachu", PokemonType::Electric, [35, 55, 40, 50, 50, 90]),
            mon(143, "Snorlax", PokemonType::Normal, [160, 110, 65, 65, 110, 30]),
            mon(150, "Mewtwo", PokemonType::Psychic, [106, 110, 90, 154, 90, 130]),
        ]
    }

    fn favorites(storage: impl KeyValueStore + 'static) -> Favorites {
        let storage: Box<dyn KeyValueStore> = Box::new(storage);
        FavoritesStore::load(storage)
    }

    fn app() -> App {
        App::new(favorites(MemoryStore::new()))
    }

    fn loaded_app() -> App {
        let mut app = app();
        assert!(app.take_load_request());
        app.handle_load_update(LoadUpdate::Complete(Ok(catalog())));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        let action = app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        app.update(action);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn names(app: &App) -> Vec<&str> {
        app.visible_entries()
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    }

    fn report(id: PokemonId, chain: &[(PokemonId, &str)]) -> Box<DetailReport> {
        let summary = catalog().into_iter().find(|s| s.id == id).unwrap();
        Box::new(DetailReport {
            profile: PokemonProfile {
                summary,
                height_dm: 7,
                weight_hg: 69,
                abilities: vec!["Overgrow".to_owned()],
                species_url: format!("mock://species/{id}"),
            },
            species: Ok(SpeciesInfo {
                description: Some("A strange seed.".to_owned()),
                evolution_chain_url: "mock://chain/1".to_owned(),
            }),
            evolution: Ok(chain
                .iter()
                .map(|(id, name)| EvolutionStage {
                    id: *id,
                    name: (*name).to_owned(),
                })
                .collect()),
        })
    }

    // -------------------------------------------------------------------------
    // SelectionState
    // -------------------------------------------------------------------------

    #[test]
    fn test_selection_navigation_wraps() {
        let mut state = SelectionState::new();

        state.select_next(0);
        assert!(state.selected.is_none());

        state.select_next(5);
        assert_eq!(state.selected, Some(0));
        state.select_next(5);
        assert_eq!(state.selected, Some(1));
        state.select_last(5);
        assert_eq!(state.selected, Some(4));
        state.select_next(5);
        assert_eq!(state.selected, Some(0));
        state.select_previous(5);
        assert_eq!(state.selected, Some(4));
        state.select_first(5);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn test_selection_paging_scrolls() {
        let mut state = SelectionState::new();
        state.visible_height = 4;
        state.reset(10);

        state.page_down(10);
        assert_eq!(state.selected, Some(4));
        assert_eq!(state.scroll_offset, 1);

        state.page_down(10);
        state.page_down(10);
        assert_eq!(state.selected, Some(9));
        assert_eq!(state.scroll_offset, 6);

        state.page_up(10);
        assert_eq!(state.selected, Some(5));
        state.select_first(10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_selection_zero_height_does_not_underflow() {
        let mut state = SelectionState::new();
        state.visible_height = 0;
        state.select_last(3);
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.scroll_offset, 2);
    }

    #[test]
    fn test_selection_clamp() {
        let mut state = SelectionState::new();
        state.select(7, 8);
        state.clamp(3);
        assert_eq!(state.selected, Some(2));
        state.clamp(0);
        assert_eq!(state.selected, None);
    }

    // -------------------------------------------------------------------------
    // Catalog load
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_app_requests_load_once() {
        let mut app = app();
        assert!(app.load.is_loading());
        assert!(app.take_load_request());
        assert!(!app.take_load_request());
        assert_eq!(app.route, Route::Home);
    }

    #[test]
    fn test_load_progress() {
        let mut app = app();
        assert_eq!(app.load.progress_percent(), 0);

        app.handle_load_update(LoadUpdate::ReferencesDiscovered(120));
        assert_eq!(app.load.progress_percent(), 0);

        app.handle_load_update(LoadUpdate::BatchLoaded {
            batch: 1,
            batches: 3,
            size: 50,
            loaded: 50,
        });
        assert_eq!(
            app.load,
            LoadState::Loading {
                discovered: Some(120),
                loaded: 50
            }
        );
        assert_eq!(app.load.progress_percent(), 41);

        app.handle_load_update(LoadUpdate::Complete(Ok(catalog())));
        assert_eq!(app.load, LoadState::Ready);
        assert_eq!(app.load.progress_percent(), 100);
        assert_eq!(app.search.catalog().len(), 6);
        assert_eq!(app.legendary_count(), 1);
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let mut app = app();
        assert!(app.take_load_request());

        let err = LoadError::Api(ApiError::status("mock://index", 503));
        app.handle_load_update(LoadUpdate::Complete(Err(err.clone())));
        assert_eq!(app.load, LoadState::Failed(err));
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(!app.take_load_request());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.load.is_loading());
        assert!(app.take_load_request());
    }

    #[test]
    fn test_cancelled_load_goes_idle() {
        let mut app = app();
        app.handle_load_update(LoadUpdate::Complete(Err(LoadError::Cancelled)));
        assert_eq!(app.load, LoadState::Idle);
        assert!(app.status.is_none());
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    #[test]
    fn test_home_features_top_three_totals() {
        let app = loaded_app();
        assert_eq!(names(&app), vec!["Mewtwo", "Snorlax", "Charizard"]);
        assert_eq!(app.selection.selected, Some(0));
    }

    #[test]
    fn test_search_commit_navigates_to_list() {
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Searching);

        type_text(&mut app, "char");
        assert_eq!(app.search.term(), "char");
        assert_eq!(app.preview().len(), 2);
        assert_eq!(app.route, Route::Home);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.route, Route::List);
        assert_eq!(names(&app), vec!["Charmander", "Charizard"]);
        assert_eq!(app.selection.selected, Some(0));
    }

    #[test]
    fn test_empty_commit_keeps_view() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.search.result_count(), 6);
    }

    #[test]
    fn test_search_escape_does_not_commit() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "pika");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search.term(), "pik");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search.result_count(), 6);
    }

    #[test]
    fn test_cycle_filter_narrows_list() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(names(&app).len(), 6);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter, CatalogFilter::Type(PokemonType::Normal));
        assert_eq!(names(&app), vec!["Snorlax"]);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(names(&app), vec!["Charmander", "Charizard"]);

        app.filter = CatalogFilter::Legendary;
        assert_eq!(names(&app), vec!["Mewtwo"]);
    }

    #[test]
    fn test_back_from_list_goes_home() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Home);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Home);
    }

    // -------------------------------------------------------------------------
    // Detail
    // -------------------------------------------------------------------------

    #[test]
    fn test_open_detail_and_return_restores_selection() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route, Route::detail(6, Route::List));
        assert_eq!(app.detail, DetailState::Loading(6));
        assert_eq!(app.take_detail_request(), Some(6));
        assert_eq!(app.take_detail_request(), None);

        let action = app.handle_detail(6, Ok(report(6, &[(4, "Charmander"), (6, "Charizard")])));
        app.update(action);
        assert!(app.detail.report().is_some());
        assert_eq!(app.selection.selected, Some(1));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::List);
        assert_eq!(app.detail, DetailState::Idle);
        assert_eq!(app.selected_entry().map(|s| s.id), Some(6));
    }

    #[test]
    fn test_evolution_link_keeps_outer_origin() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.take_detail_request(), Some(1));

        let chain = [(1, "Bulbasaur"), (2, "Ivysaur"), (3, "Venusaur")];
        app.handle_detail(1, Ok(report(1, &chain)));
        assert_eq!(app.selection.selected, Some(0));

        // Enter on the current stage stays put.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.take_detail_request(), None);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::detail(2, Route::List));
        assert_eq!(app.take_detail_request(), Some(2));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_stale_detail_result_is_dropped() {
        let mut app = loaded_app();
        app.update(Action::Navigate(Route::detail(25, Route::Home)));

        let action = app.handle_detail(4, Ok(report(4, &[])));
        assert_eq!(action, Action::None);
        assert_eq!(app.detail, DetailState::Loading(25));
    }

    #[test]
    fn test_unknown_id_shows_not_found() {
        let mut app = loaded_app();
        app.update(Action::Navigate(Route::detail(9999, Route::Home)));

        let failure = StageFailure::failed(
            DetailStage::Entity,
            ApiError::status("mock://pokemon/9999", 404),
        );
        let action = app.handle_detail(9999, Err(failure));
        assert_eq!(action, Action::Navigate(Route::NotFound));
        app.update(action);
        assert_eq!(app.route, Route::NotFound);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Home);
    }

    #[test]
    fn test_failed_detail_can_be_retried() {
        let mut app = loaded_app();
        app.update(Action::Navigate(Route::detail(25, Route::Home)));
        assert_eq!(app.take_detail_request(), Some(25));

        let failure = StageFailure::failed(
            DetailStage::Entity,
            ApiError::transport("mock://pokemon/25", "connection reset"),
        );
        app.handle_detail(25, Err(failure));
        assert!(matches!(app.detail, DetailState::Failed { id: 25, .. }));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.detail, DetailState::Loading(25));
        assert_eq!(app.take_detail_request(), Some(25));
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    #[test]
    fn test_toggle_favorite_from_list_and_detail() {
        let storage: &'static MemoryStore = Box::leak(Box::new(MemoryStore::new()));
        let mut app = App::new(favorites(storage));
        app.handle_load_update(LoadUpdate::Complete(Ok(catalog())));

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.favorites.is_favorite(1));
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("Added Bulbasaur to favorites")
        );

        app.update(Action::Navigate(Route::detail(25, Route::List)));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.favorites.is_favorite(25));
        assert_eq!(
            storage.get(FAVORITES_KEY).unwrap().as_deref(),
            Some("[1,25]")
        );

        press(&mut app, KeyCode::Char('F'));
        assert_eq!(names(&app), vec!["Bulbasaur", "Pikachu"]);
        assert!(app.visible_rows().iter().all(|row| row.favorite));
    }

    #[test]
    fn test_unfavorite_in_favorites_view_clamps_selection() {
        let mut app = App::new(favorites(MemoryStore::with_entry(FAVORITES_KEY, "[4,6]")));
        app.handle_load_update(LoadUpdate::Complete(Ok(catalog())));

        press(&mut app, KeyCode::Char('F'));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.selected_entry().map(|s| s.id), Some(6));

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(names(&app), vec!["Charmander"]);
        assert_eq!(app.selection.selected, Some(0));
    }

    #[test]
    fn test_favorites_name_filter() {
        let mut app = App::new(favorites(MemoryStore::with_entry(FAVORITES_KEY, "[1,4,25]")));
        app.handle_load_update(LoadUpdate::Complete(Ok(catalog())));
        press(&mut app, KeyCode::Char('F'));

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Filtering);
        type_text(&mut app, "CHAR");
        assert_eq!(names(&app), vec!["Charmander"]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.favorites_filter, "CHAR");

        // Esc clears the filter before leaving the view.
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Favorites);
        assert_eq!(names(&app).len(), 3);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Home);
    }

    // -------------------------------------------------------------------------
    // Modes
    // -------------------------------------------------------------------------

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Action::Quit);

        app.mode = AppMode::Searching;
        assert_eq!(app.handle_key(ctrl_c), Action::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::SetSearchTerm("q".to_owned())
        );

        app.mode = AppMode::Normal;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.route, Route::Home);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_mouse_wheel_moves_selection() {
        let mut app = loaded_app();
        let scroll = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        let action = app.handle_mouse(scroll(MouseEventKind::ScrollDown));
        assert_eq!(action, Action::NextItem);
        app.update(action);
        assert_eq!(app.selection.selected, Some(1));

        app.mode = AppMode::Help;
        assert_eq!(app.handle_mouse(scroll(MouseEventKind::ScrollUp)), Action::None);
    }

    #[test]
    fn test_click_selects_row() {
        let mut app = loaded_app();
        app.update(Action::Navigate(Route::List));
        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        };

        let action = app.handle_mouse(click(TABLE_FIRST_ROW + 2));
        assert_eq!(action, Action::SelectItem(2));
        app.update(action);
        assert_eq!(app.selection.selected, Some(2));

        // Chrome rows and rows past the last entry select nothing.
        assert_eq!(app.handle_mouse(click(1)), Action::None);
        let past_end = u16::try_from(app.visible_entries().len()).unwrap() + TABLE_FIRST_ROW;
        assert_eq!(app.handle_mouse(click(past_end)), Action::None);
    }

    #[test]
    fn test_esc_on_home_dismisses_status() {
        let mut app = app();
        app.update(Action::ShowStatus("hello".to_owned()));

        press(&mut app, KeyCode::Esc);
        assert!(app.status.is_none());
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), Action::None);
    }

    #[test]
    fn test_status_message() {
        let msg = StatusMessage::info("Loaded");
        assert!(!msg.is_error);
        assert!(!msg.should_hide());
        assert!(StatusMessage::error("boom").is_error);

        let mut app = app();
        app.update(Action::ShowStatus("hello".to_owned()));
        app.tick();
        assert!(app.status.is_some());
        app.update(Action::ClearStatus);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_resize_sets_page_size() {
        let mut app = app();
        app.set_terminal_size(Rect::new(0, 0, 80, 30));
        assert_eq!(app.selection.visible_height, 22);
        app.set_terminal_size(Rect::new(0, 0, 80, 4));
        assert_eq!(app.selection.visible_height, 0);
    }
}
