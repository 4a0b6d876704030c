//! Terminal user interface for browsing the Pokédex.
//!
//! The TUI runs on a single tokio event loop. Terminal input, timers and
//! background results (catalog load progress, detail fetches) all arrive
//! through one channel as [`Event`]s, are turned into [`Action`]s, and are
//! applied to the [`App`] state before the next frame is drawn.
//!
//! # Architecture
//!
//! ```text
//! crates/dex-tui/src/
//!   lib.rs           # Public API exports and the event loop
//!   app.rs           # Application state, routing, key handling
//!   event.rs         # Event types (Key, Mouse, Catalog, DetailLoaded, Tick, Render)
//!   tui.rs           # Terminal wrapper with async event streaming
//!   tasks.rs         # Spawned catalog load and detail fetches
//!   action.rs        # User actions (commands from key bindings)
//!   ui.rs            # Main layout rendering orchestration
//!   theme.rs         # Color schemes and type colors
//!   error.rs         # TUI-specific error types
//!   components/
//!     pokemon_list.rs  # PokemonTable for home, list and favorites
//!     detail_pane.rs   # DetailPane with stats and evolution chain
//!     catalog_panel.rs # CatalogPanel with load progress
//!     header.rs        # HeaderBar component
//!     status_bar.rs    # StatusBar component
//!     help.rs          # HelpPanel modal overlay
//!     search_input.rs  # Search / filter input overlay
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dex_client::PokeApiClient;
//! use dex_core::Config;
//! use dex_store::{FavoritesStore, JsonFileStore, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let config = Config::default();
//!     let api = PokeApiClient::new(&config.api)?;
//!     let storage: Box<dyn KeyValueStore> = Box::new(JsonFileStore::in_data_dir()?);
//!     dex_tui::run(&config, api, FavoritesStore::load(storage)).await?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod error;
pub mod event;
pub mod tasks;
pub mod theme;
pub mod tui;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use dex_client::{CatalogLoader, DetailPipeline, PokeApi};
use dex_core::{Config, LegendaryRegistry};
use ratatui::layout::Rect;
use tracing::{debug, info};

// Public re-exports
pub use action::Action;
pub use app::{
    App, AppMode, DetailState, Favorites, ListRow, LoadState, SelectionState, StatusMessage,
};
pub use error::TuiError;
pub use event::Event;
pub use tasks::BackgroundTasks;
pub use theme::Theme;
pub use tui::Tui;

/// Runs the TUI until the user quits.
///
/// 1. Builds the catalog loader and detail pipeline over `api`
/// 2. Enters the terminal
/// 3. Runs the event loop; the catalog load starts on the first iteration
/// 4. Cancels background work and restores the terminal
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or restored, if
/// drawing fails, or if the event channel closes unexpectedly.
pub async fn run<A: PokeApi + 'static>(
    config: &Config,
    api: A,
    favorites: Favorites,
) -> Result<(), TuiError> {
    let api = Arc::new(api);
    let registry = Arc::new(LegendaryRegistry::new(
        config.catalog.legendary_ids.iter().copied(),
    ));
    let loader: CatalogLoader<A> = CatalogLoader::new(Arc::clone(&api), Arc::clone(&registry), &config.api);
    let pipeline = DetailPipeline::new(api, registry);

    let mut tui = Tui::new(Duration::from_millis(config.tui.tick_rate_ms))?
        .with_frame_rate(config.tui.frame_rate);
    let mut tasks = BackgroundTasks::new(loader, pipeline, tui.event_sender());
    let mut app = App::new(favorites);
    let theme = Theme::from_scheme(config.tui.color_scheme);

    tui.enter()?;
    let size = tui.size()?;
    app.set_terminal_size(Rect::new(0, 0, size.width, size.height));

    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &mut tasks, &theme).await;

    tasks.shutdown();
    tui.exit()?;

    result
}

async fn run_event_loop<A: PokeApi + 'static>(
    tui: &mut Tui,
    app: &mut App,
    tasks: &mut BackgroundTasks<A>,
    theme: &Theme,
) -> Result<(), TuiError> {
    loop {
        if app.take_load_request() {
            debug!("Starting catalog load");
            tasks.start_load();
        }
        if let Some(id) = app.take_detail_request() {
            tasks.fetch_detail(id);
        }

        tui.draw(|frame| ui::render(app, frame, theme))?;

        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize { width, height } => {
                app.set_terminal_size(Rect::new(0, 0, width, height));
                Action::Render
            }
            Event::Catalog(update) => app.handle_load_update(update),
            Event::DetailLoaded { id, result } => app.handle_detail(id, result),
            Event::Tick => {
                app.tick();
                Action::None
            }
            Event::Render => Action::Render,
            Event::FocusGained | Event::FocusLost => Action::None,
        };

        app.update(action);

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}
