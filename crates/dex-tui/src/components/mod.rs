//! UI components for the TUI.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): `HeaderBar`, `CatalogPanel`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): selection/scroll state -
//!   `PokemonTable`, `DetailPane`
//! - **Overlays**: `HelpPanel`, `SearchInput`

mod catalog_panel;
mod detail_pane;
mod header;
mod help;
mod pokemon_list;
mod search_input;
mod status_bar;

pub use catalog_panel::CatalogPanel;
pub use detail_pane::DetailPane;
pub use header::HeaderBar;
pub use help::HelpPanel;
pub use pokemon_list::{PokemonTable, truncate_to_width, type_badges};
pub use search_input::SearchInput;
pub use status_bar::StatusBar;
