//! Domain types for the pokedex tool.
//!
//! # Module Organization
//!
//! - [`pokemon_type`] - The 18-value type enumeration
//! - [`stats`] - Base stat block
//! - [`summary`] - Catalog entries
//! - [`detail`] - Detail-view records (profile, species, evolution)
//! - [`route`] - Logical views of the application
//!
//! All public types are re-exported at this module level and at the crate
//! root:
//!
//! ```
//! use dex_core::{BaseStats, PokemonSummary, PokemonType, Route};
//! ```

mod detail;
mod pokemon_type;
mod route;
mod stats;
mod summary;

pub use detail::{EvolutionStage, PokemonProfile, SpeciesInfo};
pub use pokemon_type::{PokemonType, UnknownType};
pub use route::Route;
pub use stats::BaseStats;
pub use summary::{PokemonSummary, TypeSlots};

/// Stable external identifier of a Pokémon, as assigned by the API.
pub type PokemonId = u32;
