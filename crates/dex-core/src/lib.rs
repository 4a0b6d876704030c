//! Core types, errors, and utilities for the pokedex workspace.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for consistent error handling
//! - Configuration structures
//! - Domain types (`PokemonSummary`, `PokemonType`, `BaseStats`, `Route`)
//! - The [`LegendaryRegistry`] used to flag legendary entries
//! - The shared search predicate and [`CatalogFilter`]
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)
//!
//! # Crate Dependencies
//!
//! ```text
//! dex-cli ──► dex-tui ──► dex-client ──► dex-core
//!                     └─► dex-store ───►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod hash;
pub mod legendary;
pub mod text;
pub mod types;

pub use config::{ApiConfig, CatalogConfig, ColorScheme, Config, StorageConfig, TuiConfig};
pub use error::ConfigError;
pub use filter::{CatalogFilter, matches_search};
pub use hash::{FxBuildHasher, FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use legendary::{DEFAULT_LEGENDARY_IDS, LegendaryRegistry};
pub use text::capitalize;
pub use types::{
    BaseStats, EvolutionStage, PokemonId, PokemonProfile, PokemonSummary, PokemonType, Route,
    SpeciesInfo, TypeSlots, UnknownType,
};
