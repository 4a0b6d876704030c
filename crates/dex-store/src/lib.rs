//! Favorites and search state containers.
//!
//! Both stores are plain owned values handed to whoever needs them; nothing
//! here is global.
//!
//! - [`FavoritesStore`]: the favorite ID set, persisted through a
//!   [`KeyValueStore`] on every change
//! - [`SearchStore`]: live term, committed results, and the navigation
//!   request raised by a commit
//! - [`JsonFileStore`] / [`MemoryStore`]: storage backends
//!
//! The two stores are independent of each other and of the catalog loader.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod favorites;
mod search;
mod storage;

pub use error::StorageError;
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use search::SearchStore;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, default_favorites_path};
