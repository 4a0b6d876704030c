//! The persisted favorite set.

use dex_core::{FxHashSet, PokemonId, PokemonSummary, fx_hash_set};
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

/// Storage key holding the favorite IDs as a JSON array of integers.
pub const FAVORITES_KEY: &str = "pokemonFavorites";

/// Single source of truth for "is this entry a favorite".
///
/// The set is read once at construction. Every mutation rewrites the whole
/// set to storage; a failed write is logged and the in-memory set stays
/// authoritative.
///
/// # Examples
///
/// ```
/// use dex_store::{FavoritesStore, MemoryStore};
///
/// let mut favorites = FavoritesStore::load(MemoryStore::new());
/// assert!(favorites.toggle(25));
/// assert!(favorites.is_favorite(25));
/// assert!(!favorites.toggle(25));
/// assert!(favorites.is_empty());
/// ```
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    ids: FxHashSet<PokemonId>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Restores the set from `storage`.
    ///
    /// Absent, unreadable, or malformed data yields an empty set.
    pub fn load(storage: S) -> Self {
        let ids = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => parse_ids(&raw),
            Ok(None) => fx_hash_set(),
            Err(err) => {
                warn!(error = %err, "Could not read favorites, starting empty");
                fx_hash_set()
            }
        };
        debug!(count = ids.len(), "Loaded favorites");
        Self { storage, ids }
    }

    /// Adds `id` if absent, removes it if present, and persists the result.
    ///
    /// Returns the new membership of `id`.
    pub fn toggle(&mut self, id: PokemonId) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        debug!(id, favorite = now_favorite, "Toggled favorite");
        self.persist();
        now_favorite
    }

    /// Removes every favorite and persists the empty set.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    /// Returns `true` if `id` is a favorite.
    #[inline]
    #[must_use]
    pub fn is_favorite(&self, id: PokemonId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorite IDs in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<PokemonId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of favorites.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if there are no favorites.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Catalog entries that are favorites, in catalog order.
    ///
    /// Favorite IDs missing from `catalog` are skipped.
    pub fn list<'a>(&self, catalog: &'a [PokemonSummary]) -> Vec<&'a PokemonSummary> {
        catalog
            .iter()
            .filter(|summary| self.is_favorite(summary.id))
            .collect()
    }

    /// [`list`](Self::list) narrowed to names containing `term`, ignoring
    /// case.
    pub fn filter_list<'a>(
        &self,
        catalog: &'a [PokemonSummary],
        term: &str,
    ) -> Vec<&'a PokemonSummary> {
        let needle = term.trim().to_lowercase();
        catalog
            .iter()
            .filter(|summary| self.is_favorite(summary.id))
            .filter(|summary| needle.is_empty() || summary.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn persist(&self) {
        let body = match serde_json::to_string(&self.ids()) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "Could not encode favorites");
                return;
            }
        };
        if let Err(err) = self.storage.set(FAVORITES_KEY, &body) {
            warn!(error = %err, count = self.ids.len(), "Could not save favorites");
        }
    }
}

fn parse_ids(raw: &str) -> FxHashSet<PokemonId> {
    match serde_json::from_str::<Vec<PokemonId>>(raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(err) => {
            warn!(error = %err, "Stored favorites are malformed, starting empty");
            fx_hash_set()
        }
    }
}
