//! Static legendary classification.

use crate::hash::{FxHashSet, fx_hash_set};
use crate::types::PokemonId;

/// Legendary and mythical IDs from the first three generations.
///
/// This list is incomplete; extend it through `catalog.legendary_ids` rather
/// than editing it.
pub const DEFAULT_LEGENDARY_IDS: [PokemonId; 21] = [
    144, 145, 146, 150, 151, // Gen 1
    243, 244, 245, 249, 250, 251, // Gen 2
    377, 378, 379, 380, 381, 382, 383, 384, 385, 386, // Gen 3
];

/// Membership set deciding the `is_legendary` flag.
///
/// Classification is by ID alone; stats play no part.
///
/// # Examples
///
/// ```
/// use dex_core::LegendaryRegistry;
///
/// let registry = LegendaryRegistry::default();
/// assert!(registry.contains(150));
/// assert!(!registry.contains(1));
///
/// let custom = LegendaryRegistry::new([1, 4, 7]);
/// assert!(custom.contains(1));
/// assert!(!custom.contains(150));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendaryRegistry {
    ids: FxHashSet<PokemonId>,
}

impl LegendaryRegistry {
    /// Builds a registry from an arbitrary ID list.
    pub fn new(ids: impl IntoIterator<Item = PokemonId>) -> Self {
        let mut set = fx_hash_set();
        set.extend(ids);
        Self { ids: set }
    }

    /// Returns `true` if `id` is classified as legendary.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: PokemonId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of registered IDs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no ID is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for LegendaryRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LEGENDARY_IDS)
    }
}
