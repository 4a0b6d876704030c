//! Fast hash map and hash set type aliases.
//!
//! Pokémon IDs and type keys are small integers, where the Fx hash from
//! `rustc-hash` is considerably cheaper than SipHash. Nothing here is exposed
//! to untrusted keys, so denial-of-service resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use dex_core::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
//!
//! let mut map: FxHashMap<u32, &str> = fx_hash_map();
//! map.insert(25, "Pikachu");
//!
//! let set: FxHashSet<u32> = fx_hash_set();
//! assert!(set.is_empty());
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// The hasher used by [`FxHashMap`] and [`FxHashSet`].
pub type FxBuildHasher = rustc_hash::FxBuildHasher;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}
