//! Live and committed search over the in-memory catalog.

use dex_core::filter::matches_lowercase;
use dex_core::{PokemonSummary, Route};
use tracing::debug;

/// Owns the search term and the filtered view of the catalog.
///
/// Typing updates the live term only ([`set_term`](Self::set_term)), which
/// feeds the suggestion preview. Committing ([`commit_search`](Self::commit_search))
/// recomputes the results and asks for navigation to the list view.
///
/// Results are kept as catalog indices, so they always follow catalog
/// order.
///
/// # Examples
///
/// ```
/// use dex_core::{BaseStats, PokemonSummary, PokemonType, Route};
/// use dex_store::SearchStore;
///
/// let catalog = vec![
///     PokemonSummary::new(4, "Charmander", [PokemonType::Fire], BaseStats::default(), false),
///     PokemonSummary::new(7, "Squirtle", [PokemonType::Water], BaseStats::default(), false),
/// ];
/// let mut search = SearchStore::new(catalog);
///
/// search.commit_search("fire");
/// assert_eq!(search.result_count(), 1);
/// assert_eq!(search.take_navigation(), Some(Route::List));
/// assert_eq!(search.take_navigation(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStore {
    catalog: Vec<PokemonSummary>,
    term: String,
    committed: String,
    results: Vec<usize>,
    searching: bool,
    pending_navigation: Option<Route>,
}

impl SearchStore {
    /// Creates a store whose results are the entire catalog.
    pub fn new(catalog: Vec<PokemonSummary>) -> Self {
        let results = (0..catalog.len()).collect();
        Self {
            catalog,
            results,
            ..Self::default()
        }
    }

    /// Replaces the catalog and re-applies the committed term.
    pub fn set_catalog(&mut self, catalog: Vec<PokemonSummary>) {
        self.catalog = catalog;
        self.results = self.filter(&self.committed.to_lowercase());
        debug!(
            catalog = self.catalog.len(),
            results = self.results.len(),
            "Search catalog replaced"
        );
    }

    /// Updates the live term without touching committed results.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Up to `limit` catalog entries matching the live term, in catalog
    /// order. Empty when the live term is empty.
    pub fn preview(&self, limit: usize) -> Vec<&PokemonSummary> {
        if self.term.is_empty() {
            return Vec::new();
        }
        let needle = self.term.to_lowercase();
        self.catalog
            .iter()
            .filter(|summary| matches_lowercase(summary, &needle))
            .take(limit)
            .collect()
    }

    /// Finalizes `term`: recomputes the results and requests navigation to
    /// [`Route::List`].
    ///
    /// An empty term resets the results to the entire catalog and requests no
    /// navigation. Any other term is matched as typed, whitespace included.
    pub fn commit_search(&mut self, term: &str) {
        self.searching = true;
        self.term = term.to_owned();
        self.committed = term.to_owned();

        let needle = self.committed.to_lowercase();
        self.results = self.filter(&needle);

        self.searching = false;
        if !needle.is_empty() {
            self.pending_navigation = Some(Route::List);
        }
        debug!(term = %self.committed, results = self.results.len(), "Search committed");
    }

    /// Consumes the pending navigation request, if any.
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.pending_navigation.take()
    }

    /// Committed results in catalog order.
    pub fn results(&self) -> impl ExactSizeIterator<Item = &PokemonSummary> + Clone + '_ {
        self.results.iter().map(|&idx| &self.catalog[idx])
    }

    /// Number of committed results.
    #[inline]
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// The full catalog.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &[PokemonSummary] {
        &self.catalog
    }

    /// Looks up a catalog entry by ID.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&PokemonSummary> {
        self.catalog.iter().find(|summary| summary.id == id)
    }

    /// The live term.
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The last committed term.
    #[inline]
    #[must_use]
    pub fn committed_term(&self) -> &str {
        &self.committed
    }

    /// Returns `true` while a commit is being computed.
    #[inline]
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    fn filter(&self, needle: &str) -> Vec<usize> {
        self.catalog
            .iter()
            .enumerate()
            .filter(|(_, summary)| matches_lowercase(summary, needle))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use dex_core::{BaseStats, PokemonType, matches_search};

    use super::*;

    fn catalog() -> Vec<PokemonSummary> {
        let mon = |id, name: &str, types: &[PokemonType]| {
            PokemonSummary::new(id, name, types.iter().copied(), BaseStats::default(), false)
        };
        vec![
            mon(1, "Bulbasaur", &[PokemonType::Grass, PokemonType::Poison]),
            mon(4, "Charmander", &[PokemonType::Fire]),
            mon(6, "Charizard", &[PokemonType::Fire, PokemonType::Flying]),
            mon(16, "Pidgey", &[PokemonType::Normal, PokemonType::Flying]),
            mon(25, "Pikachu", &[PokemonType::Electric]),
            mon(92, "Gastly", &[PokemonType::Ghost, PokemonType::Poison]),
        ]
    }

    fn ids(store: &SearchStore) -> Vec<u32> {
        store.results().map(|s| s.id).collect()
    }

    #[test]
    fn test_new_shows_everything() {
        let store = SearchStore::new(catalog());
        assert_eq!(ids(&store), vec![1, 4, 6, 16, 25, 92]);
        assert!(!store.is_searching());
    }

    #[test]
    fn test_empty_commit_resets_to_catalog_in_order() {
        let mut store = SearchStore::new(catalog());
        store.commit_search("char");
        let _ = store.take_navigation();

        store.commit_search("");
        assert_eq!(ids(&store), vec![1, 4, 6, 16, 25, 92]);
        assert_eq!(store.take_navigation(), None);

        store.commit_search("   ");
        assert_eq!(store.result_count(), 0);
        assert_eq!(store.take_navigation(), Some(Route::List));
    }

    #[test]
    fn test_padded_term_matches_raw_substring() {
        let mon = |id, name: &str, kind| {
            PokemonSummary::new(id, name, [kind], BaseStats::default(), false)
        };
        let mut store = SearchStore::new(vec![
            mon(4, "Charmander", PokemonType::Fire),
            mon(7, "Squirtle", PokemonType::Water),
        ]);

        store.commit_search(" ");
        assert!(ids(&store).is_empty());
        assert_eq!(store.take_navigation(), Some(Route::List));

        store.commit_search(" char");
        assert!(ids(&store).is_empty());
        assert_eq!(store.committed_term(), " char");

        store.set_term("char ");
        assert!(store.preview(5).is_empty());
        store.set_term("char");
        assert_eq!(store.preview(5).len(), 1);
    }

    #[test]
    fn test_results_are_exactly_the_matches() {
        let catalog = catalog();
        for term in ["char", "POISON", "fly", "a", "zz", "ik", "e"] {
            let mut store = SearchStore::new(catalog.clone());
            store.commit_search(term);

            let got = ids(&store);
            let expected: Vec<_> = catalog
                .iter()
                .filter(|s| matches_search(s, term))
                .map(|s| s.id)
                .collect();
            assert_eq!(got, expected, "term {term:?}");
            assert!(store.results().all(|s| matches_search(s, term)));
        }
    }

    #[test]
    fn test_type_match() {
        let mut store = SearchStore::new(catalog());
        store.commit_search("Poison");
        assert_eq!(ids(&store), vec![1, 92]);
    }

    #[test]
    fn test_commit_requests_list_navigation() {
        let mut store = SearchStore::new(catalog());
        store.commit_search("pika");
        assert_eq!(store.committed_term(), "pika");
        assert_eq!(store.take_navigation(), Some(Route::List));
        assert_eq!(store.take_navigation(), None);
    }

    #[test]
    fn test_set_term_does_not_commit() {
        let mut store = SearchStore::new(catalog());
        store.set_term("pika");
        assert_eq!(store.term(), "pika");
        assert_eq!(store.result_count(), 6);
        assert_eq!(store.take_navigation(), None);
    }

    #[test]
    fn test_preview_limits_live_matches() {
        let mut store = SearchStore::new(catalog());
        store.set_term("a");
        let preview: Vec<_> = store.preview(3).iter().map(|s| s.id).collect();
        assert_eq!(preview, vec![1, 4, 6]);

        store.set_term("");
        assert!(store.preview(5).is_empty());
    }

    #[test]
    fn test_set_catalog_reapplies_committed_term() {
        let mut store = SearchStore::new(Vec::new());
        store.commit_search("fire");
        assert_eq!(store.result_count(), 0);

        store.set_catalog(catalog());
        assert_eq!(ids(&store), vec![4, 6]);
    }

    #[test]
    fn test_get_by_id() {
        let store = SearchStore::new(catalog());
        assert_eq!(store.get(25).map(|s| s.name.as_str()), Some("Pikachu"));
        assert!(store.get(151).is_none());
    }
}
