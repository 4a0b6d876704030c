//! Search predicate and catalog filters shared by the stores and views.

use std::fmt;

use crate::types::{PokemonSummary, PokemonType};

/// Returns `true` if `term` occurs, ignoring case, in the entry's name or in
/// any of its type labels.
///
/// An empty term matches everything.
///
/// # Examples
///
/// ```
/// use dex_core::{BaseStats, PokemonSummary, PokemonType, matches_search};
///
/// let mon = PokemonSummary::new(
///     6, "Charizard", [PokemonType::Fire, PokemonType::Flying], BaseStats::default(), false,
/// );
/// assert!(matches_search(&mon, "IZA"));
/// assert!(matches_search(&mon, "fly"));
/// assert!(!matches_search(&mon, "water"));
/// ```
#[must_use]
pub fn matches_search(summary: &PokemonSummary, term: &str) -> bool {
    let needle = term.to_lowercase();
    matches_lowercase(summary, &needle)
}

/// Same as [`matches_search`] with a needle that is already lowercase.
///
/// Lets callers filtering a whole catalog lowercase the term once.
#[must_use]
pub fn matches_lowercase(summary: &PokemonSummary, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    summary.name.to_lowercase().contains(needle)
        || summary
            .types
            .iter()
            .any(|ty| ty.label().to_lowercase().contains(needle))
}

/// Narrowing applied on top of search results in the list view.
///
/// # Examples
///
/// ```
/// use dex_core::{CatalogFilter, PokemonType};
///
/// let filter = CatalogFilter::All.cycle();
/// assert_eq!(filter, CatalogFilter::Type(PokemonType::Normal));
/// assert_eq!(CatalogFilter::Type(PokemonType::Fairy).cycle(), CatalogFilter::Legendary);
/// assert_eq!(CatalogFilter::Legendary.cycle(), CatalogFilter::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogFilter {
    /// Everything.
    #[default]
    All,
    /// Entries with this type in either slot.
    Type(PokemonType),
    /// Entries flagged legendary.
    Legendary,
}

impl CatalogFilter {
    /// Returns `true` if the entry passes this filter.
    #[must_use]
    pub fn matches(self, summary: &PokemonSummary) -> bool {
        match self {
            Self::All => true,
            Self::Type(ty) => summary.has_type(ty),
            Self::Legendary => summary.is_legendary,
        }
    }

    /// Advances to the next filter: `All`, then each type in canonical order,
    /// then `Legendary`, then back to `All`.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Type(PokemonType::ALL[0]),
            Self::Type(ty) => ty.next().map_or(Self::Legendary, Self::Type),
            Self::Legendary => Self::All,
        }
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Type(ty) => f.write_str(ty.label()),
            Self::Legendary => f.write_str("Legendary"),
        }
    }
}
