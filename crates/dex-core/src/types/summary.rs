//! Catalog entries.

use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;

use super::{BaseStats, PokemonId, PokemonType};

/// Type slots of a Pokémon: one or two types, stored inline.
pub type TypeSlots = SmallVec<[PokemonType; 2]>;

/// A normalized catalog entry.
///
/// Records are produced once by the catalog loader and never mutated by the
/// views. `total` is derived from [`stats`](Self::stats) and has no setter;
/// it is still written out when serializing so JSON output carries it.
///
/// # Examples
///
/// ```
/// use dex_core::{BaseStats, PokemonSummary, PokemonType};
///
/// let pikachu = PokemonSummary::new(
///     25,
///     "Pikachu",
///     [PokemonType::Electric],
///     BaseStats::from_positional(&[35, 55, 40, 50, 50, 90]).unwrap(),
///     false,
/// );
/// assert_eq!(pikachu.total(), 320);
/// assert!(pikachu.has_type(PokemonType::Electric));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct PokemonSummary {
    /// Stable external identifier.
    pub id: PokemonId,
    /// Display name, first character upper-cased.
    pub name: String,
    /// One or two types in slot order.
    pub types: TypeSlots,
    /// Base stats.
    pub stats: BaseStats,
    /// Whether the ID is in the legendary registry.
    pub is_legendary: bool,
}

impl PokemonSummary {
    /// Creates a catalog entry.
    pub fn new(
        id: PokemonId,
        name: impl Into<String>,
        types: impl IntoIterator<Item = PokemonType>,
        stats: BaseStats,
        is_legendary: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            types: types.into_iter().collect(),
            stats,
            is_legendary,
        }
    }

    /// Sum of the base stats.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u16 {
        self.stats.total()
    }

    /// Returns `true` if either slot holds `ty`.
    #[inline]
    #[must_use]
    pub fn has_type(&self, ty: PokemonType) -> bool {
        self.types.contains(&ty)
    }

    /// Type labels joined with `/`, e.g. `"Grass/Poison"`.
    #[must_use]
    pub fn type_labels(&self) -> String {
        self.types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Serialize for PokemonSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("PokemonSummary", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("types", &self.types)?;
        state.serialize_field("stats", &self.stats)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("is_legendary", &self.is_legendary)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur() -> PokemonSummary {
        PokemonSummary::new(
            1,
            "Bulbasaur",
            [PokemonType::Grass, PokemonType::Poison],
            BaseStats::from_positional(&[45, 49, 49, 65, 65, 45]).unwrap(),
            false,
        )
    }

    #[test]
    fn test_total_matches_stats() {
        let mon = bulbasaur();
        assert_eq!(mon.total(), 318);
        assert_eq!(mon.total(), mon.stats.total());
    }

    #[test]
    fn test_type_labels_joined() {
        assert_eq!(bulbasaur().type_labels(), "Grass/Poison");
    }

    #[test]
    fn test_serialize_includes_total() {
        let value = serde_json::to_value(bulbasaur()).unwrap();
        assert_eq!(value["total"], 318);
        assert_eq!(value["types"][1], "Poison");
        assert_eq!(value["is_legendary"], false);
    }

    #[test]
    fn test_deserialize_ignores_total() {
        let json = serde_json::to_string(&bulbasaur()).unwrap();
        let parsed: PokemonSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bulbasaur());
    }
}
