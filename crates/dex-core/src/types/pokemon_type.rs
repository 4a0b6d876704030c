//! The fixed 18-value Pokémon type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An elemental Pokémon type.
///
/// The API reports types as lowercase slugs (`"fire"`); the display label is
/// the capitalized form (`"Fire"`). Serialization uses the display label.
///
/// # Examples
///
/// ```
/// use dex_core::PokemonType;
///
/// let ty: PokemonType = "electric".parse().unwrap();
/// assert_eq!(ty, PokemonType::Electric);
/// assert_eq!(ty.label(), "Electric");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PokemonType {
    /// Normal type.
    Normal,
    /// Fire type.
    Fire,
    /// Water type.
    Water,
    /// Electric type.
    Electric,
    /// Grass type.
    Grass,
    /// Ice type.
    Ice,
    /// Fighting type.
    Fighting,
    /// Poison type.
    Poison,
    /// Ground type.
    Ground,
    /// Flying type.
    Flying,
    /// Psychic type.
    Psychic,
    /// Bug type.
    Bug,
    /// Rock type.
    Rock,
    /// Ghost type.
    Ghost,
    /// Dragon type.
    Dragon,
    /// Dark type.
    Dark,
    /// Steel type.
    Steel,
    /// Fairy type.
    Fairy,
}

impl PokemonType {
    /// All types in canonical (API) order.
    pub const ALL: [Self; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Returns the capitalized display label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Electric => "Electric",
            Self::Grass => "Grass",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
        }
    }

    /// Looks up a type by its API slug or label, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.label().eq_ignore_ascii_case(name))
    }

    /// Returns the type that follows this one in canonical order, or `None`
    /// after [`Fairy`](Self::Fairy).
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|ty| *ty == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the 18 type names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pokemon type: {0}")]
pub struct UnknownType(pub String);

impl FromStr for PokemonType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownType(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_eighteen_distinct() {
        let mut labels: Vec<_> = PokemonType::ALL.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 18);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(PokemonType::from_name("fire"), Some(PokemonType::Fire));
        assert_eq!(PokemonType::from_name("FAIRY"), Some(PokemonType::Fairy));
        assert_eq!(PokemonType::from_name("Dark"), Some(PokemonType::Dark));
        assert_eq!(PokemonType::from_name("shadow"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "stellar".parse::<PokemonType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown pokemon type: stellar");
    }

    #[test]
    fn test_next_walks_canonical_order() {
        assert_eq!(PokemonType::Normal.next(), Some(PokemonType::Fire));
        assert_eq!(PokemonType::Steel.next(), Some(PokemonType::Fairy));
        assert_eq!(PokemonType::Fairy.next(), None);
    }

    #[test]
    fn test_serialization_uses_label() {
        assert_eq!(
            serde_json::to_string(&PokemonType::Psychic).unwrap(),
            r#""Psychic""#
        );
    }
}
