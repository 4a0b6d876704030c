//! Records shown on the detail view.

use serde::{Deserialize, Serialize};

use super::{PokemonId, PokemonSummary};

/// Full entity record: the catalog fields plus physical data and abilities.
///
/// The API reports height in decimetres and weight in hectograms; both are
/// kept as reported and converted on access.
///
/// # Examples
///
/// ```
/// use dex_core::{BaseStats, PokemonProfile, PokemonSummary, PokemonType};
///
/// let summary = PokemonSummary::new(
///     25, "Pikachu", [PokemonType::Electric], BaseStats::default(), false,
/// );
/// let profile = PokemonProfile {
///     summary,
///     height_dm: 4,
///     weight_hg: 60,
///     abilities: vec!["Static".to_owned()],
///     species_url: "https://pokeapi.co/api/v2/pokemon-species/25/".to_owned(),
/// };
/// assert!((profile.height_m() - 0.4).abs() < f64::EPSILON);
/// assert!((profile.weight_kg() - 6.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonProfile {
    /// Catalog fields.
    #[serde(flatten)]
    pub summary: PokemonSummary,
    /// Height in decimetres.
    pub height_dm: u32,
    /// Weight in hectograms.
    pub weight_hg: u32,
    /// Capitalized ability names in slot order.
    pub abilities: Vec<String>,
    /// URL of the species record, input to the next pipeline stage.
    pub species_url: String,
}

impl PokemonProfile {
    /// Height in metres.
    #[inline]
    #[must_use]
    pub fn height_m(&self) -> f64 {
        f64::from(self.height_dm) / 10.0
    }

    /// Weight in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight_hg) / 10.0
    }
}

/// Species data used by the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    /// English flavor text with layout control characters flattened, or
    /// `None` when the species has no English entry.
    pub description: Option<String>,
    /// URL of the evolution chain, input to the last pipeline stage.
    pub evolution_chain_url: String,
}

/// One step of an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionStage {
    /// Species ID, taken from the last path segment of the species URL.
    pub id: PokemonId,
    /// Capitalized species name.
    pub name: String,
}
