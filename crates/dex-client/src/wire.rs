//! Response shapes of the PokeAPI endpoints.
//!
//! Only the fields the application reads are modelled; everything else in
//! the responses is ignored by serde.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` pair, the API's generic link type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Lowercase slug.
    pub name: String,
    /// Absolute URL of the linked record.
    pub url: String,
}

/// A bare `{ url }` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Absolute URL of the linked record.
    pub url: String,
}

/// `GET /pokemon?limit=N`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPage {
    /// Total number of records the API knows about.
    #[serde(default)]
    pub count: usize,
    /// Entity references in API order.
    pub results: Vec<NamedResource>,
}

/// `GET /pokemon/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Entity ID.
    pub id: u32,
    /// Lowercase name.
    pub name: String,
    /// Type slots.
    pub types: Vec<TypeSlot>,
    /// Stats in fixed order (hp, attack, defense, sp. atk, sp. def, speed).
    pub stats: Vec<StatEntry>,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    /// Ability slots.
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Link to the species record.
    pub species: NamedResource,
}

/// One entry of [`PokemonRecord::types`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    /// 1-based slot number.
    #[serde(default)]
    pub slot: u8,
    /// The type.
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// One entry of [`PokemonRecord::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Base value.
    pub base_stat: u32,
    /// Which stat this is. Not used for positioning.
    #[serde(default)]
    pub stat: Option<NamedResource>,
}

/// One entry of [`PokemonRecord::abilities`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    /// The ability.
    pub ability: NamedResource,
    /// Whether this is a hidden ability.
    #[serde(default)]
    pub is_hidden: bool,
}

/// `GET /pokemon-species/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Flavor texts across games and languages.
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    /// Link to the evolution chain.
    pub evolution_chain: Resource,
}

/// One entry of [`SpeciesRecord::flavor_text_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    /// Text with the game's layout control characters.
    pub flavor_text: String,
    /// Language of the text.
    pub language: NamedResource,
}

/// `GET /evolution-chain/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    /// Root of the chain.
    pub chain: ChainLink,
}

/// A node of an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Species at this node.
    pub species: NamedResource,
    /// Possible next evolutions.
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}
