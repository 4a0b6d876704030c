//! Turns wire records into domain records.

use dex_core::{
    BaseStats, EvolutionStage, LegendaryRegistry, PokemonProfile, PokemonSummary, PokemonType,
    SpeciesInfo, TypeSlots, capitalize,
};

use crate::error::LoadError;
use crate::wire::{ChainLink, EvolutionChainRecord, PokemonRecord, SpeciesRecord};

/// Builds a catalog entry from an entity record.
///
/// Names are capitalized, the six stats are taken by position, and the
/// legendary flag comes from `registry` alone.
pub fn summarize(
    record: &PokemonRecord,
    registry: &LegendaryRegistry,
) -> Result<PokemonSummary, LoadError> {
    let types = normalize_types(record)?;

    let values = record
        .stats
        .iter()
        .map(|entry| u8::try_from(entry.base_stat))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| LoadError::malformed(&record.name, "base stat above 255"))?;
    let stats = BaseStats::from_positional(&values).ok_or_else(|| {
        LoadError::malformed(
            &record.name,
            format!(
                "expected {} stats, found {}",
                BaseStats::COUNT,
                values.len()
            ),
        )
    })?;

    Ok(PokemonSummary {
        id: record.id,
        name: capitalize(&record.name),
        types,
        stats,
        is_legendary: registry.contains(record.id),
    })
}

/// Builds the detail-view profile from an entity record.
pub fn profile(
    record: &PokemonRecord,
    registry: &LegendaryRegistry,
) -> Result<PokemonProfile, LoadError> {
    Ok(PokemonProfile {
        summary: summarize(record, registry)?,
        height_dm: record.height,
        weight_hg: record.weight,
        abilities: record
            .abilities
            .iter()
            .map(|slot| capitalize(&slot.ability.name))
            .collect(),
        species_url: record.species.url.clone(),
    })
}

/// Extracts the English description and the evolution-chain link.
///
/// A species without an English flavor text gets `None`.
pub fn species_info(record: &SpeciesRecord) -> SpeciesInfo {
    let description = record
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| clean_flavor_text(&entry.flavor_text));

    SpeciesInfo {
        description,
        evolution_chain_url: record.evolution_chain.url.clone(),
    }
}

/// Walks an evolution chain from the root, following the first
/// `evolves_to` branch at each node.
pub fn evolution_chain(record: &EvolutionChainRecord) -> Result<Vec<EvolutionStage>, LoadError> {
    let mut stages = Vec::new();
    let mut current: Option<&ChainLink> = Some(&record.chain);

    while let Some(link) = current {
        let id = id_from_url(&link.species.url).ok_or_else(|| {
            LoadError::malformed(&link.species.url, "species URL does not end in an ID")
        })?;
        stages.push(EvolutionStage {
            id,
            name: capitalize(&link.species.name),
        });
        current = link.evolves_to.first();
    }

    Ok(stages)
}

/// Parses the trailing numeric path segment of an API URL.
///
/// # Examples
///
/// ```
/// use dex_client::normalize::id_from_url;
///
/// assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon-species/133/"), Some(133));
/// assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/25"), Some(25));
/// assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon/"), None);
/// ```
#[must_use]
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Replaces the form feeds, soft hyphens, and line breaks the games embed
/// in flavor text with single spaces.
fn clean_flavor_text(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{000c}' || c == '\u{00ad}')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_types(record: &PokemonRecord) -> Result<TypeSlots, LoadError> {
    let mut slots: Vec<_> = record.types.iter().collect();
    slots.sort_by_key(|slot| slot.slot);

    let types = slots
        .into_iter()
        .map(|slot| {
            PokemonType::from_name(&slot.kind.name).ok_or_else(|| {
                LoadError::malformed(
                    &record.name,
                    format!("unknown type '{}'", slot.kind.name),
                )
            })
        })
        .collect::<Result<TypeSlots, _>>()?;

    if types.is_empty() || types.len() > 2 {
        return Err(LoadError::malformed(
            &record.name,
            format!("expected 1 or 2 types, found {}", types.len()),
        ));
    }
    Ok(types)
}
