//! In-process [`PokeApi`] used by the loader and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dex_core::FxHashMap;
use parking_lot::Mutex;

use crate::error::ApiError;
use crate::source::PokeApi;
use crate::wire::{
    ChainLink, EvolutionChainRecord, FlavorTextEntry, IndexPage, NamedResource, PokemonRecord,
    Resource, SpeciesRecord, StatEntry, TypeSlot,
};

const BASE: &str = "mock://api";

pub fn pokemon_url(id: u32) -> String {
    format!("{BASE}/pokemon/{id}")
}

pub fn species_url(id: u32) -> String {
    format!("{BASE}/pokemon-species/{id}/")
}

pub fn chain_url(id: u32) -> String {
    format!("{BASE}/evolution-chain/{id}/")
}

fn named(name: &str, url: String) -> NamedResource {
    NamedResource {
        name: name.to_owned(),
        url,
    }
}

/// Entity record with the given stats and a single Normal type.
pub fn record(id: u32, stats: [u32; 6]) -> PokemonRecord {
    PokemonRecord {
        id,
        name: format!("mon-{id}"),
        types: vec![TypeSlot {
            slot: 1,
            kind: named("normal", format!("{BASE}/type/1/")),
        }],
        stats: stats
            .iter()
            .map(|v| StatEntry {
                base_stat: *v,
                stat: None,
            })
            .collect(),
        height: 10,
        weight: 100,
        abilities: Vec::new(),
        species: named(&format!("mon-{id}"), species_url(id)),
    }
}

pub fn species(english: Option<&str>, chain: u32) -> SpeciesRecord {
    let mut entries = vec![FlavorTextEntry {
        flavor_text: "texte".to_owned(),
        language: named("fr", format!("{BASE}/language/5/")),
    }];
    if let Some(text) = english {
        entries.push(FlavorTextEntry {
            flavor_text: text.to_owned(),
            language: named("en", format!("{BASE}/language/9/")),
        });
    }
    SpeciesRecord {
        flavor_text_entries: entries,
        evolution_chain: Resource {
            url: chain_url(chain),
        },
    }
}

/// Linear chain over the given species IDs.
pub fn chain(ids: &[u32]) -> EvolutionChainRecord {
    fn link(ids: &[u32]) -> Option<ChainLink> {
        let (first, rest) = ids.split_first()?;
        Some(ChainLink {
            species: named(&format!("mon-{first}"), species_url(*first)),
            evolves_to: link(rest).into_iter().collect(),
        })
    }
    EvolutionChainRecord {
        chain: link(ids).unwrap_or_else(|| ChainLink {
            species: named("none", species_url(0)),
            evolves_to: Vec::new(),
        }),
    }
}

#[derive(Default)]
pub struct MockApi {
    index: Vec<NamedResource>,
    index_error: Option<ApiError>,
    pokemon: FxHashMap<String, Result<PokemonRecord, ApiError>>,
    species: FxHashMap<String, Result<SpeciesRecord, ApiError>>,
    chains: FxHashMap<String, Result<EvolutionChainRecord, ApiError>>,
    latency: Option<fn(u32) -> Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockApi {
    /// Catalog of `count` entries with IDs `1..=count`, listed in reverse so
    /// the index order never matches ID order.
    pub fn with_catalog(count: u32) -> Self {
        let mut api = Self::default();
        for id in (1..=count).rev() {
            api.add_pokemon(record(id, [10, 20, 30, 40, 50, 60]));
        }
        api
    }

    pub fn add_pokemon(&mut self, record: PokemonRecord) {
        let url = pokemon_url(record.id);
        self.index.push(named(&record.name, url.clone()));
        self.pokemon.insert(url, Ok(record));
    }

    pub fn fail_pokemon(&mut self, id: u32, error: ApiError) {
        self.pokemon.insert(pokemon_url(id), Err(error));
    }

    pub fn fail_index(&mut self, error: ApiError) {
        self.index_error = Some(error);
    }

    pub fn add_species(&mut self, id: u32, record: SpeciesRecord) {
        self.species.insert(species_url(id), Ok(record));
    }

    pub fn fail_species(&mut self, id: u32, error: ApiError) {
        self.species.insert(species_url(id), Err(error));
    }

    pub fn add_chain(&mut self, id: u32, record: EvolutionChainRecord) {
        self.chains.insert(chain_url(id), Ok(record));
    }

    /// Per-entity delay, keyed by ID.
    pub fn set_latency(&mut self, latency: fn(u32) -> Duration) {
        self.latency = Some(latency);
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    fn lookup<T: Clone>(
        map: &FxHashMap<String, Result<T, ApiError>>,
        url: &str,
    ) -> Result<T, ApiError> {
        map.get(url)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::status(url, 404)))
    }
}

impl PokeApi for MockApi {
    async fn fetch_index(&self, limit: usize) -> Result<IndexPage, ApiError> {
        if let Some(error) = &self.index_error {
            return Err(error.clone());
        }
        let results: Vec<_> = self.index.iter().take(limit).cloned().collect();
        Ok(IndexPage {
            count: self.index.len(),
            results,
        })
    }

    async fn fetch_pokemon(&self, url: &str) -> Result<PokemonRecord, ApiError> {
        self.requested.lock().push(url.to_owned());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            let id = crate::normalize::id_from_url(url).unwrap_or(0);
            tokio::time::sleep(latency(id)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Self::lookup(&self.pokemon, url)
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesRecord, ApiError> {
        self.requested.lock().push(url.to_owned());
        Self::lookup(&self.species, url)
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainRecord, ApiError> {
        self.requested.lock().push(url.to_owned());
        Self::lookup(&self.chains, url)
    }

    fn pokemon_url(&self, id: u32) -> String {
        pokemon_url(id)
    }
}
