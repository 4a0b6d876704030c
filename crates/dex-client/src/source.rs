//! The seam between the loaders and the remote API.

use std::future::Future;

use crate::error::ApiError;
use crate::wire::{EvolutionChainRecord, IndexPage, PokemonRecord, SpeciesRecord};

/// Read access to the Pokémon API.
///
/// [`PokeApiClient`](crate::PokeApiClient) is the HTTP implementation.
/// Loaders are generic over this trait so tests can substitute an
/// in-process source with controlled latency and failures.
///
/// Records are addressed by absolute URL, because the API links records to
/// each other by URL (index → entity → species → evolution chain).
pub trait PokeApi: Send + Sync {
    /// Fetches up to `limit` entity references.
    fn fetch_index(&self, limit: usize)
    -> impl Future<Output = Result<IndexPage, ApiError>> + Send;

    /// Fetches an entity record.
    fn fetch_pokemon(&self, url: &str)
    -> impl Future<Output = Result<PokemonRecord, ApiError>> + Send;

    /// Fetches a species record.
    fn fetch_species(&self, url: &str)
    -> impl Future<Output = Result<SpeciesRecord, ApiError>> + Send;

    /// Fetches an evolution chain record.
    fn fetch_evolution_chain(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<EvolutionChainRecord, ApiError>> + Send;

    /// URL of the entity record with the given ID.
    fn pokemon_url(&self, id: u32) -> String;
}
