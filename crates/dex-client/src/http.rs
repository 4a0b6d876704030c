//! reqwest-backed [`PokeApi`] implementation.

use std::sync::Arc;

use dex_core::ApiConfig;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::source::PokeApi;
use crate::wire::{EvolutionChainRecord, IndexPage, PokemonRecord, SpeciesRecord};

const USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the PokeAPI REST service.
///
/// Cheaply cloneable; clones share the connection pool.
///
/// # Examples
///
/// ```
/// use dex_client::{PokeApi, PokeApiClient};
/// use dex_core::ApiConfig;
///
/// let client = PokeApiClient::new(&ApiConfig::default()).unwrap();
/// assert_eq!(client.pokemon_url(25), "https://pokeapi.co/api/v2/pokemon/25");
/// ```
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl PokeApiClient {
    /// Builds a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url: Arc<str> = config.base_url.trim_end_matches('/').into();

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|error| ApiError::transport(base_url.as_ref(), error.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|error| ApiError::transport(url, error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(url, status.as_u16()));
        }

        response.json::<T>().await.map_err(|error| {
            if error.is_decode() {
                ApiError::parse(url, error.to_string())
            } else {
                ApiError::transport(url, error.to_string())
            }
        })
    }
}

impl PokeApi for PokeApiClient {
    async fn fetch_index(&self, limit: usize) -> Result<IndexPage, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        self.get_json(&url).await
    }

    async fn fetch_pokemon(&self, url: &str) -> Result<PokemonRecord, ApiError> {
        self.get_json(url).await
    }

    async fn fetch_species(&self, url: &str) -> Result<SpeciesRecord, ApiError> {
        self.get_json(url).await
    }

    async fn fetch_evolution_chain(&self, url: &str) -> Result<EvolutionChainRecord, ApiError> {
        self.get_json(url).await
    }

    fn pokemon_url(&self, id: u32) -> String {
        format!("{}/pokemon/{id}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/api/v2/".to_owned(),
            ..ApiConfig::default()
        };
        let client = PokeApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v2");
        assert_eq!(client.pokemon_url(7), "http://localhost:8080/api/v2/pokemon/7");
    }

    #[test]
    fn test_new_with_timeout() {
        let config = ApiConfig {
            request_timeout_secs: Some(5),
            ..ApiConfig::default()
        };
        assert!(PokeApiClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            request_timeout_secs: Some(2),
            ..ApiConfig::default()
        };
        let client = PokeApiClient::new(&config).unwrap();
        let err = client.fetch_index(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err.is_retryable());
    }
}
