//! Configuration structures for the pokedex tool.
//!
//! - [`ApiConfig`] - Remote API settings (base URL, index size, batching)
//! - [`CatalogConfig`] - Catalog normalization settings (legendary IDs)
//! - [`StorageConfig`] - Where favorites are persisted
//! - [`TuiConfig`] - Terminal UI settings (tick rate, colors)
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it overrides.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::legendary::DEFAULT_LEGENDARY_IDS;

/// Color scheme for the TUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Settings for talking to the remote Pokémon API.
///
/// # Examples
///
/// ```
/// use dex_core::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.index_limit, 1000);
/// assert_eq!(config.batch_size, 50);
/// assert!(config.request_timeout().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,

    /// Number of references requested from the index endpoint.
    pub index_limit: usize,

    /// Number of detail requests kept in flight at once.
    pub batch_size: usize,

    /// Optional per-request timeout in seconds. `None` leaves requests
    /// unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Returns the per-request timeout, if one is configured.
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_owned(),
            index_limit: 1000,
            batch_size: 50,
            request_timeout_secs: None,
        }
    }
}

/// Settings applied while normalizing catalog records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// IDs flagged as legendary. The default list is known to be incomplete
    /// and can be extended here.
    pub legendary_ids: Vec<u32>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            legendary_ids: DEFAULT_LEGENDARY_IDS.to_vec(),
        }
    }
}

/// Where user data is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the favorites file. Empty means the platform data directory
    /// is chosen by the caller.
    pub favorites_path: Utf8PathBuf,
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use dex_core::{ColorScheme, TuiConfig};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.frame_rate, 30);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds (status expiry, spinner).
    pub tick_rate_ms: u64,

    /// Target frames per second.
    pub frame_rate: u32,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30,
            color_scheme: ColorScheme::Auto,
        }
    }
}

/// Root configuration for the pokedex tool.
///
/// # Examples
///
/// ```
/// use dex_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("pokeapi.co"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API configuration.
    pub api: ApiConfig,

    /// Catalog normalization configuration.
    pub catalog: CatalogConfig,

    /// Storage configuration.
    pub storage: StorageConfig,

    /// Terminal UI configuration.
    pub tui: TuiConfig,
}

impl Config {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_owned()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "api.base_url",
                "must not be empty",
            ));
        }
        if self.api.index_limit == 0 {
            return Err(ConfigError::invalid_option(
                "api.index_limit",
                "must be at least 1",
            ));
        }
        if self.api.batch_size == 0 {
            return Err(ConfigError::invalid_option(
                "api.batch_size",
                "must be at least 1",
            ));
        }
        if self.tui.frame_rate == 0 {
            return Err(ConfigError::invalid_option(
                "tui.frame_rate",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.index_limit, 1000);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_catalog_config_defaults_to_known_legendaries() {
        let config = CatalogConfig::default();
        assert!(config.legendary_ids.contains(&150));
        assert!(!config.legendary_ids.contains(&1));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"api": {"batch_size": 10}, "catalog": {"legendary_ids": [1]}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api.batch_size, 10);
        assert_eq!(config.api.index_limit, 1000);
        assert_eq!(config.catalog.legendary_ids, vec![1]);
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = Config::default();
        config.api.batch_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.batch_size"));
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_owned();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Utf8Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api": {{"index_limit": 151}}}}"#).unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        let config = Config::load(path).unwrap();
        assert_eq!(config.api.index_limit, 151);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        assert!(matches!(Config::load(path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_tui_config_json_shape() {
        insta::assert_json_snapshot!(TuiConfig::default(), @r#"
        {
          "tick_rate_ms": 250,
          "frame_rate": 30,
          "color_scheme": "auto"
        }
        "#);
    }

    #[test]
    fn test_color_scheme_serialization() {
        assert_eq!(
            serde_json::to_string(&ColorScheme::Dark).unwrap(),
            r#""dark""#
        );
        assert_eq!(
            serde_json::from_str::<ColorScheme>(r#""light""#).unwrap(),
            ColorScheme::Light
        );
    }
}
