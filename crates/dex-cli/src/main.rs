//! `pokedex`: browse the Pokédex from the terminal.
//!
//! By default the catalog comes from the public `PokeAPI` and favorites are
//! kept in a JSON file under the user's data directory.
//!
//! ```text
//! pokedex list --type fire --format csv
//! pokedex search pika
//! pokedex show 25
//! pokedex favorites toggle 25
//! pokedex browse
//! ```

mod output;

use std::fs::{self, File};
use std::io::{self, Write};
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use dex_client::{CatalogLoader, DetailPipeline, PokeApiClient};
use dex_core::{CatalogFilter, Config, LegendaryRegistry, PokemonSummary, PokemonType};
use dex_store::{FavoritesStore, JsonFileStore, KeyValueStore, MemoryStore, SearchStore};
use dex_tui::Favorites;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::output::{DetailJson, OutputFormat, render_detail, render_entries};

/// Browse the Pokédex: list, search and inspect Pokémon, and keep favorites.
#[derive(Parser, Debug)]
#[command(name = "pokedex", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(short, long, global = true, env = "POKEDEX_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Favorites file (defaults to the platform data directory)
    #[arg(long, global = true, env = "POKEDEX_FAVORITES_PATH")]
    favorites_path: Option<Utf8PathBuf>,

    /// Base URL of the Pokémon API
    #[arg(long, global = true, env = "POKEDEX_BASE_URL")]
    base_url: Option<String>,

    /// Number of catalog entries to load
    #[arg(long, global = true, env = "POKEDEX_LIMIT")]
    limit: Option<usize>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the catalog, optionally filtered
    List {
        /// Only Pokémon of this type
        #[arg(short = 't', long = "type", value_parser = parse_type)]
        pokemon_type: Option<PokemonType>,

        /// Only legendary Pokémon
        #[arg(short, long)]
        legendary: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Search the catalog by name or type
    Search {
        /// Search term
        term: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show profile, description and evolution chain of one Pokémon
    Show {
        /// Pokédex ID
        id: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Launch the interactive browser
    Browse,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// List favorite Pokémon
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Add a Pokémon to favorites, or remove it if already there
    Toggle {
        /// Pokédex ID
        id: u32,
    },
    /// Remove all favorites
    Clear,
}

fn parse_type(value: &str) -> Result<PokemonType, String> {
    PokemonType::from_name(value).ok_or_else(|| {
        let names: Vec<_> = PokemonType::ALL
            .iter()
            .map(|ty| ty.label().to_lowercase())
            .collect();
        format!("unknown type '{value}', expected one of: {}", names.join(", "))
    })
}

/// Initializes tracing. Logs go to stderr, or to `log_file` while the TUI
/// owns the terminal.
fn init_tracing(verbose: bool, no_color: bool, log_file: Option<File>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"))
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    let subscriber = tracing_subscriber::registry().with(filter);
    match log_file {
        Some(file) => subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(use_ansi)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

/// Opens `pokedex.log` next to the default favorites file.
fn open_log_file() -> color_eyre::Result<(Utf8PathBuf, File)> {
    let dir = dirs::data_dir()
        .map(|dir| dir.join("pokedex"))
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir).wrap_err("failed to create log directory")?;
    let path = Utf8PathBuf::from_path_buf(dir.join("pokedex.log"))
        .map_err(|path| color_eyre::eyre::eyre!("log path is not UTF-8: {}", path.display()))?;
    let file = File::create(&path).wrap_err_with(|| format!("failed to create {path}"))?;
    Ok((path, file))
}

/// Builds a [`Config`] from the config file, then applies flag overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the result is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    if let Some(path) = &cli.favorites_path {
        config.storage.favorites_path.clone_from(path);
    }
    if let Some(limit) = cli.limit {
        config.api.index_limit = limit;
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

fn load_config_file(path: &Utf8Path) -> color_eyre::Result<Config> {
    Config::load(path).wrap_err_with(|| format!("failed to load config from {path}"))
}

/// Favorites backed by the configured file, or the platform default. Without
/// a data directory they are kept in memory for this run only.
fn open_favorites(config: &Config) -> Favorites {
    let store = if config.storage.favorites_path.as_str().is_empty() {
        JsonFileStore::in_data_dir()
    } else {
        Ok(JsonFileStore::new(config.storage.favorites_path.clone()))
    };

    let storage: Box<dyn KeyValueStore> = match store {
        Ok(store) => {
            debug!(path = %store.path(), "Using favorites file");
            Box::new(store)
        }
        Err(err) => {
            warn!(error = %err, "Favorites will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    FavoritesStore::load(storage)
}

fn registry(config: &Config) -> LegendaryRegistry {
    LegendaryRegistry::new(config.catalog.legendary_ids.iter().copied())
}

/// A token cancelled on Ctrl+C, so long loads stop cleanly.
fn interrupt_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            guard.cancel();
        }
    });
    cancel
}

async fn load_catalog(config: &Config) -> color_eyre::Result<Vec<PokemonSummary>> {
    let api = PokeApiClient::new(&config.api)?;
    let loader = CatalogLoader::<PokeApiClient>::new(api, registry(config), &config.api);
    let catalog = loader
        .load(&interrupt_token())
        .await
        .wrap_err("failed to load the catalog")?;
    Ok(catalog)
}

fn print(text: &str) -> color_eyre::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}

async fn cmd_list(
    config: &Config,
    pokemon_type: Option<PokemonType>,
    legendary: bool,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    let catalog = load_catalog(config).await?;
    let favorites = open_favorites(config);

    let filters: Vec<CatalogFilter> = pokemon_type
        .map(CatalogFilter::Type)
        .into_iter()
        .chain(legendary.then_some(CatalogFilter::Legendary))
        .collect();
    let entries: Vec<&PokemonSummary> = catalog
        .iter()
        .filter(|summary| filters.iter().all(|filter| filter.matches(summary)))
        .collect();

    info!(shown = entries.len(), catalog = catalog.len(), "Listing catalog");
    print(&render_entries(&entries, format, |id| favorites.is_favorite(id))?)
}

async fn cmd_search(config: &Config, term: &str, format: OutputFormat) -> color_eyre::Result<()> {
    let catalog = load_catalog(config).await?;
    let favorites = open_favorites(config);

    let mut search = SearchStore::new(catalog);
    search.commit_search(term);
    let entries: Vec<&PokemonSummary> = search.results().collect();

    if entries.is_empty() && format == OutputFormat::Table {
        bail!("no Pokémon match '{term}'");
    }
    info!(term, results = entries.len(), "Search finished");
    print(&render_entries(&entries, format, |id| favorites.is_favorite(id))?)
}

async fn cmd_show(config: &Config, id: u32, json: bool) -> color_eyre::Result<()> {
    let api = PokeApiClient::new(&config.api)?;
    let pipeline = DetailPipeline::<PokeApiClient>::new(api, registry(config));
    let favorites = open_favorites(config);

    let report = match pipeline.fetch(id, &interrupt_token()).await {
        Ok(report) => report,
        Err(failure) if failure.error().is_some_and(|err| err.is_not_found()) => {
            bail!("no Pokémon with ID {id}");
        }
        Err(failure) => return Err(failure.into()),
    };

    let favorite = favorites.is_favorite(id);
    if json {
        print(&serde_json::to_string_pretty(&DetailJson::new(&report, favorite))?)
    } else {
        print(&render_detail(&report, favorite))
    }
}

async fn cmd_favorites(config: &Config, action: FavoritesCommand) -> color_eyre::Result<()> {
    let mut favorites = open_favorites(config);

    match action {
        FavoritesCommand::List { format } => {
            if favorites.is_empty() {
                info!("No favorites yet");
                return if format == OutputFormat::Table {
                    Ok(())
                } else {
                    print(&render_entries(&[], format, |_| true)?)
                };
            }
            let catalog = load_catalog(config).await?;
            let entries = favorites.list(&catalog);
            let missing = favorites.len() - entries.len();
            if missing > 0 {
                info!(missing, "Some favorites are outside the loaded catalog");
            }
            print(&render_entries(&entries, format, |_| true)?)
        }
        FavoritesCommand::Toggle { id } => {
            let message = if favorites.toggle(id) {
                format!("Added #{id:03} to favorites")
            } else {
                format!("Removed #{id:03} from favorites")
            };
            print(&message)
        }
        FavoritesCommand::Clear => {
            let count = favorites.len();
            favorites.clear();
            print(&format!("Cleared {count} favorites"))
        }
    }
}

async fn cmd_browse(config: &Config) -> color_eyre::Result<()> {
    let api = PokeApiClient::new(&config.api)?;
    let favorites = open_favorites(config);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = dex_tui::run(config, api, favorites) => result?,
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    dex_tui::run(config, api, favorites).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Browse) {
        let (path, file) = open_log_file()?;
        init_tracing(cli.verbose, true, Some(file));
        info!(log = %path, "Logging to file");
    } else {
        init_tracing(cli.verbose, cli.no_color, None);
    }

    let config = build_config(&cli)?;

    match cli.command {
        Commands::List {
            pokemon_type,
            legendary,
            format,
        } => cmd_list(&config, pokemon_type, legendary, format).await,
        Commands::Search { term, format } => cmd_search(&config, &term, format).await,
        Commands::Show { id, json } => cmd_show(&config, id, json).await,
        Commands::Favorites { action } => cmd_favorites(&config, action).await,
        Commands::Browse => cmd_browse(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_help_names_matched_fields() {
        let command = Cli::command();
        let search = command.find_subcommand("search").unwrap();
        let about = search.get_about().unwrap().to_string();
        assert_eq!(about, "Search the catalog by name or type");
    }

    #[test]
    fn test_list_flags_parse() {
        let cli = Cli::parse_from(["pokedex", "list", "--type", "FIRE", "--legendary", "-f", "csv"]);
        match cli.command {
            Commands::List {
                pokemon_type,
                legendary,
                format,
            } => {
                assert_eq!(pokemon_type, Some(PokemonType::Fire));
                assert!(legendary);
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Cli::try_parse_from(["pokedex", "list", "--type", "cosmic"]).unwrap_err();
        assert!(err.to_string().contains("unknown type 'cosmic'"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "pokedex",
            "favorites",
            "toggle",
            "25",
            "--favorites-path",
            "/tmp/favs.json",
        ]);
        assert_eq!(
            cli.favorites_path.as_deref(),
            Some(Utf8Path::new("/tmp/favs.json"))
        );
        assert!(matches!(
            cli.command,
            Commands::Favorites {
                action: FavoritesCommand::Toggle { id: 25 }
            }
        ));
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let cli = Cli::parse_from([
            "pokedex",
            "browse",
            "--base-url",
            "http://localhost:8080/api/v2",
            "--limit",
            "20",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.api.index_limit, 20);
    }

    #[test]
    fn test_build_config_rejects_empty_base_url() {
        let cli = Cli::parse_from(["pokedex", "browse", "--base-url", " "]);
        assert!(build_config(&cli).is_err());
    }
}
