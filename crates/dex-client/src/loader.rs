//! Batched catalog loading.

use std::sync::Arc;

use dex_core::{ApiConfig, LegendaryRegistry, PokemonSummary};
use futures_util::future::try_join_all;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::LoadError;
use crate::normalize::summarize;
use crate::source::PokeApi;
use crate::wire::NamedResource;

/// Update sent during a streaming catalog load.
///
/// # Channel Protocol
///
/// 1. [`LoadUpdate::ReferencesDiscovered`] - once, after the index fetch
/// 2. [`LoadUpdate::BatchLoaded`] - once per finished batch
/// 3. [`LoadUpdate::Complete`] - once, with the sorted catalog or the error
///
/// A failed index fetch skips straight to `Complete`.
#[derive(Debug)]
pub enum LoadUpdate {
    /// Number of entity references returned by the index.
    ReferencesDiscovered(usize),

    /// A batch of detail records finished.
    BatchLoaded {
        /// 1-based batch number.
        batch: usize,
        /// Total number of batches.
        batches: usize,
        /// Records in this batch.
        size: usize,
        /// Records loaded so far, across batches.
        loaded: usize,
    },

    /// The load finished.
    Complete(Result<Vec<PokemonSummary>, LoadError>),
}

/// Loads the full normalized catalog.
///
/// The index is fetched once, the references are split into batches of
/// `batch_size`, and each batch's detail records are fetched concurrently.
/// A batch is awaited as a whole before the next one starts, so at most
/// `batch_size` requests are in flight. The merged result is sorted by ID.
///
/// Any failure aborts the load; no partial catalog is returned.
///
/// # Cloning
///
/// `CatalogLoader` is cheaply cloneable via internal `Arc` references, so a
/// clone can be moved into a spawned task.
///
/// # Examples
///
/// ```ignore
/// use dex_client::{CatalogLoader, PokeApiClient};
/// use tokio_util::sync::CancellationToken;
///
/// let client = PokeApiClient::new(&config.api)?;
/// let loader = CatalogLoader::new(client, LegendaryRegistry::default(), &config.api);
/// let catalog = loader.load(&CancellationToken::new()).await?;
/// ```
#[derive(Debug)]
pub struct CatalogLoader<A> {
    api: Arc<A>,
    registry: Arc<LegendaryRegistry>,
    index_limit: usize,
    batch_size: usize,
}

impl<A> Clone for CatalogLoader<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            registry: Arc::clone(&self.registry),
            index_limit: self.index_limit,
            batch_size: self.batch_size,
        }
    }
}

impl<A: PokeApi> CatalogLoader<A> {
    /// Creates a loader using the index limit and batch size from `config`.
    pub fn new(
        api: impl Into<Arc<A>>,
        registry: impl Into<Arc<LegendaryRegistry>>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            api: api.into(),
            registry: registry.into(),
            index_limit: config.index_limit,
            batch_size: config.batch_size.max(1),
        }
    }

    /// Number of references requested from the index.
    #[inline]
    #[must_use]
    pub const fn index_limit(&self) -> usize {
        self.index_limit
    }

    /// Maximum number of concurrent detail requests.
    #[inline]
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Loads the catalog.
    ///
    /// Returns [`LoadError::Cancelled`] if `cancel` fires before the load
    /// finishes.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<Vec<PokemonSummary>, LoadError> {
        let result = self.run(cancel, None).await;
        log_outcome(&result);
        result
    }

    /// Loads the catalog, streaming progress through `tx`.
    ///
    /// The final [`LoadUpdate::Complete`] carries the same value
    /// [`load`](Self::load) would return. If the receiver is dropped the
    /// load stops as if cancelled.
    #[allow(clippy::needless_pass_by_value)] // The sender is dropped when the load ends
    pub async fn load_streaming(&self, tx: mpsc::Sender<LoadUpdate>, cancel: &CancellationToken) {
        let result = self.run(cancel, Some(&tx)).await;
        log_outcome(&result);
        tokio::select! {
            biased;
            _ = tx.send(LoadUpdate::Complete(result)) => {}
            () = cancel.cancelled() => debug!("Dropped load completion, receiver is not reading"),
        }
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        tx: Option<&mpsc::Sender<LoadUpdate>>,
    ) -> Result<Vec<PokemonSummary>, LoadError> {
        info!(limit = self.index_limit, batch_size = self.batch_size, "Starting catalog load");

        let index = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LoadError::Cancelled),
            index = self.api.fetch_index(self.index_limit) => index?,
        };
        let references = index.results;
        let total = references.len();
        let batches = total.div_ceil(self.batch_size);

        info!(count = total, batches, "Fetched catalog index");
        notify(tx, cancel, LoadUpdate::ReferencesDiscovered(total)).await?;

        let mut catalog = Vec::with_capacity(total);
        for (number, batch) in references.chunks(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                return Err(LoadError::Cancelled);
            }
            let size = batch.len();

            let summaries = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(LoadError::Cancelled),
                summaries = self.fetch_batch(batch) => summaries?,
            };
            catalog.extend(summaries);

            let batch = number + 1;
            info!(loaded = catalog.len(), total, "Loading Pokémon");
            debug!(batch, batches, size, "Batch loaded");
            notify(
                tx,
                cancel,
                LoadUpdate::BatchLoaded {
                    batch,
                    batches,
                    size,
                    loaded: catalog.len(),
                },
            )
            .await?;
        }

        catalog.sort_unstable_by_key(|summary| summary.id);
        Ok(catalog)
    }

    async fn fetch_batch(&self, batch: &[NamedResource]) -> Result<Vec<PokemonSummary>, LoadError> {
        try_join_all(batch.iter().map(|reference| self.fetch_summary(reference))).await
    }

    async fn fetch_summary(&self, reference: &NamedResource) -> Result<PokemonSummary, LoadError> {
        let record = self.api.fetch_pokemon(&reference.url).await?;
        summarize(&record, &self.registry)
    }
}

async fn notify(
    tx: Option<&mpsc::Sender<LoadUpdate>>,
    cancel: &CancellationToken,
    update: LoadUpdate,
) -> Result<(), LoadError> {
    let Some(tx) = tx else {
        return Ok(());
    };
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(LoadError::Cancelled),
        sent = tx.send(update) => sent.map_err(|_| LoadError::Cancelled),
    }
}

fn log_outcome(result: &Result<Vec<PokemonSummary>, LoadError>) {
    match result {
        Ok(catalog) => info!(count = catalog.len(), "Catalog load completed"),
        Err(LoadError::Cancelled) => info!("Catalog load cancelled"),
        Err(err) => error!(error = %err, retryable = err.is_retryable(), "Catalog load failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ApiError;
    use crate::mock::{MockApi, record};

    fn loader(api: MockApi, batch_size: usize) -> CatalogLoader<MockApi> {
        let config = ApiConfig {
            batch_size,
            ..ApiConfig::default()
        };
        CatalogLoader::new(api, LegendaryRegistry::default(), &config)
    }

    #[tokio::test]
    async fn test_load_sorts_by_id() {
        let catalog = loader(MockApi::with_catalog(7), 3)
            .load(&CancellationToken::new())
            .await
            .unwrap();
        let ids: Vec<_> = catalog.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_load_120_in_three_batches() {
        let mut api = MockApi::with_catalog(120);
        // Later IDs answer first within each batch.
        api.set_latency(|id| Duration::from_millis(1 + u64::from(121 - id) % 9));
        let loader = loader(api, 50);

        let (tx, mut rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        let task_loader = loader.clone();
        let handle = tokio::spawn(async move { task_loader.load_streaming(tx, &cancel).await });

        let mut discovered = None;
        let mut batches = Vec::new();
        let mut complete = None;
        while let Some(update) = rx.recv().await {
            match update {
                LoadUpdate::ReferencesDiscovered(n) => discovered = Some(n),
                LoadUpdate::BatchLoaded {
                    batch,
                    batches: total,
                    size,
                    loaded,
                } => batches.push((batch, total, size, loaded)),
                LoadUpdate::Complete(result) => complete = Some(result),
            }
        }
        handle.await.unwrap();

        assert_eq!(discovered, Some(120));
        assert_eq!(
            batches,
            vec![(1, 3, 50, 50), (2, 3, 50, 100), (3, 3, 20, 120)]
        );
        assert_eq!(loader.api.peak_in_flight(), 50);

        let catalog = complete.unwrap().unwrap();
        assert_eq!(catalog.len(), 120);
        assert!(catalog.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_cancel_unblocks_full_update_channel() {
        let loader = loader(MockApi::with_catalog(10), 2);
        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move { loader.load_streaming(tx, &task_cancel).await });

        // Nobody reads `rx`, so the second update parks on a full buffer.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        drop(rx);
    }

    #[tokio::test]
    async fn test_total_and_legendary_flag() {
        let mut api = MockApi::default();
        api.add_pokemon(record(25, [35, 55, 40, 50, 50, 90]));
        api.add_pokemon(record(150, [1, 1, 1, 1, 1, 1]));
        api.add_pokemon(record(1, [45, 49, 49, 65, 65, 45]));

        let catalog = loader(api, 50)
            .load(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(catalog[0].id, 1);
        assert!(!catalog[0].is_legendary);
        assert_eq!(catalog[1].total(), 320);
        assert!(catalog[2].is_legendary);
        assert_eq!(catalog[0].name, "Mon-1");
    }

    #[tokio::test]
    async fn test_index_limit_caps_references() {
        let config = ApiConfig {
            index_limit: 10,
            ..ApiConfig::default()
        };
        let loader = CatalogLoader::new(
            MockApi::with_catalog(30),
            LegendaryRegistry::default(),
            &config,
        );
        let catalog = loader.load(&CancellationToken::new()).await.unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[tokio::test]
    async fn test_single_failure_aborts_load() {
        let mut api = MockApi::with_catalog(60);
        api.fail_pokemon(42, ApiError::status(crate::mock::pokemon_url(42), 500));

        let err = loader(api, 50)
            .load(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Api(ApiError::Status { status: 500, .. })));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_record_is_typed() {
        let mut api = MockApi::default();
        let mut bad = record(3, [1, 2, 3, 4, 5, 6]);
        bad.stats.truncate(4);
        api.add_pokemon(bad);

        let err = loader(api, 50)
            .load(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_index_failure_in_stream_completes_with_error() {
        let mut api = MockApi::with_catalog(5);
        api.fail_index(ApiError::transport("mock://api/pokemon", "connection refused"));

        let (tx, mut rx) = mpsc::channel(4);
        loader(api, 50)
            .load_streaming(tx, &CancellationToken::new())
            .await;

        match rx.recv().await {
            Some(LoadUpdate::Complete(Err(LoadError::Api(ApiError::Transport { .. })))) => {}
            other => panic!("unexpected update: {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let loader = loader(MockApi::with_catalog(10), 5);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = loader.load(&cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(loader.api.requested().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_mid_batch() {
        let mut api = MockApi::with_catalog(100);
        api.set_latency(|_| Duration::from_secs(30));
        let loader = loader(api, 50);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let err = loader.load(&cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(5));
        // Only the first batch was ever issued.
        assert_eq!(loader.api.requested().len(), 50);
    }
}
