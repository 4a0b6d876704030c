//! Background work spawned on behalf of the event loop.
//!
//! Results are reported as [`Event`]s through the TUI's event channel, so
//! the [`App`](crate::App) only ever sees them in order with input events.

use dex_client::{CatalogLoader, DetailPipeline, PokeApi};
use dex_core::PokemonId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::event::Event;

/// Buffer between the loader and the forwarding task.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Spawns catalog loads and detail fetches.
///
/// Each piece of work gets a child of one shutdown token, so
/// [`shutdown`](Self::shutdown) stops everything still running. Starting a
/// detail fetch cancels the previous one.
pub struct BackgroundTasks<A> {
    loader: CatalogLoader<A>,
    pipeline: DetailPipeline<A>,
    events: mpsc::Sender<Event>,
    shutdown: CancellationToken,
    detail: Option<CancellationToken>,
}

impl<A: PokeApi + 'static> BackgroundTasks<A> {
    /// Creates the task set. Nothing runs until a request is made.
    pub fn new(
        loader: CatalogLoader<A>,
        pipeline: DetailPipeline<A>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            loader,
            pipeline,
            events,
            shutdown: CancellationToken::new(),
            detail: None,
        }
    }

    /// Starts a catalog load; progress arrives as [`Event::Catalog`].
    pub fn start_load(&self) {
        let loader = self.loader.clone();
        let events = self.events.clone();
        let cancel = self.shutdown.child_token();

        tokio::spawn(async move {
            let (tx, mut rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
            let forward = async {
                while let Some(update) = rx.recv().await {
                    if events.send(Event::Catalog(update)).await.is_err() {
                        debug!("Event channel closed; dropping catalog updates");
                        break;
                    }
                }
            };
            tokio::join!(loader.load_streaming(tx, &cancel), forward);
        });
    }

    /// Starts the detail pipeline for `id`, superseding any running fetch.
    pub fn fetch_detail(&mut self, id: PokemonId) {
        if let Some(previous) = self.detail.take() {
            previous.cancel();
        }
        let cancel = self.shutdown.child_token();
        self.detail = Some(cancel.clone());

        let pipeline = self.pipeline.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = pipeline.fetch(id, &cancel).await;
            if cancel.is_cancelled() {
                debug!(id, "Detail fetch superseded");
                return;
            }
            let event = Event::DetailLoaded {
                id,
                result: result.map(Box::new),
            };
            if events.send(event).await.is_err() {
                debug!(id, "Event channel closed; dropping detail");
            }
        });
    }

    /// Cancels all running work.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl<A> Drop for BackgroundTasks<A> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
