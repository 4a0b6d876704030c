//! PokeAPI client, batched catalog loader, and detail pipeline.
//!
//! # Overview
//!
//! - [`PokeApi`]: the source trait; [`PokeApiClient`] implements it over HTTP
//! - [`CatalogLoader`]: index fetch, batched concurrent detail fetches,
//!   normalization, and a final sort by ID
//! - [`DetailPipeline`]: entity → species → evolution chain, with each
//!   stage's failure reported on its own
//!
//! Both loaders take a [`CancellationToken`](tokio_util::sync::CancellationToken)
//! so a caller that no longer needs the result can stop in-flight work.
//!
//! # Streaming API
//!
//! ```ignore
//! use dex_client::{CatalogLoader, LoadUpdate};
//! use tokio::sync::mpsc;
//!
//! let (tx, mut rx) = mpsc::channel(16);
//! let task_loader = loader.clone();
//! let task_cancel = cancel.clone();
//! tokio::spawn(async move { task_loader.load_streaming(tx, &task_cancel).await });
//!
//! while let Some(update) = rx.recv().await {
//!     match update {
//!         LoadUpdate::ReferencesDiscovered(n) => println!("{n} entries"),
//!         LoadUpdate::BatchLoaded { loaded, .. } => println!("{loaded} loaded"),
//!         LoadUpdate::Complete(result) => break,
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! CatalogLoader ─┐
//!                ├── PokeApi ── PokeApiClient (reqwest)
//! DetailPipeline ┘      │
//!                       └── wire types ── normalize ── dex-core records
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod detail;
mod error;
mod http;
mod loader;
pub mod normalize;
mod source;
pub mod wire;

pub use detail::{DetailPipeline, DetailReport};
pub use error::{ApiError, DetailStage, LoadError, StageFailure};
pub use http::PokeApiClient;
pub use loader::{CatalogLoader, LoadUpdate};
pub use source::PokeApi;

#[cfg(test)]
mod mock;
