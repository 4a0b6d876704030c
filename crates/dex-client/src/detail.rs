//! The three-stage detail pipeline: entity, then species, then evolution
//! chain.

use std::future::Future;
use std::sync::Arc;

use dex_core::{EvolutionStage, LegendaryRegistry, PokemonProfile, SpeciesInfo};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{DetailStage, LoadError, StageFailure};
use crate::normalize;
use crate::source::PokeApi;

/// Everything the detail view shows for one entry.
///
/// The profile is always present; the later stages may each have failed
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailReport {
    /// Entity stage output.
    pub profile: PokemonProfile,
    /// Species stage output.
    pub species: Result<SpeciesInfo, StageFailure>,
    /// Evolution stage output.
    pub evolution: Result<Vec<EvolutionStage>, StageFailure>,
}

impl DetailReport {
    /// Failures of the species and evolution stages, in stage order.
    pub fn failures(&self) -> impl Iterator<Item = &StageFailure> {
        self.species
            .as_ref()
            .err()
            .into_iter()
            .chain(self.evolution.as_ref().err())
    }
}

/// Fetches the records behind the detail view.
///
/// Each stage needs a URL from the previous response, so the stages run
/// sequentially. A failed entity stage fails the whole call; a failed
/// species stage leaves the evolution stage
/// [`Blocked`](StageFailure::Blocked).
#[derive(Debug)]
pub struct DetailPipeline<A> {
    api: Arc<A>,
    registry: Arc<LegendaryRegistry>,
}

impl<A> Clone for DetailPipeline<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: PokeApi> DetailPipeline<A> {
    /// Creates a pipeline over `api`.
    pub fn new(api: impl Into<Arc<A>>, registry: impl Into<Arc<LegendaryRegistry>>) -> Self {
        Self {
            api: api.into(),
            registry: registry.into(),
        }
    }

    /// Runs all three stages for `id`.
    pub async fn fetch(
        &self,
        id: u32,
        cancel: &CancellationToken,
    ) -> Result<DetailReport, StageFailure> {
        info!(id, "Fetching detail");

        let url = self.api.pokemon_url(id);
        let profile = run_stage(DetailStage::Entity, cancel, async {
            let record = self.api.fetch_pokemon(&url).await?;
            normalize::profile(&record, &self.registry)
        })
        .await
        .inspect_err(|failure| warn!(id, error = %failure, "Detail unavailable"))?;

        let species = run_stage(DetailStage::Species, cancel, async {
            let record = self.api.fetch_species(&profile.species_url).await?;
            Ok::<_, LoadError>(normalize::species_info(&record))
        })
        .await;

        let evolution = match &species {
            Ok(info) => {
                run_stage(DetailStage::Evolution, cancel, async {
                    let record = self
                        .api
                        .fetch_evolution_chain(&info.evolution_chain_url)
                        .await?;
                    normalize::evolution_chain(&record)
                })
                .await
            }
            Err(_) => Err(StageFailure::Blocked {
                stage: DetailStage::Evolution,
                by: DetailStage::Species,
            }),
        };

        let report = DetailReport {
            profile,
            species,
            evolution,
        };
        for failure in report.failures() {
            warn!(id, stage = %failure.stage(), error = %failure, "Detail stage failed");
        }
        debug!(
            id,
            has_description = report
                .species
                .as_ref()
                .is_ok_and(|info| info.description.is_some()),
            "Detail fetched"
        );
        Ok(report)
    }
}

async fn run_stage<T>(
    stage: DetailStage,
    cancel: &CancellationToken,
    work: impl Future<Output = Result<T, LoadError>>,
) -> Result<T, StageFailure> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(StageFailure::failed(stage, LoadError::Cancelled)),
        result = work => result.map_err(|error| StageFailure::failed(stage, error)),
    }
}
