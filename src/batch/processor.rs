use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::batch::source::ClipSource;
use crate::clip::{Clip, ClipValidator};
use crate::config::{Config, SubmissionConfig};
use crate::enrich::EnricherRegistry;
use crate::error::{ClipResult, Result};
use crate::probe::MediaProbe;

/// Failure record for one batch item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipFailure {
    /// Position of the item in the input batch
    pub index: usize,

    /// Human-readable reason the item was dropped
    #[serde(rename = "error")]
    pub error_message: String,
}

/// Result of processing one batch item
#[derive(Debug, Clone)]
pub enum ProcessingOutcome {
    Processed(Clip),
    Failed(ClipFailure),
}

/// Partitioned batch results
///
/// Every input index appears exactly once: either as a processed clip or as a
/// failure record. Both sequences keep input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub successes: Vec<Clip>,
    pub failures: Vec<ClipFailure>,
}

impl BatchOutcome {
    /// Total number of items the batch was given
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl FromIterator<ProcessingOutcome> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = ProcessingOutcome>>(iter: I) -> Self {
        let mut outcome = Self::default();
        for item in iter {
            match item {
                ProcessingOutcome::Processed(clip) => outcome.successes.push(clip),
                ProcessingOutcome::Failed(failure) => outcome.failures.push(failure),
            }
        }
        outcome
    }
}

/// Runs validation and enrichment over a batch of clip sources
///
/// Items are handled one at a time in input order. A failing item is recorded
/// and skipped; it never stops the rest of the batch.
#[derive(Clone)]
pub struct BatchProcessor {
    validator: ClipValidator,
    enrichers: EnricherRegistry,
    naming: SubmissionConfig,
}

impl BatchProcessor {
    pub fn new(validator: ClipValidator, enrichers: EnricherRegistry, naming: SubmissionConfig) -> Self {
        Self { validator, enrichers, naming }
    }

    /// Build a processor with the built-in enrichers
    pub fn from_config(config: &Config, probe: Arc<dyn MediaProbe>) -> Result<Self> {
        Ok(Self::new(
            ClipValidator::from_config(config, probe)?,
            EnricherRegistry::new(),
            config.submission.clone(),
        ))
    }

    pub fn validator(&self) -> &ClipValidator {
        &self.validator
    }

    pub fn enrichers(&self) -> &EnricherRegistry {
        &self.enrichers
    }

    /// Validate and enrich a clip the caller already holds
    pub async fn process_clip(&self, clip: Clip) -> ClipResult<Clip> {
        let validated = self.validator.validate(clip).await?;
        Ok(self.enrichers.enrich(validated))
    }

    /// Process every source, isolating failures per item
    pub async fn process<S: ClipSource>(&self, sources: &[S]) -> BatchOutcome {
        info!("Processing {} video clips", sources.len());

        let mut outcomes = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            let outcome = match self.process_item(index, source).await {
                Ok(clip) => ProcessingOutcome::Processed(clip),
                Err(e) => {
                    error!("Error processing video {} ({}): {}", index, source.describe(), e);
                    ProcessingOutcome::Failed(ClipFailure {
                        index,
                        error_message: e.to_string(),
                    })
                }
            };
            outcomes.push(outcome);
        }

        let outcome: BatchOutcome = outcomes.into_iter().collect();

        if outcome.has_failures() {
            warn!("{} videos failed processing", outcome.failures.len());
        }
        info!(
            "Successfully processed {}/{} videos",
            outcome.successes.len(),
            sources.len()
        );

        outcome
    }

    async fn process_item<S: ClipSource>(&self, index: usize, source: &S) -> ClipResult<Clip> {
        let payload = source.resolve().await?;
        let name = self.naming.filename_for(index);
        debug!("Resolved {} as {} ({} bytes)", source.describe(), name, payload.data.len());

        self.process_clip(Clip::new(name, payload.mime_type, payload.data)).await
    }
}
