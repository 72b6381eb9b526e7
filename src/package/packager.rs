use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::batch::{BatchProcessor, ClipSource};
use crate::config::Config;
use crate::enrich::EnricherRegistry;
use crate::error::{PackageError, Result};
use crate::package::payload::{ProcessingSummary, SubmissionPayload};
use crate::probe::{FfprobeProbe, MediaProbe};

/// Turns a batch of recorded clips into an upload-ready submission
///
/// The packager follows a short pipeline:
/// 1. Batch processing - validate and enrich every clip, recording failures
/// 2. Viability check - refuse to build a submission with no clips in it
/// 3. Assembly - attach clips, caller fields and the processing summary
///
/// Sending the payload is left to the caller's HTTP client.
pub struct ClipPackager {
    config: Config,
    processor: BatchProcessor,
}

impl ClipPackager {
    /// Create a packager using the given probe
    ///
    /// Fails with [`ConfigError::InvalidValue`](crate::error::ConfigError)
    /// if the configuration does not validate.
    pub fn new(config: Config, probe: Arc<dyn MediaProbe>) -> Result<Self> {
        let processor = BatchProcessor::from_config(&config, probe)?;
        Ok(Self { config, processor })
    }

    /// Create a packager that probes with the configured ffprobe executable
    pub fn with_ffprobe(config: Config) -> Result<Self> {
        let probe = Arc::new(FfprobeProbe::from_config(&config.probe));
        Self::new(config, probe)
    }

    /// Replace the enrichment strategies
    pub fn with_enrichers(mut self, enrichers: EnricherRegistry) -> Self {
        self.processor = BatchProcessor::new(
            self.processor.validator().clone(),
            enrichers,
            self.config.submission.clone(),
        );
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }

    /// Process the clips and build the submission payload
    ///
    /// # Arguments
    ///
    /// * `sources` - Recorded clips, in the order they were captured
    /// * `fields` - Extra form fields sent with the clips, in order
    pub async fn package<S, I, K, V>(&self, sources: &[S], fields: I) -> Result<SubmissionPayload>
    where
        S: ClipSource,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        info!("Packaging {} clips for upload", sources.len());

        let outcome = self.processor.process(sources).await;

        if outcome.successes.is_empty() {
            warn!("No clips survived processing, nothing to submit");
            return Err(PackageError::NoViableClips {
                original_count: sources.len(),
            }
            .into());
        }

        let summary = ProcessingSummary {
            original_count: sources.len(),
            processed_count: outcome.successes.len(),
            errors: outcome.failures,
            processing_timestamp: Utc::now().timestamp_millis(),
        };

        debug!(
            "Summary: {}/{} clips, {} errors",
            summary.processed_count,
            summary.original_count,
            summary.errors.len()
        );

        let submission = &self.config.submission;
        let payload = SubmissionPayload::assemble(
            &submission.file_field,
            outcome.successes,
            fields,
            &submission.summary_field,
            summary,
        )?;

        info!(
            "Submission ready: {} clips under '{}', {} parts total",
            payload.file_count(),
            submission.file_field,
            payload.parts().len()
        );

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::MemorySource;
    use crate::error::{ConfigError, PackagerError};
    use crate::test_support::{scripted_source, ScriptedProbe, MIB};

    fn packager() -> ClipPackager {
        ClipPackager::new(Config::default(), Arc::new(ScriptedProbe::new())).unwrap()
    }

    fn no_fields() -> Vec<(String, String)> {
        Vec::new()
    }

    #[tokio::test]
    async fn test_mixed_batch_summary() {
        let sources = vec![
            scripted_source("video/webm", 10 * MIB, 5.0),
            scripted_source("video/webm", 60 * MIB, 5.0),
            scripted_source("video/mp4", 5 * MIB, 10.0),
        ];

        let before = Utc::now().timestamp_millis();
        let payload = packager()
            .package(&sources, vec![("frame_type", "strip"), ("duration", "5")])
            .await
            .unwrap();

        let summary = payload.summary();
        assert_eq!(summary.original_count, 3);
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].index, 1);
        assert!(summary.errors[0].error_message.contains("50"));
        assert!(summary.processing_timestamp >= before);

        assert_eq!(payload.file_count(), 2);
        assert_eq!(payload.field("frame_type"), Some("strip"));
        assert_eq!(payload.field("duration"), Some("5"));

        let json: serde_json::Value =
            serde_json::from_str(payload.field("client_processing_info").unwrap()).unwrap();
        assert_eq!(json["processed_count"], 2);
        assert_eq!(json["original_count"], 3);
    }

    #[tokio::test]
    async fn test_all_failing_batch_is_rejected() {
        let sources = vec![
            scripted_source("video/webm", 60 * MIB, 5.0),
            scripted_source("video/avi", MIB, 5.0),
            MemorySource::new(vec![0u8; 8], "video/mp4"),
        ];

        let err = packager().package(&sources, no_fields()).await.unwrap_err();
        assert!(matches!(
            err,
            PackagerError::Package(PackageError::NoViableClips { original_count: 3 })
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let sources: Vec<MemorySource> = Vec::new();
        let err = packager().package(&sources, no_fields()).await.unwrap_err();
        assert!(matches!(
            err,
            PackagerError::Package(PackageError::NoViableClips { original_count: 0 })
        ));
    }

    #[tokio::test]
    async fn test_configured_field_names() {
        let mut config = Config::default();
        config.submission.file_field = "clips".to_string();
        config.submission.summary_field = "summary".to_string();
        let packager = ClipPackager::new(config, Arc::new(ScriptedProbe::new())).unwrap();

        let payload = packager
            .package(&[scripted_source("video/webm", MIB, 2.0)], no_fields())
            .await
            .unwrap();

        let names: Vec<&str> = payload.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["clips", "summary"]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.limits.max_duration = f64::NAN;
        assert!(matches!(
            ClipPackager::new(config, Arc::new(ScriptedProbe::new())),
            Err(PackagerError::Config(ConfigError::InvalidValue { .. }))
        ));

        let mut config = Config::default();
        config.probe.timeout_secs = 0.0;
        assert!(matches!(
            ClipPackager::with_ffprobe(config),
            Err(PackagerError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn test_custom_enrichers_are_used() {
        let packager = packager().with_enrichers(EnricherRegistry::empty());
        let payload = packager
            .package(&[scripted_source("video/webm", MIB, 2.0)], no_fields())
            .await
            .unwrap();

        let names: Vec<&str> = payload.files().map(|clip| clip.name()).collect();
        assert_eq!(names, vec!["video_0.webm"]);
    }
}
