use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clip::types::{Clip, ClipMetadata, ValidatedClip};
use crate::config::{ClipLimits, Config};
use crate::error::{ClipError, ClipResult, Result};
use crate::probe::MediaProbe;

/// Enforces the configured size, format and duration limits on a clip
///
/// Size and format are checked against the clip as declared; duration
/// requires a probe, which only runs once the cheap checks pass.
#[derive(Clone)]
pub struct ClipValidator {
    limits: ClipLimits,
    probe: Arc<dyn MediaProbe>,
    probe_timeout: Duration,
}

impl ClipValidator {
    pub fn new(limits: ClipLimits, probe: Arc<dyn MediaProbe>, probe_timeout: Duration) -> Self {
        Self { limits, probe, probe_timeout }
    }

    /// Build a validator from a checked configuration
    pub fn from_config(config: &Config, probe: Arc<dyn MediaProbe>) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.limits.clone(), probe, config.probe.timeout()))
    }

    pub fn limits(&self) -> &ClipLimits {
        &self.limits
    }

    /// Validate a clip, returning it with its probed metadata
    pub async fn validate(&self, clip: Clip) -> ClipResult<ValidatedClip> {
        debug!("Validating {}, size: {:.2}MB", clip.name(), clip.size_mib());

        self.check_size(&clip)?;
        self.check_format(&clip)?;

        let metadata = self.probe_metadata(&clip).await?;
        self.check_duration(&clip, &metadata)?;

        info!(
            "Validated {}: {:.2}s, {}x{}",
            clip.name(), metadata.duration, metadata.width, metadata.height
        );

        Ok(ValidatedClip { clip, metadata })
    }

    fn check_size(&self, clip: &Clip) -> ClipResult<()> {
        if clip.size() > self.limits.max_file_size {
            warn!("File size too large: {} ({:.2}MB)", clip.name(), clip.size_mib());
            return Err(ClipError::SizeLimitExceeded {
                limit: self.limits.max_file_size,
                actual: clip.size(),
            });
        }
        Ok(())
    }

    fn check_format(&self, clip: &Clip) -> ClipResult<()> {
        if !self.limits.supports(clip.mime_type()) {
            warn!("Unsupported format for {}: {:?}", clip.name(), clip.mime_type());
            return Err(ClipError::UnsupportedFormat {
                mime_type: clip.mime_type().to_string(),
            });
        }
        Ok(())
    }

    async fn probe_metadata(&self, clip: &Clip) -> ClipResult<ClipMetadata> {
        debug!("Probing {} with {}", clip.name(), self.probe.name());

        let metadata = tokio::time::timeout(self.probe_timeout, self.probe.probe(clip))
            .await
            .map_err(|_| {
                warn!("Probe of {} timed out after {:?}", clip.name(), self.probe_timeout);
                ClipError::UnreadableMedia {
                    reason: format!("probe timed out after {:.1}s", self.probe_timeout.as_secs_f64()),
                }
            })?
            .map_err(|e| {
                warn!("Cannot probe {}: {}", clip.name(), e);
                e
            })?;

        if metadata.duration.is_nan() || metadata.duration < 0.0 {
            return Err(ClipError::UnreadableMedia {
                reason: format!("probe reported invalid duration {}", metadata.duration),
            });
        }

        Ok(metadata)
    }

    fn check_duration(&self, clip: &Clip, metadata: &ClipMetadata) -> ClipResult<()> {
        // An unbounded (infinite) duration also lands here
        if metadata.duration > self.limits.max_duration {
            warn!("Video too long: {} ({}s)", clip.name(), metadata.duration);
            return Err(ClipError::DurationExceeded {
                limit: self.limits.max_duration,
                actual: metadata.duration,
            });
        }
        Ok(())
    }
}
