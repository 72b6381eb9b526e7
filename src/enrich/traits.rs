use crate::clip::{Clip, ClipMetadata};

/// A filename/metadata rewrite applied to one container format
///
/// Enrichers never fail: everything that could go wrong with a clip has
/// already been reported by validation.
pub trait Enricher: Send + Sync {
    /// Returns the unique name of this enricher
    fn name(&self) -> &str;

    /// MIME type this enricher applies to
    fn mime_type(&self) -> &str;

    /// Produce the enriched clip
    ///
    /// Implementations keep the clip's bytes and MIME type and may only change
    /// its name and timestamp.
    fn enrich(&self, clip: &Clip, metadata: &ClipMetadata) -> Clip;
}
