use tracing::debug;

use crate::clip::types::split_extension;
use crate::clip::{Clip, ClipMetadata};
use crate::enrich::Enricher;

/// Tags WebM filenames with their resolution and duration
///
/// `video_0.webm` probed at 1280x720 for 4.23s becomes
/// `video_0_1280x720_4.2s.webm`, which lets the server pick a handling path
/// without probing the upload again.
#[derive(Debug, Clone, Default)]
pub struct WebmDimensionTagger;

impl WebmDimensionTagger {
    pub const MIME_TYPE: &'static str = "video/webm";

    pub fn new() -> Self {
        Self
    }

    /// Insert the metadata tag right before the extension
    pub fn tagged_name(name: &str, metadata: &ClipMetadata) -> String {
        let tag = metadata.filename_tag();
        match split_extension(name) {
            (stem, Some(extension)) => format!("{}{}.{}", stem, tag, extension),
            (stem, None) => format!("{}{}", stem, tag),
        }
    }
}

impl Enricher for WebmDimensionTagger {
    fn name(&self) -> &str {
        "webm-dimensions"
    }

    fn mime_type(&self) -> &str {
        Self::MIME_TYPE
    }

    fn enrich(&self, clip: &Clip, metadata: &ClipMetadata) -> Clip {
        let enriched = clip.renamed(Self::tagged_name(clip.name(), metadata));
        debug!("Enhanced WebM: {} -> {}", clip.name(), enriched.name());
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_inserted_before_extension() {
        let metadata = ClipMetadata::new(640, 480, 5.0);
        assert_eq!(
            WebmDimensionTagger::tagged_name("video_0.webm", &metadata),
            "video_0_640x480_5s.webm"
        );
        assert_eq!(
            WebmDimensionTagger::tagged_name("take.v2.webm", &metadata),
            "take.v2_640x480_5s.webm"
        );
        assert_eq!(
            WebmDimensionTagger::tagged_name("recording", &metadata),
            "recording_640x480_5s"
        );
    }

    #[test]
    fn test_enrich_keeps_bytes_and_type() {
        let tagger = WebmDimensionTagger::new();
        let clip = Clip::new("video_3.webm", "video/webm", vec![7u8; 64]);
        let metadata = ClipMetadata::new(1280, 720, 4.23);

        let enriched = tagger.enrich(&clip, &metadata);
        assert_eq!(enriched.name(), "video_3_1280x720_4.2s.webm");
        assert_eq!(enriched.mime_type(), "video/webm");
        assert_eq!(enriched.data(), clip.data());
    }

    #[test]
    fn test_enrich_is_deterministic_but_restamps() {
        let tagger = WebmDimensionTagger::new();
        let clip = Clip::new("video_1.webm", "video/webm", vec![1u8; 8]);
        let metadata = ClipMetadata::new(720, 1280, 9.96);

        let first = tagger.enrich(&clip, &metadata);
        let second = tagger.enrich(&clip, &metadata);

        assert_eq!(first.name(), second.name());
        assert_eq!(first.name(), "video_1_720x1280_10s.webm");
        assert!(first.last_modified() >= clip.last_modified());
        assert!(second.last_modified() >= first.last_modified());
    }
}
