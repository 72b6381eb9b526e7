//! # Clip Enrichment
//!
//! Enrichment rewrites a validated clip's filename from its probed metadata
//! without touching the bytes. Strategies are keyed by MIME type; a clip
//! whose type has no registered strategy passes through unchanged.
//!
//! ## Built-in Enrichers
//!
//! - **WebM**: tags the filename with `_<width>x<height>_<duration>s`
//!
//! ## Usage
//!
//! ```rust
//! use clip_packager::clip::{Clip, ClipMetadata, ValidatedClip};
//! use clip_packager::enrich::EnricherRegistry;
//!
//! let registry = EnricherRegistry::new();
//! let validated = ValidatedClip {
//!     clip: Clip::new("video_0.webm", "video/webm", vec![0u8; 16]),
//!     metadata: ClipMetadata::new(640, 480, 5.0),
//! };
//!
//! let enriched = registry.enrich(validated);
//! assert_eq!(enriched.name(), "video_0_640x480_5s.webm");
//! ```

pub mod registry;
pub mod traits;
pub mod webm;

pub use registry::EnricherRegistry;
pub use traits::Enricher;
pub use webm::WebmDimensionTagger;
