//! # Clip-Packager
//!
//! Validate, tag and package short recorded video clips before they are uploaded.
//!
//! This library checks each clip against size, format and duration limits,
//! tags WebM filenames with their probed resolution and length, and assembles
//! the surviving clips into a `multipart/form-data` submission. It never
//! decodes or re-encodes media.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clip_packager::{
//!     batch::FileSource,
//!     config::Config,
//!     package::ClipPackager,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let packager = ClipPackager::with_ffprobe(Config::default())?;
//!
//! let clips = vec![
//!     FileSource::new("recordings/take_1.webm"),
//!     FileSource::new("recordings/take_2.webm"),
//! ];
//!
//! let payload = packager
//!     .package(&clips, vec![("frame_type", "strip")])
//!     .await?;
//!
//! let form = payload.to_form()?;
//! let response = reqwest::Client::new()
//!     .post("https://example.com/api/recordings")
//!     .multipart(form)
//!     .send()
//!     .await?;
//! println!("{} clips uploaded: {}", payload.file_count(), response.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`clip`] - Clip payloads and limit validation
//! - [`probe`] - Reading width, height and duration from a clip
//! - [`enrich`] - Per-format filename tagging
//! - [`batch`] - Failure-isolating batch processing
//! - [`package`] - Submission assembly and multipart encoding
//! - [`config`] - Configuration management
//!
//! ## Custom Probes
//!
//! Anything that can report a clip's dimensions can stand in for ffprobe by
//! implementing the [`MediaProbe`](probe::MediaProbe) trait:
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use clip_packager::clip::{Clip, ClipMetadata};
//! use clip_packager::error::ClipResult;
//! use clip_packager::probe::MediaProbe;
//!
//! struct FixedProbe;
//!
//! #[async_trait]
//! impl MediaProbe for FixedProbe {
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//!
//!     async fn probe(&self, _clip: &Clip) -> ClipResult<ClipMetadata> {
//!         Ok(ClipMetadata::new(1280, 720, 8.0))
//!     }
//! }
//! ```

pub mod batch;
pub mod clip;
pub mod config;
pub mod enrich;
pub mod error;
pub mod package;
pub mod probe;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use crate::{
    batch::{BatchOutcome, BatchProcessor, ClipSource},
    clip::{Clip, ClipMetadata, ClipValidator},
    config::Config,
    error::{ClipError, PackageError, PackagerError, Result},
    package::{ClipPackager, SubmissionPayload},
    probe::MediaProbe,
};
