//! # Media Probing
//!
//! Probing reads a clip's intrinsic width, height and duration without
//! decoding it. The packager only depends on the [`MediaProbe`] trait; the
//! bundled [`FfprobeProbe`] shells out to `ffprobe` and feeds it the clip
//! over stdin, so nothing is written to disk.

pub mod ffprobe;
pub mod traits;

pub use ffprobe::FfprobeProbe;
pub use traits::MediaProbe;
