//! # Clip Module
//!
//! The clip payload itself, the metadata a probe reports for it, and the
//! validator that enforces size, format and duration limits.

pub mod types;
pub mod validator;

pub use types::{Clip, ClipMetadata, ValidatedClip};
pub use validator::ClipValidator;
