//! # Submission Packaging
//!
//! Runs a batch through the processor and assembles what survived into a
//! multipart submission, together with a JSON summary of what was dropped.

pub mod packager;
pub mod payload;

pub use packager::ClipPackager;
pub use payload::{FormPart, PartBody, ProcessingSummary, SubmissionPayload};
