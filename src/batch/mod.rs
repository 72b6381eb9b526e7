//! # Batch Processing
//!
//! Resolves a list of clip sources, names each item after its position and
//! runs it through validation and enrichment. Failures are collected per item
//! instead of aborting the batch.

pub mod processor;
pub mod source;

pub use processor::{BatchOutcome, BatchProcessor, ClipFailure, ProcessingOutcome};
pub use source::{ClipSource, FileSource, MemorySource, SourcePayload};
