//! Helpers shared by the unit tests.
//!
//! Test clips carry their metadata in a text header
//! (`SCRIPTED w=640 h=480 d=5.0\n`) padded with zeros to the requested size,
//! and [`ScriptedProbe`] reads it back, so tests never need ffprobe.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::batch::MemorySource;
use crate::clip::{Clip, ClipMetadata};
use crate::error::{ClipError, ClipResult};
use crate::probe::MediaProbe;

pub const MIB: usize = 1024 * 1024;

/// Bytes whose header describes the given metadata
pub fn scripted_bytes(size: usize, width: u32, height: u32, duration: f64) -> Bytes {
    let header = format!("SCRIPTED w={} h={} d={}\n", width, height, duration);
    let mut data = header.into_bytes();
    if data.len() < size {
        data.resize(size, 0);
    }
    Bytes::from(data)
}

pub fn scripted_clip(name: &str, mime_type: &str, size: usize, duration: f64) -> Clip {
    Clip::new(name, mime_type, scripted_bytes(size, 640, 480, duration))
}

pub fn scripted_source(mime_type: &str, size: usize, duration: f64) -> MemorySource {
    MemorySource::new(scripted_bytes(size, 640, 480, duration), mime_type)
}

/// Probe that decodes the scripted header and counts its invocations
#[derive(Default)]
pub struct ScriptedProbe {
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe that sleeps before answering
    pub fn slow(delay: Duration) -> Self {
        Self { calls: AtomicUsize::new(0), delay: Some(delay) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn parse_header(data: &[u8]) -> Option<ClipMetadata> {
    let end = data.iter().position(|&b| b == b'\n')?;
    let header = std::str::from_utf8(&data[..end]).ok()?;
    let mut parts = header.split_whitespace();
    if parts.next()? != "SCRIPTED" {
        return None;
    }

    let mut metadata = ClipMetadata::new(0, 0, 0.0);
    for part in parts {
        let (key, value) = part.split_once('=')?;
        match key {
            "w" => metadata.width = value.parse().ok()?,
            "h" => metadata.height = value.parse().ok()?,
            "d" => metadata.duration = value.parse().ok()?,
            _ => return None,
        }
    }
    Some(metadata)
}

#[async_trait]
impl MediaProbe for ScriptedProbe {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self, clip: &Clip) -> ClipResult<ClipMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        parse_header(clip.data()).ok_or_else(|| ClipError::UnreadableMedia {
            reason: "no scripted header".to_string(),
        })
    }
}
