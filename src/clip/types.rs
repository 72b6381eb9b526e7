use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded video clip awaiting upload
///
/// Clips are immutable: renaming produces a new clip that shares the same
/// byte buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    name: String,
    mime_type: String,
    data: Bytes,
    last_modified: DateTime<Utc>,
}

impl Clip {
    /// Create a new clip stamped with the current time
    pub fn new<N, M, D>(name: N, mime_type: M, data: D) -> Self
    where
        N: Into<String>,
        M: Into<String>,
        D: Into<Bytes>,
    {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
            last_modified: Utc::now(),
        }
    }

    /// Filename the clip is uploaded under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type, e.g. `video/webm`
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw clip bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Size in MiB, for logging
    pub fn size_mib(&self) -> f64 {
        self.size() as f64 / (1024.0 * 1024.0)
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Get the file extension, if the name has one
    pub fn extension(&self) -> Option<&str> {
        split_extension(&self.name).1
    }

    /// Rewrap the same bytes under a new name, refreshing the timestamp
    pub fn renamed<N: Into<String>>(&self, name: N) -> Self {
        Self {
            name: name.into(),
            mime_type: self.mime_type.clone(),
            data: self.data.clone(),
            last_modified: Utc::now(),
        }
    }
}

/// Split a filename into stem and extension.
///
/// The extension is whatever follows the last dot, unless that dot starts the
/// name (".webm" is a stem, not an extension).
pub(crate) fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

/// Intrinsic properties reported by a media probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Duration in seconds
    pub duration: f64,
}

impl ClipMetadata {
    pub fn new(width: u32, height: u32, duration: f64) -> Self {
        Self { width, height, duration }
    }

    /// Duration rounded half-up to one decimal place
    pub fn rounded_duration(&self) -> f64 {
        // adding zero folds -0.0 into 0.0
        (self.duration * 10.0).round() / 10.0 + 0.0
    }

    /// Filename tag such as `_1280x720_4.2s`
    ///
    /// Whole seconds print without a fractional part (`_640x480_5s`).
    pub fn filename_tag(&self) -> String {
        format!("_{}x{}_{}s", self.width, self.height, self.rounded_duration())
    }
}

/// A clip that passed validation, together with its probed metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedClip {
    pub clip: Clip,
    pub metadata: ClipMetadata,
}

impl ValidatedClip {
    pub fn into_clip(self) -> Clip {
        self.clip
    }
}
