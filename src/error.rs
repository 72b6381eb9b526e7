use thiserror::Error;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / BYTES_PER_MIB
}

/// Main error type for the clip-packager library
#[derive(Error, Debug)]
pub enum PackagerError {
    #[error("Clip processing error: {0}")]
    Clip(#[from] ClipError),

    #[error("Packaging error: {0}")]
    Package(#[from] PackageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Per-clip errors
///
/// These never escape a batch: the batch processor turns each one into a
/// failure record and moves on to the next clip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    #[error("File size exceeds {}MB limit ({:.2}MB)", mib(.limit), mib(.actual))]
    SizeLimitExceeded { limit: u64, actual: u64 },

    #[error("Unsupported video format: {mime_type}")]
    UnsupportedFormat { mime_type: String },

    #[error("Video duration exceeds {limit}s limit ({actual:.2}s)")]
    DurationExceeded { limit: f64, actual: f64 },

    #[error("Cannot load video for validation: {reason}")]
    UnreadableMedia { reason: String },

    #[error("Failed to resolve clip source {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Media probe unavailable: {reason}")]
    ProbeUnavailable { reason: String },
}

/// Payload assembly errors
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("No videos could be processed successfully ({original_count} submitted)")]
    NoViableClips { original_count: usize },

    #[error("Failed to encode processing summary: {reason}")]
    SummaryEncoding { reason: String },

    #[error("Invalid form part '{name}': {reason}")]
    InvalidPart { name: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PackagerError
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Result alias for operations on a single clip
pub type ClipResult<T> = std::result::Result<T, ClipError>;

impl PackagerError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Clip(clip) => clip.is_recoverable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Package(PackageError::NoViableClips { original_count }) => {
                format!(
                    "None of the {} recorded clips could be prepared for upload. Please record again.",
                    original_count
                )
            }
            Self::Clip(clip) => clip.to_string(),
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

impl ClipError {
    /// Whether the same clip could pass on another attempt
    ///
    /// Limit and format violations are properties of the clip itself; only
    /// environmental failures (source fetch, missing probe) may clear up.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::ProbeUnavailable { .. }
        )
    }
}
