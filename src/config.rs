use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default upload size limit: 50 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Default clip length limit in seconds
pub const DEFAULT_MAX_DURATION: f64 = 30.0;

/// Main configuration for the clip packager
///
/// Every section falls back to its defaults when missing from a TOML file, so
/// a config only needs to name the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size, format and duration limits applied to every clip
    pub limits: ClipLimits,

    /// Media probe settings
    pub probe: ProbeConfig,

    /// Naming of the submission payload fields
    pub submission: SubmissionConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        self.probe.validate()?;
        self.submission.validate()?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Clip acceptance limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipLimits {
    /// Maximum clip size in bytes (inclusive)
    pub max_file_size: u64,

    /// Maximum clip duration in seconds (inclusive)
    pub max_duration: f64,

    /// Accepted MIME types, matched exactly
    pub supported_formats: Vec<String>,
}

impl Default for ClipLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_duration: DEFAULT_MAX_DURATION,
            supported_formats: vec!["video/webm".to_string(), "video/mp4".to_string()],
        }
    }
}

impl ClipLimits {
    /// Check whether a MIME type is on the allow-list (case-sensitive)
    pub fn supports(&self, mime_type: &str) -> bool {
        self.supported_formats.iter().any(|format| format == mime_type)
    }

    fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(invalid("limits.max_file_size", self.max_file_size).into());
        }

        if !self.max_duration.is_finite() || self.max_duration <= 0.0 {
            return Err(invalid("limits.max_duration", self.max_duration).into());
        }

        if self.supported_formats.is_empty() {
            return Err(invalid("limits.supported_formats", "[]").into());
        }

        if let Some(blank) = self.supported_formats.iter().find(|f| f.trim().is_empty()) {
            return Err(invalid("limits.supported_formats", format!("{:?}", blank)).into());
        }

        Ok(())
    }
}

/// Media probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path or name of the ffprobe executable
    pub ffprobe_path: String,

    /// Upper bound on a single probe, in seconds
    pub timeout_secs: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
            timeout_secs: 10.0,
        }
    }
}

impl ProbeConfig {
    /// Probe timeout as a `Duration`
    ///
    /// Call [`Config::validate`] first; a non-positive timeout collapses to zero.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(Duration::ZERO)
    }

    fn validate(&self) -> Result<()> {
        if self.ffprobe_path.trim().is_empty() {
            return Err(invalid("probe.ffprobe_path", &self.ffprobe_path).into());
        }

        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(invalid("probe.timeout_secs", self.timeout_secs).into());
        }

        Ok(())
    }
}

/// Submission payload naming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Multipart field every processed clip is attached under
    pub file_field: String,

    /// Multipart field carrying the JSON processing summary
    pub summary_field: String,

    /// Prefix of the filename synthesized for each batch item
    pub filename_prefix: String,

    /// Extension of the filename synthesized for each batch item
    pub filename_extension: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            file_field: "files".to_string(),
            summary_field: "client_processing_info".to_string(),
            filename_prefix: "video".to_string(),
            filename_extension: "webm".to_string(),
        }
    }
}

impl SubmissionConfig {
    /// Filename assigned to the batch item at `index`, e.g. `video_3.webm`
    pub fn filename_for(&self, index: usize) -> String {
        format!("{}_{}.{}", self.filename_prefix, index, self.filename_extension)
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("submission.file_field", &self.file_field),
            ("submission.summary_field", &self.summary_field),
            ("submission.filename_prefix", &self.filename_prefix),
            ("submission.filename_extension", &self.filename_extension),
        ];

        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(invalid(key, value).into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits.max_file_size, 52_428_800);
        assert_eq!(config.limits.max_duration, 30.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("packager.toml");

        let mut original_config = Config::default();
        original_config.limits.max_duration = 12.5;
        original_config.submission.file_field = "clips".to_string();

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[limits]\nmax_duration = 15.0\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.limits.max_duration, 15.0);
        assert_eq!(config.limits.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.submission.summary_field, "client_processing_info");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(
            err,
            crate::error::PackagerError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_format_membership_is_case_sensitive() {
        let limits = ClipLimits::default();
        assert!(limits.supports("video/webm"));
        assert!(limits.supports("video/mp4"));
        assert!(!limits.supports("video/WebM"));
        assert!(!limits.supports("video/quicktime"));
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = Config::default();
        config.limits.max_file_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.max_duration = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.supported_formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_probe_timeout() {
        let mut config = Config::default();
        config.probe.timeout_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_synthesized_filename() {
        let submission = SubmissionConfig::default();
        assert_eq!(submission.filename_for(0), "video_0.webm");
        assert_eq!(submission.filename_for(12), "video_12.webm");
    }
}
