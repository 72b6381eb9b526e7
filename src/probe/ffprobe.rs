use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::clip::{Clip, ClipMetadata};
use crate::config::ProbeConfig;
use crate::error::{ClipError, ClipResult};
use crate::probe::MediaProbe;

/// Probe backed by the `ffprobe` executable
///
/// The clip is streamed over stdin. Containers that keep their index at the
/// end of the file (non-faststart MP4) may not be probeable this way and are
/// reported as unreadable.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: String,
}

impl FfprobeProbe {
    /// Create a probe that runs the given ffprobe executable
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.ffprobe_path.clone())
    }

    /// ffprobe arguments for JSON output read from stdin
    pub fn build_args() -> Vec<String> {
        [
            "-v", "error",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
            "-i", "pipe:0",
        ]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe(&self, clip: &Clip) -> ClipResult<ClipMetadata> {
        // kill_on_drop releases the process if this future is abandoned
        let mut child = Command::new(&self.program)
            .args(Self::build_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipError::ProbeUnavailable {
                reason: format!("failed to execute {}: {}", self.program, e),
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ClipError::ProbeUnavailable {
            reason: "ffprobe stdin was not captured".to_string(),
        })?;

        let data = clip.data().clone();
        let feed = async move {
            let result = stdin.write_all(&data).await;
            drop(stdin);
            result
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        if let Err(e) = fed {
            // ffprobe may stop reading once it has seen enough of the stream
            debug!("ffprobe closed stdin early for {}: {}", clip.name(), e);
        }

        let output = output.map_err(|e| ClipError::UnreadableMedia {
            reason: format!("ffprobe did not complete: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipError::UnreadableMedia {
                reason: format!("ffprobe exited with {}: {}", output.status, stderr.trim()),
            });
        }

        parse_ffprobe_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse ffprobe JSON output into clip metadata
///
/// Duration comes from the video stream, falling back to the container.
pub fn parse_ffprobe_json(json: &str) -> ClipResult<ClipMetadata> {
    let unreadable = |reason: &str| ClipError::UnreadableMedia { reason: reason.to_string() };

    let parsed: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        ClipError::UnreadableMedia {
            reason: format!("failed to parse ffprobe output: {}", e),
        }
    })?;

    let video_stream = parsed
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some("video"))
        })
        .ok_or_else(|| unreadable("no video stream found"))?;

    let width = video_stream
        .get("width")
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| unreadable("video stream has no valid width"))?;

    let height = video_stream
        .get("height")
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| unreadable("video stream has no valid height"))?;

    let duration = parse_duration(video_stream.get("duration"))
        .or_else(|| parse_duration(parsed.get("format").and_then(|f| f.get("duration"))))
        .ok_or_else(|| unreadable("duration unavailable"))?;

    Ok(ClipMetadata::new(width, height, duration))
}

// ffprobe prints durations as strings ("12.480000") or "N/A"
fn parse_duration(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
