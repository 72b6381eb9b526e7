use async_trait::async_trait;

use crate::clip::{Clip, ClipMetadata};
use crate::error::ClipResult;

/// Capability that reads a clip's dimensions and duration
///
/// Implementations acquire whatever handle they need (a child process, a
/// playback surface) for the duration of one call and must release it on
/// every exit path, including when the returned future is dropped early.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Returns the name of this probe, for logging
    fn name(&self) -> &str;

    /// Read the clip's metadata
    ///
    /// Corrupt or unreadable data is reported as
    /// [`ClipError::UnreadableMedia`](crate::error::ClipError::UnreadableMedia).
    async fn probe(&self, clip: &Clip) -> ClipResult<ClipMetadata>;
}
