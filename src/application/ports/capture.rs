//! Capture controller port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clip::AudioClip;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access denied: {0}")]
    PermissionDenied(String),

    #[error("No audio input device available")]
    DeviceUnavailable,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture stream failed: {0}")]
    StreamFailed(String),

    #[error("No audio was captured")]
    EmptyCapture,

    #[error("Failed to encode audio: {0}")]
    EncodeFailed(String),
}

/// Port for the microphone capture lifecycle.
///
/// The adapter owns the device stream between `start` and
/// `stop`/`abort`; whichever way a recording ends, the stream must be
/// released so no hardware capture is leaked.
#[async_trait]
pub trait CaptureController: Send + Sync {
    /// Request microphone access and begin accumulating chunks.
    ///
    /// On failure no stream is left open and the caller's session is
    /// unchanged.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Finalize the capture: concatenate the accumulated chunks,
    /// encode them into one clip, and release the device stream.
    async fn stop(&self) -> Result<AudioClip, CaptureError>;

    /// Release the device stream and discard accumulated chunks.
    /// Used on error paths and shutdown; safe to call when idle.
    async fn abort(&self);

    /// Check if a capture stream is currently open
    fn is_capturing(&self) -> bool;
}
