//! Audio cue port interface

use async_trait::async_trait;
use thiserror::Error;

/// Audio cue errors
#[derive(Debug, Clone, Error)]
pub enum AudioCueError {
    #[error("No audio output device available: {0}")]
    DeviceNotAvailable(String),

    #[error("Cue playback failed: {0}")]
    PlaybackFailed(String),
}

/// Cue kinds played at recording boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    RecordingStart,
    RecordingStop,
}

/// Port for short audible feedback tones
#[async_trait]
pub trait AudioCue: Send + Sync {
    /// Play a cue. Failures are non-fatal to the session.
    async fn play(&self, kind: CueKind) -> Result<(), AudioCueError>;
}

/// Blanket implementation for boxed cue types
#[async_trait]
impl AudioCue for Box<dyn AudioCue> {
    async fn play(&self, kind: CueKind) -> Result<(), AudioCueError> {
        self.as_ref().play(kind).await
    }
}
