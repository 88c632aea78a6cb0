//! No-op audio cue for silent operation

use async_trait::async_trait;

use crate::application::ports::{AudioCue, AudioCueError, CueKind};

/// Audio cue that plays nothing
pub struct NoOpAudioCue;

impl NoOpAudioCue {
    /// Create a new no-op audio cue
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAudioCue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCue for NoOpAudioCue {
    async fn play(&self, _kind: CueKind) -> Result<(), AudioCueError> {
        Ok(())
    }
}
