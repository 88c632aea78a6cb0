//! Rodio-based audio cue adapter
//!
//! Plays short synthesized chimes at recording boundaries.

use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::application::ports::{AudioCue, AudioCueError, CueKind};

/// Audio cue implementation using rodio
pub struct ToneAudioCue;

impl ToneAudioCue {
    /// Create a new tone-based audio cue
    pub fn new() -> Self {
        Self
    }
}

impl Default for ToneAudioCue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCue for ToneAudioCue {
    async fn play(&self, kind: CueKind) -> Result<(), AudioCueError> {
        // Playback blocks until the chime finishes
        tokio::task::spawn_blocking(move || play_sync(kind))
            .await
            .map_err(|e| AudioCueError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// A short sine tone with a fade-in to avoid clicks
fn chime(freq: f32, duration_ms: u64) -> impl Source<Item = f32> + Send {
    const AMPLITUDE: f32 = 0.3;
    let fade = Duration::from_millis((duration_ms / 5).min(30));
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(fade)
        .amplify(AMPLITUDE)
}

fn play_sync(kind: CueKind) -> Result<(), AudioCueError> {
    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| AudioCueError::DeviceNotAvailable(e.to_string()))?;

    let sink = Sink::try_new(&handle).map_err(|e| AudioCueError::PlaybackFailed(e.to_string()))?;

    match kind {
        CueKind::RecordingStart => {
            // Ascending major third: C5 -> E5
            sink.append(chime(523.0, 80));
            sink.append(chime(659.0, 120));
        }
        CueKind::RecordingStop => {
            // Descending major third: E5 -> C5
            sink.append(chime(659.0, 80));
            sink.append(chime(523.0, 120));
        }
    }

    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn can_play_start_cue() {
        let cue = ToneAudioCue::new();
        assert!(cue.play(CueKind::RecordingStart).await.is_ok());
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn can_play_stop_cue() {
        let cue = ToneAudioCue::new();
        assert!(cue.play(CueKind::RecordingStop).await.is_ok());
    }
}
