//! Audio cue adapters

pub mod noop;
pub mod tone;

pub use noop::NoOpAudioCue;
pub use tone::ToneAudioCue;
