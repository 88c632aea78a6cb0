//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio device, the transcription endpoint,
//! and the desktop environment.

pub mod capture;
pub mod clipboard;
pub mod config;
pub mod cue;
pub mod notification;
pub mod transcription;

// Re-export adapters
pub use capture::CpalCapture;
pub use clipboard::SystemClipboard;
pub use config::XdgConfigStore;
pub use cue::{NoOpAudioCue, ToneAudioCue};
pub use notification::DesktopNotifier;
pub use transcription::HttpTranscriptionClient;
