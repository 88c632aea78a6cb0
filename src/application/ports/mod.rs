//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod capture;
pub mod clipboard;
pub mod config;
pub mod notifier;
pub mod transcriber;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, CueKind};
pub use capture::{CaptureController, CaptureError};
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use transcriber::{SubmitError, TranscriptionClient};
