//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod clip;
pub mod config;
pub mod duration;
pub mod elapsed;
pub mod error;
pub mod session;
pub mod view;

// Re-export common types
pub use clip::{AudioClip, AudioFormat};
pub use config::AppConfig;
pub use duration::Duration;
pub use elapsed::Elapsed;
pub use error::*;
pub use session::{InvalidTransition, RecordingSession, SessionStatus};
pub use view::{PrimaryControl, ViewState};
