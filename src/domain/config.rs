//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::duration::Duration;

/// Default transcription endpoint, matching a locally running service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/transcribe";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub max_duration: Option<String>,
    pub notify: Option<bool>,
    pub copy: Option<bool>,
    pub cue: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            max_duration: Some("5m".to_string()),
            notify: Some(false),
            copy: Some(false),
            cue: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            max_duration: other.max_duration.or(self.max_duration),
            notify: other.notify.or(self.notify),
            copy: other.copy.or(self.copy),
            cue: other.cue.or(self.cue),
        }
    }

    /// Get the endpoint, or the default if not set
    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Get max_duration as parsed Duration, or default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_duration)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get copy setting, or false if not set
    pub fn copy_or_default(&self) -> bool {
        self.copy.unwrap_or(false)
    }

    /// Get cue setting, or false if not set
    pub fn cue_or_default(&self) -> bool {
        self.cue.unwrap_or(false)
    }
}
