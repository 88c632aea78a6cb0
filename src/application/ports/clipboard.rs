//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for copying the transcript to the system clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Copy text to the clipboard.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}
