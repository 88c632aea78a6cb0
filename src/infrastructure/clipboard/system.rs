//! Cross-platform clipboard adapter using arboard

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};

/// System clipboard backed by arboard (X11/Wayland/macOS/Windows)
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a new system clipboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();

        // arboard is blocking, so run off the async runtime
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

            clipboard
                .set_text(&text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }
}
