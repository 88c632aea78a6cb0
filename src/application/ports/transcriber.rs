//! Transcription client port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clip::AudioClip;

/// Submission errors
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Transcription service returned HTTP {status}: {message}")]
    BadStatus { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Failed to build request: {0}")]
    InvalidRequest(String),
}

/// Port for submitting a captured clip to the transcription service.
///
/// One call is one best-effort attempt: no retries, no cancellation.
/// Callers gate concurrency; the trait assumes at most one submission
/// in flight.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Submit the clip and return the transcribed text.
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SubmitError>;
}
