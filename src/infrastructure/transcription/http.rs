//! HTTP transcription client adapter
//!
//! Uploads the clip as multipart form data to a configured endpoint
//! and expects `200 OK` with a JSON body `{ "text": string }`.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{SubmitError, TranscriptionClient};
use crate::domain::clip::AudioClip;

/// Multipart field name the service expects for the audio part
const UPLOAD_FIELD: &str = "file";

/// How much of an error body to carry into the error message
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: Option<String>,
}

/// Transcription client for a remote speech-to-text HTTP service
pub struct HttpTranscriptionClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTranscriptionClient {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(clip: &AudioClip) -> Result<multipart::Form, SubmitError> {
        let part = multipart::Part::bytes(clip.data().to_vec())
            .file_name(clip.file_name())
            .mime_str(clip.format().mime_type())
            .map_err(|e| SubmitError::InvalidRequest(e.to_string()))?;

        Ok(multipart::Form::new().part(UPLOAD_FIELD, part))
    }

    /// Extract the transcript from a response body
    fn extract_text(body: &[u8]) -> Result<String, SubmitError> {
        let response: TranscribeResponse =
            serde_json::from_slice(body).map_err(|e| SubmitError::MalformedBody(e.to_string()))?;

        response
            .text
            .ok_or_else(|| SubmitError::MalformedBody("response has no \"text\" field".into()))
    }

    fn error_message(body: &[u8]) -> String {
        let mut message = String::from_utf8_lossy(body).into_owned();
        if message.len() > ERROR_BODY_LIMIT {
            // Walk back to a char boundary; a fixed byte cut can split a
            // multibyte character and panic
            let mut cut = ERROR_BODY_LIMIT;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
            message.push_str("...");
        }
        message
    }
}

#[async_trait]
impl TranscriptionClient for HttpTranscriptionClient {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SubmitError> {
        let form = Self::build_form(clip)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::BadStatus {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        Self::extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_from_valid_body() {
        let text = HttpTranscriptionClient::extract_text(br#"{"text":"hello world"}"#).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn extract_text_is_verbatim() {
        // No trimming, empty strings included
        let text = HttpTranscriptionClient::extract_text(br#"{"text":"  padded  "}"#).unwrap();
        assert_eq!(text, "  padded  ");

        let text = HttpTranscriptionClient::extract_text(br#"{"text":""}"#).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn extract_text_ignores_extra_fields() {
        let text =
            HttpTranscriptionClient::extract_text(br#"{"status":"ok","text":"hi"}"#).unwrap();
        assert_eq!(text, "hi");
    }

    #[test]
    fn extract_text_missing_field_is_malformed() {
        let err = HttpTranscriptionClient::extract_text(br#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::MalformedBody(_)));
    }

    #[test]
    fn extract_text_non_json_is_malformed() {
        let err = HttpTranscriptionClient::extract_text(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, SubmitError::MalformedBody(_)));
    }

    #[test]
    fn error_message_truncates_long_bodies() {
        let body = vec![b'x'; 1000];
        let message = HttpTranscriptionClient::error_message(&body);
        assert!(message.len() <= ERROR_BODY_LIMIT + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn error_message_truncates_multibyte_on_char_boundary() {
        // A two-byte character straddling the byte limit
        let mut body = vec![b'x'; ERROR_BODY_LIMIT - 1];
        body.extend_from_slice("é".as_bytes());
        let message = HttpTranscriptionClient::error_message(&body);
        assert!(message.ends_with("..."));
        assert!(message.len() <= ERROR_BODY_LIMIT + 3);

        // Entirely multibyte body
        let body = "é".repeat(ERROR_BODY_LIMIT);
        let message = HttpTranscriptionClient::error_message(body.as_bytes());
        assert!(message.ends_with("..."));
        assert!(message.len() <= ERROR_BODY_LIMIT + 3);
    }

    #[test]
    fn client_stores_endpoint() {
        let client = HttpTranscriptionClient::new("http://localhost:8000/transcribe");
        assert_eq!(client.endpoint(), "http://localhost:8000/transcribe");
    }
}
