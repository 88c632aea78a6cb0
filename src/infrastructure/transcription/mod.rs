//! Transcription client adapters

pub mod http;

pub use http::HttpTranscriptionClient;
