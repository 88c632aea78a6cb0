//! VoxNote - voice recorder with one-shot transcription
//!
//! This crate records audio from the microphone and submits it to a
//! configured transcription endpoint, showing the returned text.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: The recording session state machine, value objects, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, HTTP, clipboard, etc.)
//! - **CLI**: Command-line interface and the interactive runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
