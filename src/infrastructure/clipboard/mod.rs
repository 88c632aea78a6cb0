//! Clipboard adapters

pub mod system;

pub use system::SystemClipboard;
