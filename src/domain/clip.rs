//! Audio clip value object

use std::fmt;

/// Container formats a clip can be encoded in.
/// The capture adapter produces WAV; the others exist so clips loaded
/// from elsewhere can still be described and submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Wav,
    Ogg,
    Webm,
}

impl AudioFormat {
    /// Get the MIME type string
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}

/// Value object representing one captured recording, ready for submission.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioClip {
    /// Create a clip from encoded bytes
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the encoded bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the container format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Upload filename, extension matching the actual encoding
    pub fn file_name(&self) -> String {
        format!("recording.{}", self.format.extension())
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mime_types() {
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
        assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
        assert_eq!(AudioFormat::Webm.mime_type(), "audio/webm");
    }

    #[test]
    fn file_name_matches_encoding() {
        let clip = AudioClip::new(vec![1, 2, 3], AudioFormat::Wav);
        assert_eq!(clip.file_name(), "recording.wav");

        let clip = AudioClip::new(vec![1, 2, 3], AudioFormat::Webm);
        assert_eq!(clip.file_name(), "recording.webm");
    }

    #[test]
    fn default_format_is_wav() {
        assert_eq!(AudioFormat::default(), AudioFormat::Wav);
    }

    #[test]
    fn clip_size() {
        let clip = AudioClip::new(vec![0u8; 1024], AudioFormat::Wav);
        assert_eq!(clip.size_bytes(), 1024);
    }

    #[test]
    fn human_readable_sizes() {
        assert_eq!(
            AudioClip::new(vec![0u8; 500], AudioFormat::Wav).human_readable_size(),
            "500 B"
        );
        assert_eq!(
            AudioClip::new(vec![0u8; 2048], AudioFormat::Wav).human_readable_size(),
            "2.0 KB"
        );
        assert_eq!(
            AudioClip::new(vec![0u8; 2 * 1024 * 1024], AudioFormat::Wav).human_readable_size(),
            "2.0 MB"
        );
    }

    #[test]
    fn into_data_returns_bytes() {
        let clip = AudioClip::new(vec![1, 2, 3, 4], AudioFormat::Wav);
        assert_eq!(clip.into_data(), vec![1, 2, 3, 4]);
    }
}
