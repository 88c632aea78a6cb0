//! WAV encoding of captured samples
//!
//! Output is speech-optimized: 16 kHz mono 16-bit PCM, resampled from
//! the device rate when they differ.

use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};

use crate::application::ports::CaptureError;

/// Sample rate of encoded clips
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Encode mono samples at `source_rate` into a 16 kHz WAV container.
pub fn encode_wav(samples: &[i16], source_rate: u32) -> Result<Vec<u8>, CaptureError> {
    let resampled = resample_to_target(samples, source_rate)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
        for &sample in &resampled {
            writer
                .write_sample(sample)
                .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// Resample mono audio from the device rate to 16 kHz if needed.
fn resample_to_target(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| CaptureError::EncodeFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();

        // Pad the tail so the final block is full-length
        if chunk.len() < frames_needed {
            chunk.resize(frames_needed, 0.0);
        }

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| CaptureError::EncodeFailed(format!("Resampling failed: {}", e)))?;

        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        input_pos = end_pos;
    }

    output.truncate(output_len);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_wav_header() {
        let samples = vec![0i16; 1600];
        let bytes = encode_wav(&samples, TARGET_SAMPLE_RATE).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
    }

    #[test]
    fn encode_at_target_rate_keeps_sample_count() {
        let samples = vec![100i16; 16_000];
        let bytes = encode_wav(&samples, TARGET_SAMPLE_RATE).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 16_000);
    }

    #[test]
    fn resample_48k_to_16k_scales_length() {
        let samples = vec![0i16; 48_000];
        let resampled = resample_to_target(&samples, 48_000).unwrap();
        // The resampler carries some latency; the length lands near a third
        assert!(resampled.len() <= 16_000);
        assert!(resampled.len() > 14_000);
    }

    #[test]
    fn resample_noop_at_target_rate() {
        let samples = vec![1i16, 2, 3];
        let resampled = resample_to_target(&samples, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(resampled, samples);
    }
}
