//! Microphone capture adapter using cpal
//!
//! The stream lives on a dedicated thread because cpal::Stream is not
//! Send. Sample buffers from the input callback are appended as chunks
//! to an ordered sequence scoped to one recording cycle; stop
//! concatenates them and encodes one WAV clip.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};

use super::wav::{encode_wav, TARGET_SAMPLE_RATE};
use crate::application::ports::{CaptureController, CaptureError};
use crate::domain::clip::{AudioClip, AudioFormat};

/// How long start() waits for the device thread to report readiness
const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Capture controller backed by the default cpal input device.
pub struct CpalCapture {
    /// Ordered chunk sequence for the current cycle (mono i16 at device rate)
    chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
    /// Device sample rate (may differ from the 16kHz target)
    device_sample_rate: Arc<AtomicU32>,
    /// Capture state; clearing it tells the stream thread to shut down
    capturing: Arc<AtomicBool>,
    /// Stream thread for the current cycle; joined on stop/abort so the
    /// device is released before the next cycle can begin
    stream_thread: StdMutex<Option<JoinHandle<()>>>,
}

impl CpalCapture {
    /// Create a new cpal-based capture controller
    pub fn new() -> Self {
        Self {
            chunks: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            capturing: Arc::new(AtomicBool::new(false)),
            stream_thread: StdMutex::new(None),
        }
    }

    /// Wait for the stream thread to drop its stream and exit.
    /// No-op when no thread is pending.
    async fn join_stream_thread(&self) {
        let handle = match self.stream_thread.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _ = tokio::task::spawn_blocking(move || handle.join()).await;
        }
    }

    /// Mix interleaved frames down to mono
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Pick an input configuration, preferring mono and the target rate
    fn pick_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported = device
            .supported_input_configs()
            .map_err(map_configs_error)?;

        let mut best: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best = Some(config);
            }
        }

        let range = best.ok_or(CaptureError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            range.min_sample_rate()
        };

        let sample_format = range.sample_format();
        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Stream thread body: acquire the device, run the stream until the
    /// capturing flag clears, then drop the stream (releasing the device).
    /// The startup result is reported once through `ready_tx`.
    fn run_stream(
        chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
        device_sample_rate: Arc<AtomicU32>,
        capturing: Arc<AtomicBool>,
        ready_tx: mpsc::Sender<Result<(), CaptureError>>,
    ) {
        let mut startup = || -> Result<cpal::Stream, CaptureError> {
            let device = cpal::default_host()
                .default_input_device()
                .ok_or(CaptureError::DeviceUnavailable)?;

            let (config, sample_format) = Self::pick_input_config(&device)?;
            let channels = config.channels;
            device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

            let stream = match sample_format {
                SampleFormat::I16 => {
                    let chunks = Arc::clone(&chunks);
                    let capturing = Arc::clone(&capturing);
                    device
                        .build_input_stream(
                            &config,
                            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                                if capturing.load(Ordering::SeqCst) {
                                    let mono = CpalCapture::downmix(data, channels);
                                    if let Ok(mut chunks) = chunks.lock() {
                                        chunks.push(mono);
                                    }
                                }
                            },
                            |err| eprintln!("Audio stream error: {}", err),
                            None,
                        )
                        .map_err(map_build_error)?
                }

                SampleFormat::F32 => {
                    let chunks = Arc::clone(&chunks);
                    let capturing = Arc::clone(&capturing);
                    device
                        .build_input_stream(
                            &config,
                            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                                if capturing.load(Ordering::SeqCst) {
                                    let as_i16: Vec<i16> =
                                        data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                    let mono = CpalCapture::downmix(&as_i16, channels);
                                    if let Ok(mut chunks) = chunks.lock() {
                                        chunks.push(mono);
                                    }
                                }
                            },
                            |err| eprintln!("Audio stream error: {}", err),
                            None,
                        )
                        .map_err(map_build_error)?
                }

                _ => {
                    return Err(CaptureError::StartFailed(
                        "Unsupported sample format".into(),
                    ))
                }
            };

            stream
                .play()
                .map_err(|e| CaptureError::StartFailed(e.to_string()))?;

            Ok(stream)
        };

        let stream = match startup() {
            Ok(stream) => {
                let _ = ready_tx.send(Ok(()));
                stream
            }
            Err(e) => {
                capturing.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        while capturing.load(Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(50));
        }

        drop(stream);
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureController for CpalCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".into(),
            ));
        }

        // Reap a previous cycle's thread before opening a new stream
        self.join_stream_thread().await;

        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.clear();
        }
        self.capturing.store(true, Ordering::SeqCst);

        let (ready_tx, ready_rx) = mpsc::channel();
        let chunks = Arc::clone(&self.chunks);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let capturing = Arc::clone(&self.capturing);

        let handle = std::thread::spawn(move || {
            Self::run_stream(chunks, device_sample_rate, capturing, ready_tx);
        });
        if let Ok(mut guard) = self.stream_thread.lock() {
            *guard = Some(handle);
        }

        // Wait for the stream thread to report, off the async runtime
        let started =
            tokio::task::spawn_blocking(move || ready_rx.recv_timeout(STARTUP_TIMEOUT))
                .await
                .map_err(|e| CaptureError::StartFailed(format!("Task join error: {}", e)))?;

        match started {
            Ok(result) => {
                if result.is_err() {
                    self.join_stream_thread().await;
                }
                result
            }
            Err(_) => {
                // The thread may be stuck in a driver call; leave the
                // handle so the next stop/abort/start reaps it
                self.capturing.store(false, Ordering::SeqCst);
                Err(CaptureError::StartFailed(
                    "Timed out waiting for audio device".into(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<AudioClip, CaptureError> {
        if !self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StreamFailed("No capture in progress".into()));
        }

        self.capturing.store(false, Ordering::SeqCst);
        self.join_stream_thread().await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::StreamFailed("Sample rate not set".into()));
        }

        let chunks = {
            let mut chunks = self
                .chunks
                .lock()
                .map_err(|_| CaptureError::StreamFailed("Chunk buffer poisoned".into()))?;
            std::mem::take(&mut *chunks)
        };

        let samples: Vec<i16> = chunks.concat();
        if samples.is_empty() {
            return Err(CaptureError::EmptyCapture);
        }

        // Encoding is CPU-bound; keep it off the event loop
        let bytes = tokio::task::spawn_blocking(move || encode_wav(&samples, sample_rate))
            .await
            .map_err(|e| CaptureError::EncodeFailed(format!("Task join error: {}", e)))??;

        Ok(AudioClip::new(bytes, AudioFormat::Wav))
    }

    async fn abort(&self) {
        self.capturing.store(false, Ordering::SeqCst);
        self.join_stream_thread().await;

        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.clear();
        }
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }
}

/// Map cpal stream-build failures onto the capture taxonomy
fn map_build_error(e: cpal::BuildStreamError) -> CaptureError {
    match e {
        cpal::BuildStreamError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        cpal::BuildStreamError::BackendSpecific { err } => {
            let description = err.description;
            let lower = description.to_lowercase();
            if lower.contains("denied") || lower.contains("permission") {
                CaptureError::PermissionDenied(description)
            } else {
                CaptureError::StartFailed(description)
            }
        }
        other => CaptureError::StartFailed(other.to_string()),
    }
}

/// Map config-enumeration failures onto the capture taxonomy
fn map_configs_error(e: cpal::SupportedStreamConfigsError) -> CaptureError {
    match e {
        cpal::SupportedStreamConfigsError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        other => CaptureError::StartFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_single_channel_is_identity() {
        let mono = vec![100i16, 200, 300];
        assert_eq!(CpalCapture::downmix(&mono, 1), mono);
    }

    #[test]
    fn downmix_averages_stereo_frames() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(CpalCapture::downmix(&stereo, 2), vec![150, 350]);
    }

    #[test]
    fn new_capture_is_idle() {
        let capture = CpalCapture::new();
        assert!(!capture.is_capturing());
    }

    #[tokio::test]
    async fn stop_without_start_reports_no_capture() {
        let capture = CpalCapture::new();
        let err = capture.stop().await.unwrap_err();
        assert!(matches!(err, CaptureError::StreamFailed(_)));
    }

    #[tokio::test]
    async fn abort_when_idle_is_safe() {
        let capture = CpalCapture::new();
        capture.abort().await;
        assert!(!capture.is_capturing());
    }

    /// Plant a fake stream thread that loops on the capturing flag,
    /// mirroring run_stream's shutdown path.
    fn plant_stream_thread(capture: &CpalCapture) -> Arc<AtomicBool> {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&capture.capturing);
        let done = Arc::clone(&finished);

        capture.capturing.store(true, Ordering::SeqCst);
        let handle = std::thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(10));
            }
            done.store(true, Ordering::SeqCst);
        });
        if let Ok(mut guard) = capture.stream_thread.lock() {
            *guard = Some(handle);
        }

        finished
    }

    #[tokio::test]
    async fn stop_joins_stream_thread_before_returning() {
        let capture = CpalCapture::new();
        let finished = plant_stream_thread(&capture);

        // Fails on the missing sample rate, but only after the thread
        // has exited; a lingering thread could feed a later cycle
        let _ = capture.stop().await;

        assert!(finished.load(Ordering::SeqCst));
        assert!(!capture.is_capturing());
        assert!(capture.stream_thread.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn abort_joins_stream_thread_before_returning() {
        let capture = CpalCapture::new();
        let finished = plant_stream_thread(&capture);

        capture.abort().await;

        assert!(finished.load(Ordering::SeqCst));
        assert!(!capture.is_capturing());
        assert!(capture.stream_thread.lock().unwrap().is_none());
    }

    #[test]
    fn build_error_maps_device_not_available() {
        let err = map_build_error(cpal::BuildStreamError::DeviceNotAvailable);
        assert!(matches!(err, CaptureError::DeviceUnavailable));
    }

    #[test]
    fn build_error_maps_permission_denied() {
        let err = map_build_error(cpal::BuildStreamError::BackendSpecific {
            err: cpal::BackendSpecificError {
                description: "Access denied by the user".into(),
            },
        });
        assert!(matches!(err, CaptureError::PermissionDenied(_)));
    }
}
