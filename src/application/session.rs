//! Recording session use case
//!
//! Drives the session state machine over the ports. Every user-facing
//! event (start, stop, tick, submit, abort) is a method; the domain
//! session decides which transitions are legal and this service wires
//! in the capture device, the transcription endpoint, and the optional
//! feedback adapters.

use thiserror::Error;

use crate::domain::elapsed::Elapsed;
use crate::domain::session::{InvalidTransition, RecordingSession};
use crate::domain::view::ViewState;

use super::ports::{
    AudioCue, CaptureController, CaptureError, Clipboard, ClipboardError, CueKind,
    NotificationIcon, Notifier, SubmitError, TranscriptionClient,
};

/// Errors from the session use case
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Recording failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Submission failed: {0}")]
    Submit(#[from] SubmitError),

    #[error("{0}")]
    State(#[from] InvalidTransition),

    #[error("Nothing captured to submit")]
    NothingToSubmit,
}

/// Feature toggles for the optional feedback adapters
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Show desktop notifications
    pub notify: bool,
    /// Copy the transcript to the clipboard after a successful submission
    pub copy: bool,
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The transcribed text, exactly as returned by the service
    pub text: String,
    /// Whether the clipboard copy succeeded (if enabled)
    pub copied: bool,
    /// Clipboard failure, if copying was enabled and did not succeed.
    /// Non-fatal; the caller decides how to present it.
    pub copy_error: Option<ClipboardError>,
}

/// Long-lived session service. One instance manages exactly one
/// session across any number of record/submit cycles.
pub struct SessionService<C, T, N, B, A>
where
    C: CaptureController,
    T: TranscriptionClient,
    N: Notifier,
    B: Clipboard,
    A: AudioCue,
{
    session: RecordingSession,
    capture: C,
    client: T,
    notifier: N,
    clipboard: B,
    cue: A,
    options: SessionOptions,
}

impl<C, T, N, B, A> SessionService<C, T, N, B, A>
where
    C: CaptureController,
    T: TranscriptionClient,
    N: Notifier,
    B: Clipboard,
    A: AudioCue,
{
    /// Create a new session service in the idle state
    pub fn new(
        capture: C,
        client: T,
        notifier: N,
        clipboard: B,
        cue: A,
        options: SessionOptions,
    ) -> Self {
        Self {
            session: RecordingSession::new(),
            capture,
            client,
            notifier,
            clipboard,
            cue,
            options,
        }
    }

    /// Get the current session
    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    /// Derive the presentation state
    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.session)
    }

    /// Start a new recording.
    ///
    /// The capture device is acquired first; the session only
    /// transitions (and prior capture/transcript are only discarded)
    /// once the stream is open. On failure the session is untouched and
    /// the user is notified.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if !self.session.is_ready() {
            return Err(InvalidTransition {
                current_status: self.session.status(),
                action: "start recording",
            }
            .into());
        }

        if let Err(e) = self.capture.start().await {
            self.notify("Recording failed", &e.to_string(), NotificationIcon::Error)
                .await;
            return Err(e.into());
        }

        self.session.begin_recording()?;
        self.play_cue(CueKind::RecordingStart).await;
        self.notify("Recording", "Microphone is live", NotificationIcon::Recording)
            .await;
        Ok(())
    }

    /// One timer tick: advance the clock by a second while recording.
    /// A tick in any other state is a no-op.
    pub fn tick(&mut self) -> Elapsed {
        self.session.tick();
        self.session.elapsed()
    }

    /// Stop the current recording, storing the captured clip.
    /// No-op when not recording.
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        if !self.session.is_recording() {
            return Ok(());
        }

        match self.capture.stop().await {
            Ok(clip) => {
                self.session.finish_recording(clip)?;
                self.play_cue(CueKind::RecordingStop).await;
                Ok(())
            }
            Err(e) => {
                // The adapter has already released the stream; drop the cycle.
                self.session.abort_recording();
                self.notify("Recording failed", &e.to_string(), NotificationIcon::Error)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Abandon an in-flight recording, releasing the device.
    /// Used on shutdown; safe to call in any state.
    pub async fn abort(&mut self) {
        if self.session.is_recording() {
            self.capture.abort().await;
            self.session.abort_recording();
        }
    }

    /// Submit the captured clip for transcription.
    ///
    /// One best-effort attempt. On success the transcript is stored and
    /// returned; on failure the transcript is untouched and the session
    /// returns to Stopped with the clip intact for retry.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        let Some(clip) = self.session.captured_audio().cloned() else {
            return Err(SessionError::NothingToSubmit);
        };
        self.session.begin_submission()?;
        self.notify("Transcribing", "Submitting recording...", NotificationIcon::Processing)
            .await;

        match self.client.transcribe(&clip).await {
            Ok(text) => {
                self.session.complete_submission(text.clone())?;

                let (copied, copy_error) = if self.options.copy {
                    match self.clipboard.copy(&text).await {
                        Ok(()) => (true, None),
                        Err(e) => (false, Some(e)),
                    }
                } else {
                    (false, None)
                };

                self.notify("Transcription complete", &text, NotificationIcon::Success)
                    .await;
                Ok(SubmitOutcome {
                    text,
                    copied,
                    copy_error,
                })
            }
            Err(e) => {
                self.session.fail_submission()?;
                self.notify("Transcription failed", &e.to_string(), NotificationIcon::Error)
                    .await;
                Err(e.into())
            }
        }
    }

    async fn notify(&self, title: &str, message: &str, icon: NotificationIcon) {
        if self.options.notify {
            let _ = self.notifier.notify(title, message, icon).await;
        }
    }

    async fn play_cue(&self, kind: CueKind) {
        // The adapter chosen at wiring time decides whether anything is audible
        let _ = self.cue.play(kind).await;
    }
}
