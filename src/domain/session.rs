//! Recording session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::clip::AudioClip;
use crate::domain::elapsed::Elapsed;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Recording,
    Stopped,
    Submitting,
}

impl SessionStatus {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
            Self::Submitting => "submitting",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted.
/// The session is left untouched; callers decide whether to surface
/// it or treat the event as a no-op.
#[derive(Debug, Clone, Error)]
#[error("cannot {action} while in {current_status} state")]
pub struct InvalidTransition {
    pub current_status: SessionStatus,
    pub action: &'static str,
}

/// Recording session entity.
///
/// State machine:
///   IDLE/STOPPED -> RECORDING  (begin_recording; clears capture + transcript)
///   RECORDING    -> STOPPED    (finish_recording; stores the clip)
///   RECORDING    -> IDLE       (abort_recording; discards everything)
///   STOPPED      -> SUBMITTING (begin_submission; requires a clip)
///   SUBMITTING   -> STOPPED    (complete_submission / fail_submission)
///
/// Idle and Stopped are both ready-to-record states; there is no
/// terminal state. Ticks only advance the clock while Recording, so a
/// stray tick after stop cannot touch a finished session.
#[derive(Debug, Default)]
pub struct RecordingSession {
    status: SessionStatus,
    elapsed: Elapsed,
    captured: Option<AudioClip>,
    transcript: Option<String>,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Get the elapsed recording time
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    /// Get the captured clip, if a recording has been stopped this cycle
    pub fn captured_audio(&self) -> Option<&AudioClip> {
        self.captured.as_ref()
    }

    /// Get the transcript, if a submission has succeeded this cycle
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.status == SessionStatus::Recording
    }

    /// Check if a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.status == SessionStatus::Submitting
    }

    /// Check if the session is ready to start a new recording
    pub fn is_ready(&self) -> bool {
        matches!(self.status, SessionStatus::Idle | SessionStatus::Stopped)
    }

    /// Transition into RECORDING from a ready state.
    /// Discards any prior capture and transcript and resets the clock.
    pub fn begin_recording(&mut self) -> Result<(), InvalidTransition> {
        if !self.is_ready() {
            return Err(InvalidTransition {
                current_status: self.status,
                action: "start recording",
            });
        }
        self.captured = None;
        self.transcript = None;
        self.elapsed = Elapsed::zero();
        self.status = SessionStatus::Recording;
        Ok(())
    }

    /// Advance the clock by one second. No-op outside RECORDING.
    pub fn tick(&mut self) {
        if self.status == SessionStatus::Recording {
            self.elapsed.advance();
        }
    }

    /// Transition RECORDING -> STOPPED, storing the captured clip.
    pub fn finish_recording(&mut self, clip: AudioClip) -> Result<(), InvalidTransition> {
        if self.status != SessionStatus::Recording {
            return Err(InvalidTransition {
                current_status: self.status,
                action: "stop recording",
            });
        }
        self.captured = Some(clip);
        self.status = SessionStatus::Stopped;
        Ok(())
    }

    /// Transition RECORDING -> IDLE, discarding capture state.
    /// No-op in any other state.
    pub fn abort_recording(&mut self) {
        if self.status == SessionStatus::Recording {
            self.captured = None;
            self.elapsed = Elapsed::zero();
            self.status = SessionStatus::Idle;
        }
    }

    /// Transition STOPPED -> SUBMITTING. Requires a captured clip.
    pub fn begin_submission(&mut self) -> Result<(), InvalidTransition> {
        if self.status != SessionStatus::Stopped || self.captured.is_none() {
            return Err(InvalidTransition {
                current_status: self.status,
                action: "submit",
            });
        }
        self.status = SessionStatus::Submitting;
        Ok(())
    }

    /// Transition SUBMITTING -> STOPPED with the service's text.
    pub fn complete_submission(&mut self, text: String) -> Result<(), InvalidTransition> {
        if self.status != SessionStatus::Submitting {
            return Err(InvalidTransition {
                current_status: self.status,
                action: "complete submission",
            });
        }
        self.transcript = Some(text);
        self.status = SessionStatus::Stopped;
        Ok(())
    }

    /// Transition SUBMITTING -> STOPPED leaving the transcript untouched.
    /// The clip stays captured so the user can retry the same submission.
    pub fn fail_submission(&mut self) -> Result<(), InvalidTransition> {
        if self.status != SessionStatus::Submitting {
            return Err(InvalidTransition {
                current_status: self.status,
                action: "fail submission",
            });
        }
        self.status = SessionStatus::Stopped;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clip::{AudioClip, AudioFormat};

    fn clip() -> AudioClip {
        AudioClip::new(vec![0u8; 64], AudioFormat::Wav)
    }

    #[test]
    fn new_session_is_idle() {
        let session = RecordingSession::new();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.is_ready());
        assert!(session.captured_audio().is_none());
        assert!(session.transcript().is_none());
        assert_eq!(session.elapsed().as_secs(), 0);
    }

    #[test]
    fn begin_recording_from_idle() {
        let mut session = RecordingSession::new();
        assert!(session.begin_recording().is_ok());
        assert!(session.is_recording());
    }

    #[test]
    fn begin_recording_while_recording_fails() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();

        let err = session.begin_recording().unwrap_err();
        assert_eq!(err.current_status, SessionStatus::Recording);
        assert!(session.is_recording());
    }

    #[test]
    fn tick_advances_only_while_recording() {
        let mut session = RecordingSession::new();
        session.tick();
        assert_eq!(session.elapsed().as_secs(), 0);

        session.begin_recording().unwrap();
        session.tick();
        session.tick();
        session.tick();
        assert_eq!(session.elapsed().as_secs(), 3);

        session.finish_recording(clip()).unwrap();
        session.tick();
        assert_eq!(session.elapsed().as_secs(), 3, "no stray ticks after stop");
    }

    #[test]
    fn finish_recording_stores_clip() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();

        assert_eq!(session.status(), SessionStatus::Stopped);
        assert!(session.captured_audio().is_some());
    }

    #[test]
    fn finish_recording_from_idle_fails_and_changes_nothing() {
        let mut session = RecordingSession::new();
        let err = session.finish_recording(clip()).unwrap_err();
        assert_eq!(err.current_status, SessionStatus::Idle);
        assert!(session.captured_audio().is_none());
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn new_recording_discards_prior_cycle() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.tick();
        session.finish_recording(clip()).unwrap();
        session.begin_submission().unwrap();
        session.complete_submission("hello".into()).unwrap();

        session.begin_recording().unwrap();
        assert_eq!(session.elapsed().as_secs(), 0);
        assert!(session.captured_audio().is_none());
        assert!(session.transcript().is_none());
    }

    #[test]
    fn abort_recording_returns_to_idle() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.tick();
        session.abort_recording();

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.elapsed().as_secs(), 0);
        assert!(session.captured_audio().is_none());
    }

    #[test]
    fn abort_recording_is_noop_when_not_recording() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();
        session.abort_recording();
        assert_eq!(session.status(), SessionStatus::Stopped);
        assert!(session.captured_audio().is_some());
    }

    #[test]
    fn begin_submission_requires_clip() {
        let mut session = RecordingSession::new();
        let err = session.begin_submission().unwrap_err();
        assert_eq!(err.current_status, SessionStatus::Idle);
    }

    #[test]
    fn begin_submission_while_submitting_fails() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();
        session.begin_submission().unwrap();

        let err = session.begin_submission().unwrap_err();
        assert_eq!(err.current_status, SessionStatus::Submitting);
    }

    #[test]
    fn complete_submission_sets_transcript() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();
        session.begin_submission().unwrap();
        session.complete_submission("hello world".into()).unwrap();

        assert_eq!(session.status(), SessionStatus::Stopped);
        assert_eq!(session.transcript(), Some("hello world"));
    }

    #[test]
    fn fail_submission_keeps_clip_and_transcript() {
        let mut session = RecordingSession::new();
        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();
        session.begin_submission().unwrap();
        session.fail_submission().unwrap();

        assert_eq!(session.status(), SessionStatus::Stopped);
        assert!(session.transcript().is_none());
        assert!(session.captured_audio().is_some(), "clip intact for retry");

        // The same clip can be resubmitted
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn full_cycle() {
        let mut session = RecordingSession::new();

        session.begin_recording().unwrap();
        session.finish_recording(clip()).unwrap();
        session.begin_submission().unwrap();
        session.complete_submission("first".into()).unwrap();
        assert_eq!(session.transcript(), Some("first"));

        // Next cycle starts from Stopped
        session.begin_recording().unwrap();
        assert!(session.is_recording());
    }

    #[test]
    fn status_display() {
        assert_eq!(SessionStatus::Idle.to_string(), "idle");
        assert_eq!(SessionStatus::Recording.to_string(), "recording");
        assert_eq!(SessionStatus::Stopped.to_string(), "stopped");
        assert_eq!(SessionStatus::Submitting.to_string(), "submitting");
    }

    #[test]
    fn invalid_transition_display() {
        let err = InvalidTransition {
            current_status: SessionStatus::Submitting,
            action: "start recording",
        };
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("submitting"));
    }
}
