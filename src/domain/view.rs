//! Presentation state derived from the session

use crate::domain::session::{RecordingSession, SessionStatus};

/// Which primary control the UI should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryControl {
    Start,
    Stop,
}

/// View of the session for rendering. Pure function of the session;
/// holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Start when not recording, stop while recording
    pub primary: PrimaryControl,
    /// Submit is offered only when stopped with a captured clip
    pub can_submit: bool,
    /// A submission is in flight; submit is disabled
    pub busy: bool,
    /// Elapsed time as `m:ss`
    pub timer: String,
    /// Transcript text, if a submission has succeeded this cycle
    pub transcript: Option<String>,
}

impl ViewState {
    /// Derive the view from the current session
    pub fn derive(session: &RecordingSession) -> Self {
        let busy = session.status() == SessionStatus::Submitting;
        Self {
            primary: if session.is_recording() {
                PrimaryControl::Stop
            } else {
                PrimaryControl::Start
            },
            can_submit: session.status() == SessionStatus::Stopped
                && session.captured_audio().is_some(),
            busy,
            timer: session.elapsed().to_string(),
            transcript: session.transcript().map(str::to_owned),
        }
    }
}
