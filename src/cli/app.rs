//! Interactive app runner
//!
//! Runs the record/stop/submit loop on the terminal. Enter toggles
//! recording, `s` submits the captured clip, `q` quits. A one-second
//! ticker drives the timer while recording; Ctrl-C releases the
//! microphone before exiting.

use std::process::ExitCode;

use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration as StdDuration, MissedTickBehavior};

use crate::application::ports::{
    AudioCue, CaptureController, Clipboard, ConfigStore, Notifier, TranscriptionClient,
};
use crate::application::{SessionOptions, SessionService};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalCapture, DesktopNotifier, HttpTranscriptionClient, NoOpAudioCue, SystemClipboard,
    ToneAudioCue, XdgConfigStore,
};

use super::args::RunOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Merge configuration sources: defaults, then the config file,
/// then CLI arguments (highest precedence).
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Run the interactive session with the real adapters
pub async fn run_interactive(options: RunOptions) -> ExitCode {
    let cue: Box<dyn AudioCue> = if options.cue {
        Box::new(ToneAudioCue::new())
    } else {
        Box::new(NoOpAudioCue::new())
    };

    let service = SessionService::new(
        CpalCapture::new(),
        HttpTranscriptionClient::new(options.endpoint.clone()),
        DesktopNotifier::new(),
        SystemClipboard::new(),
        cue,
        SessionOptions {
            notify: options.notify,
            copy: options.copy,
        },
    );

    run_loop(service, &options, Presenter::new()).await
}

async fn run_loop<C, T, N, B, A>(
    mut service: SessionService<C, T, N, B, A>,
    options: &RunOptions,
    mut presenter: Presenter,
) -> ExitCode
where
    C: CaptureController,
    T: TranscriptionClient,
    N: Notifier,
    B: Clipboard,
    A: AudioCue,
{
    let max_secs = options.max_duration.as_secs();

    presenter.info(&format!("Endpoint: {}", options.endpoint));
    presenter.transcript(None);
    presenter.key_hints(false);

    let mut lines = BufReader::new(stdin()).lines();
    let mut ticker = interval(StdDuration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let recording = service.session().is_recording();

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    // stdin closed or unreadable
                    _ => {
                        presenter.stop_spinner();
                        service.abort().await;
                        return ExitCode::from(EXIT_SUCCESS);
                    }
                };

                match line.trim() {
                    "" => {
                        if service.session().is_recording() {
                            stop_recording(&mut service, &mut presenter).await;
                        } else {
                            match service.start().await {
                                Ok(()) => {
                                    ticker.reset();
                                    presenter.show_recording("0:00");
                                }
                                Err(e) => presenter.error(&e.to_string()),
                            }
                        }
                    }
                    "s" => {
                        if service.view().can_submit {
                            submit(&mut service, &mut presenter).await;
                        } else if service.session().is_recording() {
                            presenter.warn("Still recording. Press Enter to stop first");
                        } else {
                            presenter.warn("Nothing to submit. Press Enter to record");
                        }
                    }
                    "q" => {
                        presenter.stop_spinner();
                        service.abort().await;
                        return ExitCode::from(EXIT_SUCCESS);
                    }
                    other => {
                        presenter.warn(&format!("Unknown command: {:?}", other));
                        presenter.key_hints(service.view().can_submit);
                    }
                }
            }
            _ = ticker.tick(), if recording => {
                let elapsed = service.tick();
                presenter.update_recording(&elapsed.to_string());

                if elapsed.as_secs() >= max_secs {
                    presenter.stop_spinner();
                    presenter.warn(&format!(
                        "Maximum recording length reached ({})",
                        options.max_duration
                    ));
                    stop_recording(&mut service, &mut presenter).await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                presenter.stop_spinner();
                service.abort().await;
                presenter.info("Interrupted");
                return ExitCode::from(EXIT_SUCCESS);
            }
        }
    }
}

async fn stop_recording<C, T, N, B, A>(
    service: &mut SessionService<C, T, N, B, A>,
    presenter: &mut Presenter,
) where
    C: CaptureController,
    T: TranscriptionClient,
    N: Notifier,
    B: Clipboard,
    A: AudioCue,
{
    presenter.stop_spinner();
    match service.stop().await {
        Ok(()) => {
            let size = service
                .session()
                .captured_audio()
                .map(|clip| clip.human_readable_size())
                .unwrap_or_else(|| "empty".to_string());
            presenter.success(&format!(
                "Recording stopped at {} ({})",
                service.session().elapsed(),
                size
            ));
            presenter.key_hints(service.view().can_submit);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            presenter.key_hints(false);
        }
    }
}

async fn submit<C, T, N, B, A>(
    service: &mut SessionService<C, T, N, B, A>,
    presenter: &mut Presenter,
) where
    C: CaptureController,
    T: TranscriptionClient,
    N: Notifier,
    B: Clipboard,
    A: AudioCue,
{
    presenter.start_spinner("Transcribing...");
    match service.submit().await {
        Ok(outcome) => {
            presenter.spinner_success("Transcription complete");
            presenter.transcript(Some(&outcome.text));
            if outcome.copied {
                presenter.info("Copied to clipboard");
            } else if let Some(e) = outcome.copy_error {
                presenter.warn(&format!("Clipboard copy failed: {}", e));
            }
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
        }
    }
    presenter.key_hints(service.view().can_submit);
}
