//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual transcript output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Format the live recording line shown while the timer runs
    pub fn format_recording(&self, timer: &str) -> String {
        format!("{} Recording {} (Enter to stop)", "●".red(), timer)
    }

    /// Show the live recording spinner
    pub fn show_recording(&mut self, timer: &str) {
        let line = self.format_recording(timer);
        self.start_spinner(&line);
    }

    /// Update the live recording timer
    pub fn update_recording(&self, timer: &str) {
        let line = self.format_recording(timer);
        self.update_spinner(&line);
    }

    /// Print the transcript panel
    pub fn transcript(&self, text: Option<&str>) {
        eprintln!();
        match text {
            Some(t) => println!("{}", t),
            None => eprintln!("{}", "Your transcribed text will appear here...".dimmed()),
        }
        eprintln!();
    }

    /// Print the key hints for the interactive session
    pub fn key_hints(&self, can_submit: bool) {
        if can_submit {
            eprintln!(
                "{}",
                "Enter: re-record | s: submit | q: quit".dimmed()
            );
        } else {
            eprintln!("{}", "Enter: record | q: quit".dimmed());
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_recording_contains_timer() {
        let presenter = Presenter::new();
        let line = presenter.format_recording("0:05");
        assert!(line.contains("0:05"));
        assert!(line.contains("Recording"));
    }

    #[test]
    fn format_recording_mentions_stop_key() {
        let presenter = Presenter::new();
        let line = presenter.format_recording("1:05");
        assert!(line.contains("Enter to stop"));
    }
}
