//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::duration::Duration;

/// VoxNote - record your voice and turn it into text
#[derive(Parser, Debug)]
#[command(name = "voxnote")]
#[command(version = "0.1.0")]
#[command(about = "Record your voice and turn it into text")]
#[command(long_about = None)]
pub struct Cli {
    /// Transcription endpoint URL
    #[arg(short = 'e', long, value_name = "URL", env = "VOXNOTE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Maximum recording length (e.g., 30s, 1m, 2m30s)
    #[arg(long, value_name = "TIME")]
    pub max_duration: Option<String>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Copy the transcript to the clipboard
    #[arg(short = 'c', long)]
    pub copy: bool,

    /// Play audio cues when recording starts and stops
    #[arg(long)]
    pub cue: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for the interactive session
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub endpoint: String,
    pub max_duration: Duration,
    pub notify: bool,
    pub copy: bool,
    pub cue: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "max_duration", "notify", "copy", "cue"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voxnote"]);
        assert!(cli.endpoint.is_none());
        assert!(cli.max_duration.is_none());
        assert!(!cli.notify);
        assert!(!cli.copy);
        assert!(!cli.cue);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_endpoint() {
        let cli = Cli::parse_from(["voxnote", "-e", "http://host:9000/transcribe"]);
        assert_eq!(cli.endpoint, Some("http://host:9000/transcribe".to_string()));
    }

    #[test]
    fn cli_parses_max_duration() {
        let cli = Cli::parse_from(["voxnote", "--max-duration", "2m"]);
        assert_eq!(cli.max_duration, Some("2m".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["voxnote", "-n", "-c", "--cue"]);
        assert!(cli.notify);
        assert!(cli.copy);
        assert!(cli.cue);
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["voxnote", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voxnote", "config", "set", "notify", "true"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "notify");
            assert_eq!(value, "true");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("max_duration"));
        assert!(is_valid_config_key("cue"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
