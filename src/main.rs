//! VoxNote CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voxnote::cli::{
    app::{load_merged_config, run_interactive, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, RunOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voxnote::domain::config::AppConfig;
use voxnote::domain::duration::Duration;
use voxnote::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        max_duration: cli.max_duration.clone(),
        notify: if cli.notify { Some(true) } else { None },
        copy: if cli.copy { Some(true) } else { None },
        cue: if cli.cue { Some(true) } else { None },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse max duration
    let max_duration = match config.max_duration.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid max-duration: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_max_duration(),
    };

    let options = RunOptions {
        endpoint: config.endpoint_or_default().to_string(),
        max_duration,
        notify: config.notify_or_default(),
        copy: config.copy_or_default(),
        cue: config.cue_or_default(),
    };

    run_interactive(options).await
}
