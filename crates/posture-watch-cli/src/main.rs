//! `posture-watch` - posture monitoring from body landmark streams.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load();

    match dispatch(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
    .into()
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(level))
        .init();
}

fn dispatch(command: Commands, config: &AppConfig) -> Result<ExitCode> {
    match command {
        Commands::Watch(args) => {
            let args = commands::watch::WatchArgs::with_config(args, config);
            let result = commands::watch::run(&args)?;
            info!(
                "Session done: {} frames, {} skipped, {} alert(s)",
                result.processed, result.skipped, result.alerts
            );
            Ok(result.exit_code)
        }
        Commands::Stats(args) => commands::stats::run(&args, config).map(|()| ExitCode::Success),
        Commands::Models(args) => {
            commands::models::run(&args, config).map(|()| ExitCode::Success)
        }
    }
}
