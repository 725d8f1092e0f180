//! CLI command definitions and handlers.

pub mod models;
pub mod stats;
pub mod watch;

use clap::{Parser, Subcommand};

/// Posture Watch - Posture monitoring from body landmarks
#[derive(Parser)]
#[command(name = "posture-watch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify a landmark stream and raise bad-posture alerts
    Watch(watch::WatchArgs),
    /// Summarize recorded alerts per day
    Stats(stats::StatsArgs),
    /// Locate and list classifier models
    Models(models::ModelsArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Completed, no alert fired.
    Success,
    /// Completed, at least one alert fired.
    AlertsRaised,
    /// Failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::AlertsRaised => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
