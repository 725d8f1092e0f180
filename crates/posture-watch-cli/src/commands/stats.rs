//! Stats command - summarize recorded alerts per day.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use posture_watch_adapters::{daily_totals, default_log_path, read_records, DailyTotal};
use time::OffsetDateTime;

use crate::config::AppConfig;

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable table
    #[default]
    Text,
    /// JSON array of daily totals
    Json,
}

/// Arguments for the stats command
#[derive(Args)]
pub struct StatsArgs {
    /// User to report on
    #[arg(long)]
    pub user_id: Option<u32>,

    /// Number of days to include
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,

    /// Posture log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
    pub format: StatsFormat,
}

/// Run the stats command.
pub fn run(args: &StatsArgs, config: &AppConfig) -> Result<()> {
    let user_id = args.user_id.or(config.alert.user_id).unwrap_or(1);
    let path = args
        .log_file
        .clone()
        .or_else(|| config.log.path.clone())
        .unwrap_or_else(default_log_path);

    let records = read_records(&path)?;
    let totals = daily_totals(&records, user_id, args.days, OffsetDateTime::now_utc());

    match args.format {
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(&totals).context("Failed to serialize stats")?;
            println!("{json}");
        }
        StatsFormat::Text => print_table(&totals, user_id, args.days),
    }
    Ok(())
}

fn print_table(totals: &[DailyTotal], user_id: u32, days: u32) {
    println!("Bad posture for user {user_id}, last {days} day(s)");
    println!();

    if totals.is_empty() {
        println!("  No alerts recorded");
        return;
    }

    for total in totals {
        println!(
            "  {}  {:<20} {:>4} alert(s) {:>8.1} min",
            total.date,
            total.label,
            total.alerts,
            total.minutes()
        );
    }

    println!();
    let minutes: f64 = totals.iter().map(DailyTotal::minutes).sum();
    println!("Total: {minutes:.1} min");
}
