//! Models command - locate and list classifier models.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use posture_watch_adapters::{list_models as adapter_list_models, models_dir, CLASSIFIER_FILENAME};

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List installed models
    List,
    /// Print model directory path
    Path,
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    let dir = args
        .models_dir
        .clone()
        .or_else(|| config.model.dir.clone())
        .unwrap_or_else(models_dir);

    match args.command {
        ModelsCommand::List => list_models(&dir),
        ModelsCommand::Path => {
            println!("{}", dir.display());
            Ok(())
        }
    }
}

fn list_models(dir: &std::path::Path) -> Result<()> {
    let models = adapter_list_models(dir)?;

    println!("Models directory: {}", dir.display());
    println!();

    for model in &models {
        let marker = if model.path.file_name().is_some_and(|n| n == CLASSIFIER_FILENAME) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {} ({} bytes)", model.name, model.size_bytes);
    }

    println!();
    if models.iter().any(|m| m.path.ends_with(CLASSIFIER_FILENAME)) {
        println!("Default classifier installed");
    } else {
        println!("Default classifier {CLASSIFIER_FILENAME} not installed; the heuristic will be used");
    }

    Ok(())
}
