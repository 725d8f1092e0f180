//! Watch command - classify a landmark stream and raise alerts.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use posture_watch_adapters::{
    classifier_path, default_log_path, JsonlLandmarkSource, JsonlPostureLog, LandmarkInput,
    TerminalBell,
};
use posture_watch_core::inference::{ClassifierOutput, LinearClassifier};
use posture_watch_core::pipeline::{
    AlertDispatcher, PostureMonitor, Predictor, DEFAULT_LABEL_MAX_LEN,
};
use posture_watch_core::{
    LandmarkSource, Notifier, PostureLog, ProgressEvent, ProgressSink, ResultOutput,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{ProgressBar, ReportLayout, ReportWriter};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// How the classifier's raw output is read.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModelOutput {
    /// Signed decision margin
    Margin,
    /// Logit of the probability of good posture
    Probability,
}

impl From<ModelOutput> for ClassifierOutput {
    fn from(value: ModelOutput) -> Self {
        match value {
            ModelOutput::Margin => Self::Margin,
            ModelOutput::Probability => Self::Probability,
        }
    }
}

/// Parse and validate a positive number of seconds.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{value} is not a positive number of seconds"))
    }
}

/// Parse and validate a window size (at least 1).
fn parse_window(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid frame count"))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("window must hold at least 1 frame".to_string())
    }
}

/// Arguments for the watch command.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct WatchArgs {
    /// JSONL landmark stream, or `-` for stdin
    pub input: PathBuf,

    /// Seconds of continuous bad posture before an alert
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub threshold: Option<f64>,

    /// Smoothing window in frames
    #[arg(long, value_name = "FRAMES", value_parser = parse_window)]
    pub window: Option<usize>,

    /// User id recorded with alerts
    #[arg(long)]
    pub user_id: Option<u32>,

    /// Classifier artifact (safetensors)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// How to read the classifier output
    #[arg(long, value_enum)]
    pub model_output: Option<ModelOutput>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Ignore any classifier and use the neck-angle heuristic
    #[arg(long)]
    pub no_model: bool,

    /// Posture log file for alerts
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Do not notify or record alerts
    #[arg(long)]
    pub no_alerts: bool,

    /// Do not ring the terminal bell on alerts
    #[arg(long)]
    pub no_bell: bool,

    /// Include overlay geometry in reports
    #[arg(long)]
    pub geometry: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl WatchArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in core config types and accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.no_alerts {
            if let Some(enabled) = config.alert.enabled {
                args.no_alerts = !enabled;
            }
        }

        args.threshold = args.threshold.or(config.alert.threshold_secs);
        args.window = args.window.or(config.smoothing.window);
        args.user_id = args.user_id.or(config.alert.user_id);

        if args.model.is_none() {
            args.model.clone_from(&config.model.path);
        }
        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.model.dir);
        }
        if args.model_output.is_none() {
            args.model_output = config
                .model
                .output
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "margin" => Some(ModelOutput::Margin),
                    "probability" => Some(ModelOutput::Probability),
                    _ => None,
                });
        }

        if args.log_file.is_none() {
            args.log_file.clone_from(&config.log.path);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }
        if !args.geometry {
            args.geometry = config.output.geometry.unwrap_or(false);
        }

        args.config = Some(config.clone());
        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Get label storage limit with fallback to the default.
    fn label_max_len(&self) -> usize {
        self.config
            .as_ref()
            .and_then(|c| c.log.label_max_len)
            .unwrap_or(DEFAULT_LABEL_MAX_LEN)
    }
}

/// Result of running the watch command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct WatchResult {
    /// Number of frames processed.
    pub processed: usize,
    /// Number of unreadable frames skipped.
    pub skipped: usize,
    /// Number of alerts fired.
    pub alerts: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the watch command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &WatchArgs) -> Result<WatchResult> {
    let input = LandmarkInput::from_arg(&args.input);
    if let LandmarkInput::File(path) = &input {
        if !path.is_file() {
            anyhow::bail!("Landmark file not found: {}", path.display());
        }
    }
    info!("Watching landmark stream {}", args.input.display());

    let mut config = args
        .config
        .as_ref()
        .map(AppConfig::monitor_config)
        .unwrap_or_default();
    if let Some(threshold) = args.threshold {
        config.alert.threshold_secs = threshold;
    }
    if let Some(window) = args.window {
        config.smoothing.window = window;
        config.smoothing.min_fill = config.smoothing.min_fill.min(window);
    }
    if let Some(user_id) = args.user_id {
        config.alert.user_id = user_id;
    }

    let model = load_model(args);
    let dispatcher = build_dispatcher(args)?;
    let mut monitor = PostureMonitor::new(config, model, dispatcher);

    let source = JsonlLandmarkSource::new(input);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);
    let layout = match args.format() {
        OutputFormat::Jsonl => ReportLayout::Lines,
        OutputFormat::Json => ReportLayout::Array {
            pretty: args.pretty,
        },
    };
    let output = ReportWriter::stdout(layout);

    let result = process_frames(&source, &mut monitor, &output, &progress_bar, args);
    let alerts = monitor.finish();
    let (processed, skipped) = result?;

    progress_bar.on_event(ProgressEvent::Finished {
        processed,
        skipped,
        alerts,
    });

    let exit_code = if alerts > 0 {
        ExitCode::AlertsRaised
    } else {
        ExitCode::Success
    };

    Ok(WatchResult {
        processed,
        skipped,
        alerts,
        exit_code,
    })
}

/// Loads the classifier, or returns `None` to run on the heuristic.
fn load_model(args: &WatchArgs) -> Option<Box<dyn Predictor>> {
    if args.no_model {
        info!("Classifier disabled by --no-model");
        return None;
    }

    let explicit = args.model.is_some();
    let path = args
        .model
        .clone()
        .unwrap_or_else(|| classifier_path(args.models_dir.as_deref()));

    if !path.exists() {
        if explicit {
            warn!("Classifier not found: {}", path.display());
        } else {
            info!("No classifier at {}", path.display());
        }
        return None;
    }

    let output = args.model_output.map(ClassifierOutput::from).unwrap_or_default();
    match LinearClassifier::load(&path, output) {
        Ok(classifier) => {
            info!("Loaded classifier {} ({output:?} output)", path.display());
            Some(Box::new(classifier))
        }
        Err(e) => {
            warn!("Failed to load classifier, using heuristic: {e:#}");
            None
        }
    }
}

/// Builds the alert side-effect dispatcher.
fn build_dispatcher(args: &WatchArgs) -> Result<AlertDispatcher> {
    if args.no_alerts {
        debug!("Alert side effects disabled");
        return Ok(AlertDispatcher::disabled());
    }

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    debug!("Recording alerts to {}", log_path.display());
    let log: Arc<dyn PostureLog> = Arc::new(JsonlPostureLog::new(log_path));

    let notifier: Option<Arc<dyn Notifier>> = if args.no_bell {
        None
    } else {
        Some(Arc::new(TerminalBell))
    };

    AlertDispatcher::spawn(Some(log), notifier, args.label_max_len())
}

/// Runs every frame through the monitor and writes the reports.
fn process_frames(
    source: &JsonlLandmarkSource,
    monitor: &mut PostureMonitor,
    output: &dyn ResultOutput,
    progress: &ProgressBar,
    args: &WatchArgs,
) -> Result<(usize, usize)> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for (index, frame_result) in source.frames().enumerate() {
        let frame = match frame_result {
            Ok(frame) => frame,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    index,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started { index, total });

        let mut report = monitor.process(&frame);
        if !args.geometry {
            report.geometry = None;
        }

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        output.write(&report)?;

        processed += 1;
    }

    output.flush()?;
    Ok((processed, skipped))
}
