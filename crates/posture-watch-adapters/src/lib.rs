//! Posture Watch Adapters - External adapters for posture-watch.
//!
//! This crate provides adapters for:
//! - JSON Lines landmark streams (file or stdin)
//! - Posture log persistence and daily statistics
//! - Terminal bell notifications
//! - Classifier artifact location

pub mod landmarks;
pub mod log;
pub mod models;
pub mod notify;

pub use landmarks::{JsonlLandmarkSource, LandmarkInput};
pub use log::{daily_totals, default_log_path, read_records, DailyTotal, JsonlPostureLog, PostureRecord};
pub use models::{classifier_path, list_models, models_dir, ModelEntry, CLASSIFIER_FILENAME};
pub use notify::TerminalBell;
