//! JSON Lines posture log and daily statistics.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use posture_watch_core::PostureLog;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, warn};

/// One persisted alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureRecord {
    /// Time the alert was recorded, stored as RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// User the alert belongs to.
    pub user_id: u32,
    /// Defect label, truncated to the storage limit.
    pub label: String,
    /// Bad-posture duration the alert represents.
    pub duration_secs: f32,
}

/// Posture log appending records to a JSONL file.
pub struct JsonlPostureLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlPostureLog {
    /// Creates a log at `path`. The file and its parent directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, record: &PostureRecord) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open posture log: {}", self.path.display()))?;

        let mut line = serde_json::to_string(record).context("Failed to serialize record")?;
        line.push('\n');
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write posture log: {}", self.path.display()))?;

        debug!("Recorded {} for user {}", record.label, record.user_id);
        Ok(())
    }
}

impl PostureLog for JsonlPostureLog {
    fn log_posture(&self, user_id: u32, label: &str, duration_secs: f32) -> Result<()> {
        self.append(&PostureRecord {
            timestamp: OffsetDateTime::now_utc(),
            user_id,
            label: label.to_string(),
            duration_secs,
        })
    }
}

/// Default log location, `posture_log.jsonl` in the application data directory.
#[must_use]
pub fn default_log_path() -> PathBuf {
    crate::models::data_dir().join("posture_log.jsonl")
}

/// Reads every well-formed record from a log file.
///
/// A missing file has no records. Malformed lines are skipped with a warning.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_records(path: &Path) -> Result<Vec<PostureRecord>> {
    if !path.exists() {
        debug!("No posture log at {}", path.display());
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open posture log: {}", path.display()))?;

    let mut records = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed record on line {}: {e}", i + 1),
        }
    }
    Ok(records)
}

/// Total bad-posture time for one label on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// UTC calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Defect label.
    pub label: String,
    /// Number of alerts.
    pub alerts: usize,
    /// Summed duration in seconds.
    pub total_secs: f64,
}

impl DailyTotal {
    /// Summed duration in minutes.
    #[must_use]
    pub fn minutes(&self) -> f64 {
        self.total_secs / 60.0
    }
}

/// Aggregates records of `user_id` from the `days` before `now` by UTC date and label.
///
/// Results are ordered by date, then label.
#[must_use]
pub fn daily_totals(
    records: &[PostureRecord],
    user_id: u32,
    days: u32,
    now: OffsetDateTime,
) -> Vec<DailyTotal> {
    let since = now - Duration::days(i64::from(days));
    let mut totals: BTreeMap<(Date, String), (usize, f64)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.user_id == user_id) {
        let time = record.timestamp.to_offset(time::UtcOffset::UTC);
        if time < since || time > now {
            continue;
        }
        let entry = totals
            .entry((time.date(), record.label.clone()))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += f64::from(record.duration_secs);
    }

    totals
        .into_iter()
        .map(|((date, label), (alerts, total_secs))| DailyTotal {
            date: date.to_string(),
            label,
            alerts,
            total_secs,
        })
        .collect()
}
