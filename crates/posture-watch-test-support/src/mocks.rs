//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::bail;
use posture_watch_core::domain::{FrameReport, LandmarkFrame};
use posture_watch_core::ports::{
    LandmarkSource, Notifier, PostureLog, ProgressEvent, ProgressSink, ResultOutput,
};

/// Mock implementation of `LandmarkSource` for testing.
///
/// Yields pre-built frames and tracks iteration for assertions.
pub struct MockLandmarkSource {
    frames: Vec<LandmarkFrame>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockLandmarkSource {
    /// Creates a new mock source with the given frames.
    #[must_use]
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frames,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl LandmarkSource for MockLandmarkSource {
    fn frames(&self) -> Box<dyn Iterator<Item = anyhow::Result<LandmarkFrame>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.frames.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}

/// A persisted alert as seen by [`MockPostureLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedPosture {
    /// User id passed to the log.
    pub user_id: u32,
    /// Label as stored.
    pub label: String,
    /// Episode duration in seconds.
    pub duration_secs: f32,
}

/// Mock implementation of `PostureLog` for testing.
///
/// Captures records for later assertions. Clones share the same records.
#[derive(Clone, Default)]
pub struct MockPostureLog {
    records: Arc<Mutex<Vec<LoggedPosture>>>,
}

impl MockPostureLog {
    /// Creates a new mock log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<LoggedPosture> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PostureLog for MockPostureLog {
    fn log_posture(&self, user_id: u32, label: &str, duration_secs: f32) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoggedPosture {
                user_id,
                label: label.to_string(),
                duration_secs,
            });
        Ok(())
    }
}

/// `PostureLog` whose writes always fail.
#[derive(Clone, Default)]
pub struct FailingPostureLog {
    attempts: Arc<Mutex<usize>>,
}

impl FailingPostureLog {
    /// Creates a new failing log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of write attempts.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PostureLog for FailingPostureLog {
    fn log_posture(&self, _user_id: u32, _label: &str, _duration_secs: f32) -> anyhow::Result<()> {
        *self.attempts.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        bail!("database is locked")
    }
}

/// Mock implementation of `Notifier` for testing.
///
/// Counts notifications; optionally fails every call.
#[derive(Clone, Default)]
pub struct MockNotifier {
    count: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockNotifier {
    /// Creates a notifier that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that counts calls but always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Returns the number of `notify()` calls.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for MockNotifier {
    fn notify(&self) -> anyhow::Result<()> {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        if self.fail {
            bail!("no audio device");
        }
        Ok(())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<FrameReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<FrameReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &FrameReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                skipped,
                alerts,
            } => Some((*processed, *skipped, *alerts)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
