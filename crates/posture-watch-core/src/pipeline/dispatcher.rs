//! Background dispatch of alert side effects.
//!
//! The frame loop hands immutable [`AlertEvent`] snapshots to a worker thread
//! over a channel and never waits for the result. Notification and
//! persistence failures are logged by the worker and discarded.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::AlertEvent;
use crate::ports::{Notifier, PostureLog};

/// Default storage limit for persisted labels, in characters.
pub const DEFAULT_LABEL_MAX_LEN: usize = 20;

/// Fire-and-forget executor for alert side effects.
pub struct AlertDispatcher {
    sender: Option<Sender<AlertEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl AlertDispatcher {
    /// Spawns the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(
        log: Option<Arc<dyn PostureLog>>,
        notifier: Option<Arc<dyn Notifier>>,
        label_max_len: usize,
    ) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("posture-alerts".to_string())
            .spawn(move || run_worker(&receiver, log.as_deref(), notifier.as_deref(), label_max_len))
            .context("Failed to spawn alert worker")?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Creates a dispatcher that drops every event.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            sender: None,
            worker: None,
        }
    }

    /// Returns true if events reach a worker.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues an alert without blocking.
    pub fn dispatch(&self, event: AlertEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(event).is_err() {
            warn!("Alert worker has stopped; dropping alert");
        }
    }

    /// Closes the queue and waits for queued alerts to be handled.
    pub fn shutdown(mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Alert worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn run_worker(
    receiver: &Receiver<AlertEvent>,
    log: Option<&dyn PostureLog>,
    notifier: Option<&dyn Notifier>,
    label_max_len: usize,
) {
    for event in receiver {
        if let Some(notifier) = notifier {
            if let Err(e) = notifier.notify() {
                debug!("Notification failed: {e:#}");
            }
        }

        if let Some(log) = log {
            let label = truncate_label(event.label.as_str(), label_max_len);
            if let Err(e) = log.log_posture(event.user_id, label, event.duration_secs) {
                warn!(
                    "Failed to record {label} alert for user {}: {e:#}",
                    event.user_id
                );
            }
        }
    }
    debug!("Alert worker finished");
}

/// Cuts `label` to at most `max_chars` characters.
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> &str {
    match label.char_indices().nth(max_chars) {
        Some((end, _)) => &label[..end],
        None => label,
    }
}
