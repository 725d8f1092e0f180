//! Progress reporting port for UI integration.

use crate::domain::FrameReport;

/// Events emitted while a landmark stream is processed.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Processing started for a frame.
    Started {
        /// Index in the stream (0-based).
        index: usize,
        /// Total frames in the stream, if known.
        total: Option<usize>,
    },
    /// Processing completed for a frame.
    Completed {
        /// The frame report.
        report: FrameReport,
    },
    /// A frame was skipped because it could not be read.
    Skipped {
        /// Index in the stream (0-based).
        index: usize,
        /// Reason for skipping.
        reason: String,
    },
    /// The stream has been exhausted.
    Finished {
        /// Total frames processed.
        processed: usize,
        /// Total frames skipped.
        skipped: usize,
        /// Total alerts fired.
        alerts: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
