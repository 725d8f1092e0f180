//! Frame report writer.
//!
//! Reports are either streamed as JSON Lines while frames are processed, or
//! held back and emitted as one JSON array when the session is flushed.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use posture_watch_core::{FrameReport, ResultOutput};

/// How reports are laid out on the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// One compact JSON object per frame, written immediately.
    Lines,
    /// A single JSON array written on flush.
    Array { pretty: bool },
}

struct State {
    writer: Box<dyn Write + Send>,
    pending: Vec<FrameReport>,
}

/// Writes frame reports as JSON.
pub struct ReportWriter {
    layout: ReportLayout,
    state: Mutex<State>,
}

impl ReportWriter {
    #[must_use]
    pub fn stdout(layout: ReportLayout) -> Self {
        Self::new(Box::new(io::stdout()), layout)
    }

    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, layout: ReportLayout) -> Self {
        Self {
            layout,
            state: Mutex::new(State {
                writer,
                pending: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| anyhow!("Report writer lock poisoned: {e}"))
    }
}

impl ResultOutput for ReportWriter {
    fn write(&self, report: &FrameReport) -> Result<()> {
        let mut state = self.lock()?;
        match self.layout {
            ReportLayout::Lines => {
                let line = serde_json::to_string(report).context("Failed to encode report")?;
                writeln!(state.writer, "{line}").context("Failed to write report")?;
            }
            ReportLayout::Array { .. } => state.pending.push(report.clone()),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.lock()?;
        if let ReportLayout::Array { pretty } = self.layout {
            let reports = std::mem::take(&mut state.pending);
            let json = if pretty {
                serde_json::to_string_pretty(&reports)
            } else {
                serde_json::to_string(&reports)
            }
            .context("Failed to encode reports")?;
            writeln!(state.writer, "{json}").context("Failed to write reports")?;
        }
        state.writer.flush().context("Failed to flush report output")
    }
}
