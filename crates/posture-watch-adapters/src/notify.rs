//! Terminal bell notifier.

use std::io::{self, Write};

use anyhow::{Context, Result};
use posture_watch_core::Notifier;

/// Rings the terminal bell on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self) -> Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(b"\x07").context("Failed to ring terminal bell")?;
        stderr.flush().context("Failed to flush stderr")
    }
}
