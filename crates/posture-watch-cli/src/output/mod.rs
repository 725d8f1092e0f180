//! Output formatting for CLI.

mod json;
mod progress;

pub use json::{ReportLayout, ReportWriter};
pub use progress::ProgressBar;
