//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the posture pipeline and external adapters.

mod landmark_source;
mod notifier;
mod posture_log;
mod progress;
mod result_output;

pub use landmark_source::LandmarkSource;
pub use notifier::Notifier;
pub use posture_log::PostureLog;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
