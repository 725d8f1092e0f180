//! Core domain types for posture analysis.

mod label;
mod landmark;
mod report;

pub use label::PostureLabel;
pub use landmark::{landmark_id, Landmark, LandmarkFrame, Point, REQUIRED_LANDMARKS};
pub use report::{
    AlertEvent, ClassificationResult, ClassifierSource, FrameReport, GeometrySnapshot, Verdict,
};
