//! Posture Watch Core - Domain types and the posture decision pipeline
//!
//! This crate turns body landmarks into a stabilized posture verdict: geometric
//! features, a hybrid classifier (trained model plus geometric rules), temporal
//! smoothing, and a duration-based alert state machine. Side effects are
//! reached only through the port traits.

pub mod domain;
pub mod inference;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AlertEvent, ClassificationResult, ClassifierSource, FrameReport, GeometrySnapshot, Landmark,
    LandmarkFrame, Point, PostureLabel,
};
pub use pipeline::{AlertDispatcher, MonitorConfig, PostureMonitor, Predictor};
pub use ports::{LandmarkSource, Notifier, PostureLog, ProgressEvent, ProgressSink, ResultOutput};
