//! The posture decision pipeline: features, classification, smoothing and alerts.

mod alert;
mod classifier;
mod dispatcher;
mod geometry;
mod monitor;
mod smoother;

pub use alert::{AlertConfig, AlertEpisode, AlertMonitor, AlertState};
pub use classifier::{HeuristicPredictor, HybridClassifier, Predictor, HEURISTIC_CONFIDENCE};
pub use dispatcher::{truncate_label, AlertDispatcher, DEFAULT_LABEL_MAX_LEN};
pub use geometry::{
    angle, body_rotation, forward_head_depth_diff, head_deviation_ratio, shoulder_slope,
    vertical_reference, FeatureSet, FeatureVector, GeometryConfig,
};
pub use monitor::{MonitorConfig, PostureMonitor};
pub use smoother::{LabelSmoother, SmoothedLabel, SmoothingConfig};
