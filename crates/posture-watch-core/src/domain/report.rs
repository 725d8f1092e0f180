//! Per-frame results and alert snapshots.

use serde::{Deserialize, Serialize};

use super::{Point, PostureLabel};

/// Binary verdict of a posture predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// True if the predictor judged the posture good.
    pub good: bool,
    /// Confidence of the verdict (0.0 to 1.0).
    pub confidence: f32,
}

/// Which predictor produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierSource {
    /// The trained classifier artifact.
    Model,
    /// The fixed-threshold fallback used when no artifact is loaded.
    Heuristic,
}

/// Instantaneous classification of a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    /// Fine-grained label for this frame.
    pub label: PostureLabel,
    /// Confidence of the label (0.0 to 1.0).
    pub confidence: f32,
    /// Final good/bad decision after the geometric override.
    pub good: bool,
    /// Predictor that produced the underlying verdict.
    pub source: ClassifierSource,
}

impl ClassificationResult {
    /// Result for a frame without a usable body.
    #[must_use]
    pub const fn unknown(source: ClassifierSource) -> Self {
        Self {
            label: PostureLabel::Unknown,
            confidence: 0.0,
            good: false,
            source,
        }
    }
}

/// Read-only geometry needed to draw a diagnostic overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Left shoulder position.
    pub left_shoulder: Point,
    /// Right shoulder position.
    pub right_shoulder: Point,
    /// Nose position.
    pub nose: Point,
    /// Vertical reference point above the left hip.
    pub left_vertical: Point,
    /// Vertical reference point above the right hip.
    pub right_vertical: Point,
    /// Right minus left shoulder height in pixels.
    pub shoulder_slope: f32,
    /// Nose offset from the shoulder midline, relative to shoulder width.
    pub head_deviation: f32,
    /// Mean ear depth minus mean shoulder depth.
    pub depth_diff: f32,
    /// Absolute shoulder depth asymmetry.
    pub rotation: f32,
    /// Whether the subject faces the camera.
    pub frontal: bool,
}

/// Externally reportable state after one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frame timestamp in seconds.
    pub timestamp: f64,
    /// Smoothed posture label.
    pub label: PostureLabel,
    /// Confidence of the smoothed label (0.0 to 1.0).
    pub confidence: f32,
    /// Unsmoothed label for this frame.
    pub instant_label: PostureLabel,
    /// Confidence of the unsmoothed label.
    pub instant_confidence: f32,
    /// Predictor behind the instant label.
    pub source: ClassifierSource,
    /// Whether an alert fired on this frame.
    pub alert: bool,
    /// Overlay geometry, absent when no body was usable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometrySnapshot>,
}

/// Immutable snapshot handed to the alert side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// User the alert belongs to.
    pub user_id: u32,
    /// Defect label that triggered the alert.
    pub label: PostureLabel,
    /// Bad-posture duration the alert represents, in seconds.
    pub duration_secs: f32,
    /// Frame timestamp at which the alert fired.
    pub timestamp: f64,
}
