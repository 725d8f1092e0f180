//! Geometric feature engine.
//!
//! Pure functions turning landmark positions into scale-invariant angles and
//! the auxiliary slope, deviation and depth signals used by the rule layer.

use crate::domain::{landmark_id, GeometrySnapshot, Landmark, LandmarkFrame, Point};

/// Classifier input in training order: left neck, right neck, left torso, right torso.
///
/// The classifier was fitted on exactly this column order. Reordering it
/// silently corrupts every prediction.
pub type FeatureVector = [f32; 4];

/// Thresholds for the geometric rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    /// Shoulder depth asymmetry below which the subject counts as frontal.
    pub frontal_rotation: f32,
    /// Height of the synthetic vertical reference above each hip, in pixels.
    pub torso_reference_offset: f32,
    /// Absolute shoulder slope (pixels) above which the subject is leaning.
    pub lean_slope: f32,
    /// Absolute head deviation ratio above which the head is off-center.
    pub head_deviation: f32,
    /// Depth difference below which a bad posture is diagnosed as forward head.
    pub forward_head_depth: f32,
    /// Stricter depth difference below which a good verdict is overridden.
    pub forward_head_override_depth: f32,
    /// Left neck incline (degrees) below which the heuristic fallback reports bad posture.
    pub heuristic_neck_angle: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            frontal_rotation: 0.20,
            torso_reference_offset: 100.0,
            lean_slope: 30.0,
            head_deviation: 0.20,
            forward_head_depth: -0.15,
            forward_head_override_depth: -0.20,
            heuristic_neck_angle: 140.0,
        }
    }
}

/// Features computed from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSet {
    /// Ear-shoulder-hip angle on the left side, in degrees.
    pub left_neck: f32,
    /// Ear-shoulder-hip angle on the right side, in degrees.
    pub right_neck: f32,
    /// Left torso deviation from vertical, in degrees.
    pub left_torso: f32,
    /// Right torso deviation from vertical, in degrees.
    pub right_torso: f32,
    /// Derived scalars and the points needed for an overlay.
    pub geometry: GeometrySnapshot,
}

impl FeatureSet {
    /// Extracts features from a frame.
    ///
    /// Returns `None` when the frame is empty or a required landmark is
    /// missing or has a non-finite coordinate.
    #[must_use]
    pub fn extract(frame: &LandmarkFrame, config: &GeometryConfig) -> Option<Self> {
        if !frame.has_required() {
            return None;
        }
        let nose = frame.get(landmark_id::NOSE)?;
        let left_ear = frame.get(landmark_id::LEFT_EAR)?;
        let right_ear = frame.get(landmark_id::RIGHT_EAR)?;
        let left_shoulder = frame.get(landmark_id::LEFT_SHOULDER)?;
        let right_shoulder = frame.get(landmark_id::RIGHT_SHOULDER)?;
        let left_hip = frame.get(landmark_id::LEFT_HIP)?;
        let right_hip = frame.get(landmark_id::RIGHT_HIP)?;

        let left_vertical = vertical_reference(left_hip.point(), config.torso_reference_offset);
        let right_vertical = vertical_reference(right_hip.point(), config.torso_reference_offset);

        let rotation = body_rotation(left_shoulder, right_shoulder);

        Some(Self {
            left_neck: angle(left_ear.point(), left_shoulder.point(), left_hip.point()),
            right_neck: angle(right_ear.point(), right_shoulder.point(), right_hip.point()),
            left_torso: angle(left_shoulder.point(), left_hip.point(), left_vertical),
            right_torso: angle(right_shoulder.point(), right_hip.point(), right_vertical),
            geometry: GeometrySnapshot {
                left_shoulder: left_shoulder.point(),
                right_shoulder: right_shoulder.point(),
                nose: nose.point(),
                left_vertical,
                right_vertical,
                shoulder_slope: shoulder_slope(left_shoulder.point(), right_shoulder.point()),
                head_deviation: head_deviation_ratio(
                    nose.point(),
                    left_shoulder.point(),
                    right_shoulder.point(),
                ),
                depth_diff: forward_head_depth_diff(
                    left_ear,
                    right_ear,
                    left_shoulder,
                    right_shoulder,
                ),
                rotation,
                frontal: rotation < config.frontal_rotation,
            },
        })
    }

    /// Returns the classifier input vector.
    #[must_use]
    pub const fn vector(&self) -> FeatureVector {
        [
            self.left_neck,
            self.right_neck,
            self.left_torso,
            self.right_torso,
        ]
    }
}

/// Angle at `p2` between the rays towards `p1` and `p3`, in degrees.
///
/// Returns `0.0` if either ray has zero length or a coordinate is not finite.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn angle(p1: Point, p2: Point, p3: Point) -> f32 {
    let (ax, ay) = (f64::from(p1.x) - f64::from(p2.x), f64::from(p1.y) - f64::from(p2.y));
    let (bx, by) = (f64::from(p3.x) - f64::from(p2.x), f64::from(p3.y) - f64::from(p2.y));

    let len_a = ax.hypot(ay);
    let len_b = bx.hypot(by);
    if !(len_a.is_finite() && len_b.is_finite()) || len_a == 0.0 || len_b == 0.0 {
        return 0.0;
    }

    // Rounding can push the cosine just outside [-1, 1].
    let cosine = ((ax * bx + ay * by) / (len_a * len_b)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees() as f32
}

/// Right shoulder height minus left shoulder height.
///
/// Positive means the right shoulder is lower (leaning right).
#[must_use]
pub fn shoulder_slope(left_shoulder: Point, right_shoulder: Point) -> f32 {
    right_shoulder.y - left_shoulder.y
}

/// Horizontal nose offset from the shoulder midpoint, relative to shoulder width.
///
/// Returns `0.0` when the shoulders coincide horizontally.
#[must_use]
pub fn head_deviation_ratio(nose: Point, left_shoulder: Point, right_shoulder: Point) -> f32 {
    let width = (right_shoulder.x - left_shoulder.x).abs();
    if width == 0.0 {
        return 0.0;
    }
    let mid_x = (left_shoulder.x + right_shoulder.x) / 2.0;
    (nose.x - mid_x) / width
}

/// Mean ear depth minus mean shoulder depth. More negative means the head is further forward.
#[must_use]
pub fn forward_head_depth_diff(
    left_ear: &Landmark,
    right_ear: &Landmark,
    left_shoulder: &Landmark,
    right_shoulder: &Landmark,
) -> f32 {
    let ear_z = (left_ear.z + right_ear.z) / 2.0;
    let shoulder_z = (left_shoulder.z + right_shoulder.z) / 2.0;
    ear_z - shoulder_z
}

/// Absolute depth difference between the shoulders.
#[must_use]
pub fn body_rotation(left_shoulder: &Landmark, right_shoulder: &Landmark) -> f32 {
    (left_shoulder.z - right_shoulder.z).abs()
}

/// Point directly above `hip` by `offset` pixels.
#[must_use]
pub fn vertical_reference(hip: Point, offset: f32) -> Point {
    Point::new(hip.x, hip.y - offset)
}
