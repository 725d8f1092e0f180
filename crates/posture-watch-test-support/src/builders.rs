//! Synthetic landmark frame builders for testing.

use posture_watch_core::domain::{landmark_id, Landmark, LandmarkFrame};

/// Builder for synthetic landmark frames.
///
/// Starts from an upright, frontal subject (shoulders 160 px apart, neck
/// incline about 153 degrees) and applies posture distortions on top.
///
/// ```
/// use posture_watch_test_support::LandmarkFrameBuilder;
///
/// let frame = LandmarkFrameBuilder::upright().slouch().at(2.0).build();
/// assert_eq!(frame.timestamp, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct LandmarkFrameBuilder {
    timestamp: f64,
    landmarks: Vec<Landmark>,
}

impl LandmarkFrameBuilder {
    // === Presets ===

    /// Upright frontal posture. Good under both model and heuristic.
    #[must_use]
    pub fn upright() -> Self {
        Self {
            timestamp: 0.0,
            landmarks: vec![
                Landmark::new(landmark_id::NOSE, 300.0, 100.0, -0.3),
                Landmark::new(landmark_id::LEFT_EAR, 260.0, 110.0, -0.1),
                Landmark::new(landmark_id::RIGHT_EAR, 340.0, 110.0, -0.1),
                Landmark::new(landmark_id::LEFT_SHOULDER, 220.0, 200.0, 0.0),
                Landmark::new(landmark_id::RIGHT_SHOULDER, 380.0, 200.0, 0.0),
                Landmark::new(landmark_id::LEFT_HIP, 230.0, 420.0, 0.0),
                Landmark::new(landmark_id::RIGHT_HIP, 370.0, 420.0, 0.0),
            ],
        }
    }

    /// Collapsed neck; the heuristic fallback reports bad posture.
    #[must_use]
    pub fn slouched() -> Self {
        Self::upright().slouch()
    }

    /// Slouched with the right shoulder raised 40 px.
    #[must_use]
    pub fn leaning_left() -> Self {
        Self::slouched().lean(-40.0)
    }

    /// Slouched with the right shoulder dropped 40 px.
    #[must_use]
    pub fn leaning_right() -> Self {
        Self::slouched().lean(40.0)
    }

    /// Upright angles but ears 0.3 closer to the camera than the shoulders.
    #[must_use]
    pub fn forward_head() -> Self {
        Self::upright().ear_depth(-0.3)
    }

    /// Body turned away from the camera.
    #[must_use]
    pub fn side_on() -> Self {
        Self::upright().rotate(0.4)
    }

    /// Upright frame with both hips missing.
    #[must_use]
    pub fn partial() -> Self {
        Self::upright()
            .without(landmark_id::LEFT_HIP)
            .without(landmark_id::RIGHT_HIP)
    }

    /// Frame without any detected body.
    #[must_use]
    pub fn empty(timestamp: f64) -> LandmarkFrame {
        LandmarkFrame::empty(timestamp)
    }

    // === Distortions ===

    /// Pulls both ears toward the body midline, dropping the neck incline to about 127 degrees.
    #[must_use]
    pub fn slouch(self) -> Self {
        self.map(landmark_id::LEFT_EAR, |l| l.x = 330.0)
            .map(landmark_id::RIGHT_EAR, |l| l.x = 270.0)
    }

    /// Moves the right shoulder down by `dy` pixels (negative raises it).
    #[must_use]
    pub fn lean(self, dy: f32) -> Self {
        self.map(landmark_id::RIGHT_SHOULDER, |l| l.y += dy)
    }

    /// Moves the nose sideways by `dx` pixels.
    #[must_use]
    pub fn head_offset(self, dx: f32) -> Self {
        self.map(landmark_id::NOSE, |l| l.x += dx)
    }

    /// Sets the depth of both ears.
    #[must_use]
    pub fn ear_depth(self, z: f32) -> Self {
        self.map(landmark_id::LEFT_EAR, |l| l.z = z)
            .map(landmark_id::RIGHT_EAR, |l| l.z = z)
    }

    /// Pushes the right shoulder back by `dz`, creating depth asymmetry.
    #[must_use]
    pub fn rotate(self, dz: f32) -> Self {
        self.map(landmark_id::RIGHT_SHOULDER, |l| l.z += dz)
    }

    /// Removes a landmark.
    #[must_use]
    pub fn without(mut self, id: u32) -> Self {
        self.landmarks.retain(|l| l.id != id);
        self
    }

    /// Sets the frame timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builds the frame.
    #[must_use]
    pub fn build(self) -> LandmarkFrame {
        LandmarkFrame::new(self.timestamp, self.landmarks)
    }

    /// Builds one frame per timestamp in `[from, to)` stepping by `step` seconds.
    #[must_use]
    pub fn sequence(&self, from: f64, to: f64, step: f64) -> Vec<LandmarkFrame> {
        let mut frames = Vec::new();
        let mut t = from;
        while t < to {
            frames.push(self.clone().at(t).build());
            t += step;
        }
        frames
    }

    fn map(mut self, id: u32, f: impl FnOnce(&mut Landmark)) -> Self {
        if let Some(landmark) = self.landmarks.iter_mut().find(|l| l.id == id) {
            f(landmark);
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use posture_watch_core::pipeline::{FeatureSet, GeometryConfig};

    fn features(builder: LandmarkFrameBuilder) -> FeatureSet {
        FeatureSet::extract(&builder.build(), &GeometryConfig::default()).unwrap()
    }

    #[test]
    fn test_upright_is_frontal_and_tall() {
        let f = features(LandmarkFrameBuilder::upright());
        assert!(f.geometry.frontal);
        assert!(f.left_neck > 150.0);
        assert!(f.geometry.shoulder_slope.abs() < f32::EPSILON);
    }

    #[test]
    fn test_slouched_below_heuristic_threshold() {
        let f = features(LandmarkFrameBuilder::slouched());
        assert!(f.left_neck < 140.0);
        assert!(f.right_neck < 140.0);
    }

    #[test]
    fn test_leaning_signs() {
        assert!(features(LandmarkFrameBuilder::leaning_left()).geometry.shoulder_slope < -30.0);
        assert!(features(LandmarkFrameBuilder::leaning_right()).geometry.shoulder_slope > 30.0);
    }

    #[test]
    fn test_forward_head_and_side_on() {
        assert!(features(LandmarkFrameBuilder::forward_head()).geometry.depth_diff < -0.2);
        assert!(!features(LandmarkFrameBuilder::side_on()).geometry.frontal);
    }

    #[test]
    fn test_partial_has_no_features() {
        let frame = LandmarkFrameBuilder::partial().build();
        assert!(!frame.has_required());
    }

    #[test]
    fn test_sequence_timestamps() {
        let frames = LandmarkFrameBuilder::upright().sequence(0.0, 2.0, 0.5);
        let times: Vec<f64> = frames.iter().map(|f| f.timestamp).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5]);
    }
}
