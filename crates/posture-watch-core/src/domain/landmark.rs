//! Body landmarks as delivered by the pose estimation engine.

use serde::{Deserialize, Serialize};

/// Stable landmark ids used by the posture pipeline.
pub mod landmark_id {
    /// Nose tip.
    pub const NOSE: u32 = 0;
    /// Left ear.
    pub const LEFT_EAR: u32 = 7;
    /// Right ear.
    pub const RIGHT_EAR: u32 = 8;
    /// Left shoulder.
    pub const LEFT_SHOULDER: u32 = 11;
    /// Right shoulder.
    pub const RIGHT_SHOULDER: u32 = 12;
    /// Left hip.
    pub const LEFT_HIP: u32 = 23;
    /// Right hip.
    pub const RIGHT_HIP: u32 = 24;
}

/// Landmark ids that must all be present for feature extraction.
pub const REQUIRED_LANDMARKS: [u32; 7] = [
    landmark_id::NOSE,
    landmark_id::LEFT_EAR,
    landmark_id::RIGHT_EAR,
    landmark_id::LEFT_SHOULDER,
    landmark_id::RIGHT_SHOULDER,
    landmark_id::LEFT_HIP,
    landmark_id::RIGHT_HIP,
];

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate (grows downwards).
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One tracked body point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Semantic landmark id (see [`landmark_id`]).
    pub id: u32,
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
    /// Depth relative to the hip midpoint. Negative is closer to the camera.
    #[serde(default)]
    pub z: f32,
    /// Detection confidence (0.0 to 1.0).
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

const fn full_visibility() -> f32 {
    1.0
}

impl Landmark {
    /// Creates a fully visible landmark.
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32, z: f32) -> Self {
        Self {
            id,
            x,
            y,
            z,
            visibility: 1.0,
        }
    }

    /// Returns true if every coordinate is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns the 2D pixel position.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All landmarks detected in a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Capture time in seconds since the start of the session.
    pub timestamp: f64,
    /// Detected landmarks. Empty when no body was found.
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    /// Creates a frame from its landmarks.
    #[must_use]
    pub const fn new(timestamp: f64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp,
            landmarks,
        }
    }

    /// Creates a frame in which no body was detected.
    #[must_use]
    pub const fn empty(timestamp: f64) -> Self {
        Self::new(timestamp, Vec::new())
    }

    /// Returns true if no landmarks were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Looks up a landmark by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.id == id)
    }

    /// Returns true if every landmark needed for feature extraction is
    /// present with finite coordinates.
    #[must_use]
    pub fn has_required(&self) -> bool {
        REQUIRED_LANDMARKS
            .iter()
            .all(|&id| self.get(id).is_some_and(Landmark::is_finite))
    }
}
