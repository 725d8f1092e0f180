//! Posture labels produced by the classifier and the smoother.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of posture categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostureLabel {
    /// Good posture, subject facing the camera.
    #[serde(rename = "Good")]
    Good,
    /// Good posture, subject turned sideways.
    #[serde(rename = "Good (Side)")]
    GoodSide,
    /// Left shoulder dropped.
    #[serde(rename = "Leaning Left")]
    LeaningLeft,
    /// Right shoulder dropped.
    #[serde(rename = "Leaning Right")]
    LeaningRight,
    /// Nose offset from the shoulder midline.
    #[serde(rename = "Head Not Centered")]
    HeadNotCentered,
    /// Head pushed forward of the shoulders.
    #[serde(rename = "Forward Head")]
    ForwardHead,
    /// Forward head caught by the depth check although the classifier accepted the pose.
    #[serde(rename = "Forward Head (3D)")]
    ForwardHead3d,
    /// Generic bad posture.
    #[serde(rename = "Slouching")]
    Slouching,
    /// No usable body detected.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl PostureLabel {
    /// Human-readable label text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::GoodSide => "Good (Side)",
            Self::LeaningLeft => "Leaning Left",
            Self::LeaningRight => "Leaning Right",
            Self::HeadNotCentered => "Head Not Centered",
            Self::ForwardHead => "Forward Head",
            Self::ForwardHead3d => "Forward Head (3D)",
            Self::Slouching => "Slouching",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for any variant of good posture.
    #[must_use]
    pub const fn is_good(self) -> bool {
        matches!(self, Self::Good | Self::GoodSide)
    }

    /// Returns true for labels that name a posture defect.
    #[must_use]
    pub const fn is_defect(self) -> bool {
        !self.is_good() && !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for PostureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
