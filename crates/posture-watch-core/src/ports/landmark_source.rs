//! Landmark source port for receiving pose estimates.

use crate::domain::LandmarkFrame;

/// Port for a stream of landmark frames, one per captured image.
pub trait LandmarkSource: Send + Sync {
    /// Returns an iterator over frames in capture order.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a frame cannot be decoded.
    fn frames(&self) -> Box<dyn Iterator<Item = anyhow::Result<LandmarkFrame>> + Send + '_>;

    /// Returns the total number of frames, if known.
    fn count_hint(&self) -> Option<usize>;
}
