//! Hybrid posture classifier.
//!
//! Combines a binary good/bad predictor with geometric rules:
//! - When the predictor says bad, the rules name the defect
//! - When it says good, a depth check catches forward head posture the
//!   2-D angle features cannot see

use anyhow::Result;
use tracing::warn;

use super::geometry::{FeatureSet, FeatureVector, GeometryConfig};
use crate::domain::{ClassificationResult, ClassifierSource, LandmarkFrame, PostureLabel, Verdict};

/// Confidence reported by the heuristic fallback, which has no calibrated score.
pub const HEURISTIC_CONFIDENCE: f32 = 0.5;

/// A binary posture predictor over the incline feature vector.
pub trait Predictor: Send + Sync {
    /// Predicts whether the posture is good.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    fn predict(&self, features: &FeatureVector) -> Result<Verdict>;
}

/// Fixed-threshold fallback on the left neck incline.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPredictor {
    neck_angle: f32,
}

impl HeuristicPredictor {
    /// Creates a heuristic that reports bad posture below `neck_angle` degrees.
    #[must_use]
    pub const fn new(neck_angle: f32) -> Self {
        Self { neck_angle }
    }

    fn verdict(self, features: &FeatureVector) -> Verdict {
        Verdict {
            good: features[0] >= self.neck_angle,
            confidence: HEURISTIC_CONFIDENCE,
        }
    }
}

impl Predictor for HeuristicPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<Verdict> {
        Ok(self.verdict(features))
    }
}

/// Classifier combining a predictor with the geometric rule layer.
pub struct HybridClassifier {
    predictor: Box<dyn Predictor>,
    source: ClassifierSource,
    fallback: HeuristicPredictor,
    config: GeometryConfig,
}

impl HybridClassifier {
    /// Creates a classifier.
    ///
    /// Without a model, every frame is judged by the heuristic fallback.
    #[must_use]
    pub fn new(model: Option<Box<dyn Predictor>>, config: GeometryConfig) -> Self {
        let fallback = HeuristicPredictor::new(config.heuristic_neck_angle);
        let (predictor, source): (Box<dyn Predictor>, _) = match model {
            Some(model) => (model, ClassifierSource::Model),
            None => (Box::new(fallback), ClassifierSource::Heuristic),
        };
        Self {
            predictor,
            source,
            fallback,
            config,
        }
    }

    /// Returns which predictor drives classification.
    #[must_use]
    pub const fn source(&self) -> ClassifierSource {
        self.source
    }

    /// Returns the geometry thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Classifies a frame, returning the result and the features it was based on.
    #[must_use]
    pub fn classify_frame(&self, frame: &LandmarkFrame) -> (ClassificationResult, Option<FeatureSet>) {
        match FeatureSet::extract(frame, &self.config) {
            Some(features) => (self.classify(&features), Some(features)),
            None => (ClassificationResult::unknown(self.source), None),
        }
    }

    /// Classifies extracted features.
    #[must_use]
    pub fn classify(&self, features: &FeatureSet) -> ClassificationResult {
        let vector = features.vector();
        let (verdict, source) = match self.predictor.predict(&vector) {
            Ok(verdict) => (verdict, self.source),
            Err(e) => {
                warn!("Posture classifier failed, using heuristic for this frame: {e:#}");
                (self.fallback.verdict(&vector), ClassifierSource::Heuristic)
            }
        };

        let (label, good) = if verdict.good {
            self.check_good(features)
        } else {
            (self.diagnose(features), false)
        };

        let confidence = if verdict.confidence.is_finite() {
            verdict.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        ClassificationResult {
            label,
            confidence,
            good,
            source,
        }
    }

    /// Names the defect behind a bad verdict, in fixed priority order.
    fn diagnose(&self, features: &FeatureSet) -> PostureLabel {
        let g = &features.geometry;
        if !g.frontal {
            return PostureLabel::Slouching;
        }

        if g.shoulder_slope.abs() > self.config.lean_slope {
            if g.shoulder_slope > 0.0 {
                PostureLabel::LeaningRight
            } else {
                PostureLabel::LeaningLeft
            }
        } else if g.head_deviation.abs() > self.config.head_deviation {
            PostureLabel::HeadNotCentered
        } else if g.depth_diff < self.config.forward_head_depth {
            PostureLabel::ForwardHead
        } else {
            PostureLabel::Slouching
        }
    }

    /// Applies the depth safety net to a good verdict.
    fn check_good(&self, features: &FeatureSet) -> (PostureLabel, bool) {
        let g = &features.geometry;
        if !g.frontal {
            return (PostureLabel::GoodSide, true);
        }
        if g.depth_diff < self.config.forward_head_override_depth {
            (PostureLabel::ForwardHead3d, false)
        } else {
            (PostureLabel::Good, true)
        }
    }
}

impl std::fmt::Debug for HybridClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridClassifier")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
