//! Linear posture classifier.
//!
//! A single affine layer over the incline feature vector, exported from the
//! training pipeline as a linear SVM or a logistic regression. The sign of
//! the decision value separates good (positive) from bad (negative) posture.

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{Device, Module, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{get_device, load_safetensors, log_odds_verdict, margin_verdict};
use crate::domain::Verdict;
use crate::pipeline::{FeatureVector, Predictor};

/// Number of classifier inputs.
pub const CLASSIFIER_INPUTS: usize = 4;

/// How the decision value of the classifier is turned into a confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierOutput {
    /// Uncalibrated distance from the separating hyperplane (linear SVM).
    #[default]
    Margin,
    /// Log-odds of good posture (logistic regression).
    Probability,
}

/// Trained linear posture classifier.
///
/// Expects tensors `weight` of shape `(1, 4)` and `bias` of shape `(1,)`.
pub struct LinearClassifier {
    layer: Linear,
    output: ClassifierOutput,
    device: Device,
}

impl LinearClassifier {
    /// Creates a classifier from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights are missing or have the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder, output: ClassifierOutput) -> Result<Self> {
        let device = vb.device().clone();
        let layer = linear(CLASSIFIER_INPUTS, 1, vb)?;
        Ok(Self {
            layer,
            output,
            device,
        })
    }

    /// Loads a classifier artifact from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid classifier.
    pub fn load(path: impl AsRef<Path>, output: ClassifierOutput) -> Result<Self> {
        let path = path.as_ref();
        let device = get_device();
        debug!("Loading posture classifier from {}", path.display());
        let vb = load_safetensors(path, &device).context("Failed to load classifier weights")?;
        Self::new(vb, output).context("Failed to create posture classifier")
    }

    /// Returns the raw decision value for a feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    pub fn decision(&self, features: &FeatureVector) -> Result<f32> {
        let x = Tensor::from_slice(features.as_slice(), (1, CLASSIFIER_INPUTS), &self.device)
            .context("Failed to create feature tensor")?;
        let y = self.layer.forward(&x)?;
        Ok(y.squeeze(0)?.squeeze(0)?.to_scalar::<f32>()?)
    }
}

impl Predictor for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Verdict> {
        let decision = self.decision(features)?;
        let verdict = match self.output {
            ClassifierOutput::Margin => margin_verdict(decision),
            ClassifierOutput::Probability => log_odds_verdict(decision),
        };
        Ok(verdict)
    }
}
