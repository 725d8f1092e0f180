//! ML inference engine using Candle.
//!
//! Provides loading and evaluation of the trained posture classifier, a
//! linear model over the four incline angles.

mod calibration;
mod device;
mod linear;
mod loader;

pub use calibration::{log_odds_verdict, margin_verdict, sigmoid};
pub use device::{device_name, get_device};
pub use linear::{ClassifierOutput, LinearClassifier, CLASSIFIER_INPUTS};
pub use loader::load_safetensors;
