//! Per-frame pipeline coordinator.

use tracing::{debug, info};

use super::alert::{AlertConfig, AlertMonitor, AlertState};
use super::classifier::{HybridClassifier, Predictor};
use super::dispatcher::AlertDispatcher;
use super::geometry::GeometryConfig;
use super::smoother::{LabelSmoother, SmoothingConfig};
use crate::domain::{ClassifierSource, FrameReport, LandmarkFrame};

/// Tunables for the whole pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorConfig {
    /// Geometric rule thresholds.
    pub geometry: GeometryConfig,
    /// Smoothing window.
    pub smoothing: SmoothingConfig,
    /// Alert threshold and user.
    pub alert: AlertConfig,
}

/// Owned state of a monitoring session.
///
/// Each call to [`process`](Self::process) runs feature extraction,
/// classification, smoothing and the alert state machine for one frame.
/// Alerts are handed to the dispatcher and never awaited.
#[derive(Debug)]
pub struct PostureMonitor {
    classifier: HybridClassifier,
    smoother: LabelSmoother,
    alerts: AlertMonitor,
    dispatcher: AlertDispatcher,
    alerts_fired: usize,
}

impl PostureMonitor {
    /// Creates a monitor.
    ///
    /// Without a model the session runs on the heuristic fallback throughout.
    #[must_use]
    pub fn new(
        config: MonitorConfig,
        model: Option<Box<dyn Predictor>>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        let classifier = HybridClassifier::new(model, config.geometry);
        if classifier.source() == ClassifierSource::Heuristic {
            info!("No posture classifier loaded, using neck-angle heuristic (reduced accuracy)");
        }
        if !dispatcher.is_enabled() {
            debug!("Alert side effects disabled for this session");
        }

        Self {
            classifier,
            smoother: LabelSmoother::new(&config.smoothing),
            alerts: AlertMonitor::new(config.alert),
            dispatcher,
            alerts_fired: 0,
        }
    }

    /// Processes one frame and returns its report.
    pub fn process(&mut self, frame: &LandmarkFrame) -> FrameReport {
        let (instant, features) = self.classifier.classify_frame(frame);
        let smoothed = self.smoother.push(instant.label);

        let event = self.alerts.update(smoothed.label, frame.timestamp);
        let alert = event.is_some();
        if let Some(event) = event {
            info!(
                "Bad posture alert: {} for over {:.0}s (t={:.1})",
                event.label,
                self.alerts.threshold_secs(),
                event.timestamp
            );
            self.alerts_fired += 1;
            self.dispatcher.dispatch(event);
        }

        debug!(
            "t={:.2} instant={} ({:.2}, good={}) smoothed={} ({:.2})",
            frame.timestamp,
            instant.label,
            instant.confidence,
            instant.good,
            smoothed.label,
            smoothed.confidence
        );

        FrameReport {
            timestamp: frame.timestamp,
            label: smoothed.label,
            confidence: smoothed.confidence,
            instant_label: instant.label,
            instant_confidence: instant.confidence,
            source: instant.source,
            alert,
            geometry: features.map(|f| f.geometry),
        }
    }

    /// Predictor configured for the session.
    #[must_use]
    pub const fn classifier_source(&self) -> ClassifierSource {
        self.classifier.source()
    }

    /// Current alert state.
    #[must_use]
    pub const fn alert_state(&self) -> AlertState {
        self.alerts.state()
    }

    /// Number of alerts fired so far.
    #[must_use]
    pub const fn alerts_fired(&self) -> usize {
        self.alerts_fired
    }

    /// Ends the session, waiting for queued alert side effects.
    pub fn finish(self) -> usize {
        self.dispatcher.shutdown();
        self.alerts_fired
    }
}
