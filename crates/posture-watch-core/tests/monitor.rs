//! End-to-end tests of the posture monitor with mock ports.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use anyhow::Result;
use posture_watch_core::domain::{ClassifierSource, PostureLabel, Verdict};
use posture_watch_core::pipeline::{
    AlertConfig, AlertDispatcher, AlertState, FeatureVector, MonitorConfig, PostureMonitor,
    Predictor,
};
use posture_watch_core::ports::{LandmarkSource, Notifier, PostureLog};
use posture_watch_test_support::{
    FailingPostureLog, LandmarkFrameBuilder, MockLandmarkSource, MockNotifier, MockPostureLog,
};

struct AlwaysGood;

impl Predictor for AlwaysGood {
    fn predict(&self, _features: &FeatureVector) -> Result<Verdict> {
        Ok(Verdict {
            good: true,
            confidence: 0.95,
        })
    }
}

fn config(threshold_secs: f64) -> MonitorConfig {
    MonitorConfig {
        alert: AlertConfig {
            threshold_secs,
            user_id: 4,
        },
        ..MonitorConfig::default()
    }
}

fn dispatcher(
    log: &MockPostureLog,
    notifier: &MockNotifier,
    label_max_len: usize,
) -> AlertDispatcher {
    let log: Arc<dyn PostureLog> = Arc::new(log.clone());
    let notifier: Arc<dyn Notifier> = Arc::new(notifier.clone());
    AlertDispatcher::spawn(Some(log), Some(notifier), label_max_len).unwrap()
}

/// Runs every frame of `source` and returns the number of alerts raised.
fn run(monitor: &mut PostureMonitor, source: &dyn LandmarkSource) -> usize {
    source
        .frames()
        .map(|frame| monitor.process(&frame.unwrap()))
        .filter(|report| report.alert)
        .count()
}

#[test]
fn test_heuristic_slouch_alerts_and_persists() {
    let log = MockPostureLog::new();
    let notifier = MockNotifier::new();
    let mut monitor = PostureMonitor::new(config(10.0), None, dispatcher(&log, &notifier, 20));
    assert_eq!(monitor.classifier_source(), ClassifierSource::Heuristic);

    let source = MockLandmarkSource::new(LandmarkFrameBuilder::slouched().sequence(0.0, 36.0, 1.0));
    // Episode starts at 0; alerts at 11, 22 and 33.
    assert_eq!(run(&mut monitor, &source), 3);
    assert_eq!(monitor.finish(), 3);

    let records = log.records();
    assert_eq!(records.len(), 3);
    for record in records {
        assert_eq!(record.user_id, 4);
        assert_eq!(record.label, "Slouching");
        assert!((record.duration_secs - 10.0).abs() < f32::EPSILON);
    }
    assert_eq!(notifier.count(), 3);
}

#[test]
fn test_safety_net_overrides_model() {
    let log = MockPostureLog::new();
    let notifier = MockNotifier::new();
    let mut monitor = PostureMonitor::new(
        config(5.0),
        Some(Box::new(AlwaysGood)),
        dispatcher(&log, &notifier, 20),
    );
    assert_eq!(monitor.classifier_source(), ClassifierSource::Model);

    let first = monitor.process(&LandmarkFrameBuilder::forward_head().build());
    assert_eq!(first.instant_label, PostureLabel::ForwardHead3d);
    assert_eq!(first.source, ClassifierSource::Model);

    let source =
        MockLandmarkSource::new(LandmarkFrameBuilder::forward_head().sequence(1.0, 7.0, 1.0));
    assert_eq!(run(&mut monitor, &source), 1);
    monitor.finish();

    assert_eq!(log.records()[0].label, "Forward Head (3D)");
}

#[test]
fn test_model_good_upright_never_alerts() {
    let log = MockPostureLog::new();
    let notifier = MockNotifier::new();
    let mut monitor = PostureMonitor::new(
        config(5.0),
        Some(Box::new(AlwaysGood)),
        dispatcher(&log, &notifier, 20),
    );

    let source = MockLandmarkSource::new(LandmarkFrameBuilder::upright().sequence(0.0, 30.0, 0.5));
    assert_eq!(run(&mut monitor, &source), 0);
    assert_eq!(monitor.alert_state(), AlertState::Good);

    let side = monitor.process(&LandmarkFrameBuilder::side_on().at(30.0).build());
    assert_eq!(side.instant_label, PostureLabel::GoodSide);
    assert_eq!(monitor.finish(), 0);
    assert!(log.records().is_empty());
}

#[test]
fn test_recovery_restarts_accumulation() {
    let log = MockPostureLog::new();
    let notifier = MockNotifier::new();
    let mut monitor = PostureMonitor::new(config(20.0), None, dispatcher(&log, &notifier, 20));

    // 16 s of smoothed slouch, recovery, then 8 s more: over 20 s in total.
    let mut frames = LandmarkFrameBuilder::slouched().sequence(0.0, 10.0, 1.0);
    frames.extend(LandmarkFrameBuilder::upright().sequence(10.0, 30.0, 1.0));
    frames.extend(LandmarkFrameBuilder::slouched().sequence(30.0, 46.0, 1.0));
    let source = MockLandmarkSource::new(frames);

    // The second slouch wins the window at t=37 and counts from there.
    assert_eq!(run(&mut monitor, &source), 0);
    assert_eq!(monitor.alert_state(), AlertState::BadActive);
    assert_eq!(monitor.finish(), 0);
    assert!(log.records().is_empty());
}

#[test]
fn test_lost_body_resets_episode() {
    let mut monitor = PostureMonitor::new(config(20.0), None, AlertDispatcher::disabled());

    let mut frames = LandmarkFrameBuilder::slouched().sequence(0.0, 8.0, 1.0);
    frames.extend((8..24).map(|t| LandmarkFrameBuilder::partial().at(f64::from(t)).build()));
    let source = MockLandmarkSource::new(frames);

    assert_eq!(run(&mut monitor, &source), 0);
    assert_eq!(monitor.alert_state(), AlertState::Good);
}

#[test]
fn test_leaning_label_is_truncated_for_storage() {
    let log = MockPostureLog::new();
    let notifier = MockNotifier::new();
    let mut monitor = PostureMonitor::new(config(2.0), None, dispatcher(&log, &notifier, 7));

    let source =
        MockLandmarkSource::new(LandmarkFrameBuilder::leaning_left().sequence(0.0, 3.5, 0.5));
    assert_eq!(run(&mut monitor, &source), 1);
    monitor.finish();

    assert_eq!(log.records()[0].label, "Leaning");
}

#[test]
fn test_side_effect_failures_do_not_stop_frames() {
    let failing = FailingPostureLog::new();
    let notifier = MockNotifier::failing();
    let log: Arc<dyn PostureLog> = Arc::new(failing.clone());
    let bell: Arc<dyn Notifier> = Arc::new(notifier.clone());
    let dispatcher = AlertDispatcher::spawn(Some(log), Some(bell), 20).unwrap();
    let mut monitor = PostureMonitor::new(config(1.0), None, dispatcher);

    let source = MockLandmarkSource::new(LandmarkFrameBuilder::slouched().sequence(0.0, 10.0, 1.0));
    let reports: Vec<_> = source
        .frames()
        .map(|frame| monitor.process(&frame.unwrap()))
        .collect();
    assert_eq!(reports.len(), 10);

    let alerts = monitor.finish();
    assert!(alerts > 0);
    assert_eq!(failing.attempts(), alerts);
    assert_eq!(notifier.count(), alerts);
}
