//! Duration-based alert state machine.
//!
//! Tracks how long the smoothed label has named a defect and emits an
//! [`AlertEvent`] once the episode outlasts the threshold. After firing, the
//! episode timer restarts, so a persisting episode alerts again every
//! threshold period.

use crate::domain::{AlertEvent, PostureLabel};

/// Configuration for bad-posture alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// Continuous bad-posture time before an alert fires, in seconds.
    pub threshold_secs: f64,
    /// User the alerts are recorded for.
    pub user_id: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold_secs: 30.0,
            user_id: 1,
        }
    }
}

/// Observable alert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// Posture is good or unknown; no timer running.
    Good,
    /// Bad episode in progress, no alert fired yet.
    BadActive,
    /// At least one alert fired in the current episode; cooldown timer running.
    Alerted,
}

/// Timer state of the current bad-posture episode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertEpisode {
    /// Whether a bad episode is in progress.
    pub is_bad: bool,
    /// Start of the current timer period, in frame seconds.
    pub start_time: Option<f64>,
}

/// Alert state machine driven once per frame by the smoothed label.
#[derive(Debug, Clone)]
pub struct AlertMonitor {
    config: AlertConfig,
    episode: AlertEpisode,
    fired: u32,
}

impl AlertMonitor {
    /// Creates a monitor in the good state.
    #[must_use]
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            episode: AlertEpisode::default(),
            fired: 0,
        }
    }

    /// Advances the state machine with the smoothed label observed at `now`.
    ///
    /// Returns the alert to dispatch, if one fired on this frame.
    pub fn update(&mut self, label: PostureLabel, now: f64) -> Option<AlertEvent> {
        if !label.is_defect() {
            self.reset();
            return None;
        }

        let start = match self.episode.start_time {
            Some(start) if self.episode.is_bad => start,
            _ => {
                self.episode = AlertEpisode {
                    is_bad: true,
                    start_time: Some(now),
                };
                return None;
            }
        };

        if now - start <= self.config.threshold_secs {
            return None;
        }

        self.episode.start_time = Some(now);
        self.fired += 1;

        #[allow(clippy::cast_possible_truncation)]
        Some(AlertEvent {
            user_id: self.config.user_id,
            label,
            duration_secs: self.config.threshold_secs as f32,
            timestamp: now,
        })
    }

    /// Returns to the good state.
    pub fn reset(&mut self) {
        self.episode = AlertEpisode::default();
        self.fired = 0;
    }

    /// Current episode timer.
    #[must_use]
    pub const fn episode(&self) -> AlertEpisode {
        self.episode
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AlertState {
        if !self.episode.is_bad {
            AlertState::Good
        } else if self.fired == 0 {
            AlertState::BadActive
        } else {
            AlertState::Alerted
        }
    }

    /// Alert threshold in seconds.
    #[must_use]
    pub const fn threshold_secs(&self) -> f64 {
        self.config.threshold_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostureLabel::{Good, GoodSide, Slouching, Unknown};

    const THRESHOLD: f64 = 10.0;

    fn monitor() -> AlertMonitor {
        AlertMonitor::new(AlertConfig {
            threshold_secs: THRESHOLD,
            user_id: 7,
        })
    }

    /// Feeds `label` at 0.5 s intervals over `[from, to]` and counts alerts.
    fn run(m: &mut AlertMonitor, label: PostureLabel, from: f64, to: f64) -> usize {
        let mut alerts = 0;
        let mut t = from;
        while t <= to + 1e-9 {
            if m.update(label, t).is_some() {
                alerts += 1;
            }
            t += 0.5;
        }
        alerts
    }

    #[test]
    fn test_entering_bad_starts_timer() {
        let mut m = monitor();
        assert_eq!(m.state(), AlertState::Good);
        assert!(m.update(Slouching, 3.0).is_none());
        assert_eq!(m.state(), AlertState::BadActive);
        assert_eq!(
            m.episode(),
            AlertEpisode {
                is_bad: true,
                start_time: Some(3.0)
            }
        );
    }

    #[test]
    fn test_single_alert_just_past_threshold() {
        let mut m = monitor();
        assert_eq!(run(&mut m, Slouching, 0.0, THRESHOLD + 0.5), 1);
        assert_eq!(m.state(), AlertState::Alerted);
    }

    #[test]
    fn test_no_alert_at_exact_threshold() {
        let mut m = monitor();
        assert_eq!(run(&mut m, Slouching, 0.0, THRESHOLD), 0);
    }

    #[test]
    fn test_repeating_alerts() {
        let mut m = monitor();
        // Alerts at 10.5, 21.0 and 31.5.
        assert_eq!(run(&mut m, Slouching, 0.0, 3.0 * THRESHOLD + 1.5), 3);
    }

    #[test]
    fn test_alert_event_snapshot() {
        let mut m = monitor();
        m.update(Slouching, 0.0);
        let event = m.update(Slouching, 12.0);
        assert_eq!(
            event,
            Some(AlertEvent {
                user_id: 7,
                label: Slouching,
                duration_secs: 10.0,
                timestamp: 12.0,
            })
        );
        assert_eq!(m.episode().start_time, Some(12.0));
    }

    #[test]
    fn test_good_frame_resets_timer() {
        let mut m = monitor();
        assert_eq!(run(&mut m, Slouching, 0.0, 9.5), 0);
        assert!(m.update(Good, 10.0).is_none());
        assert_eq!(m.episode(), AlertEpisode::default());

        // Accumulation restarts from 10.5; nothing fires before 20.5.
        assert_eq!(run(&mut m, Slouching, 10.5, 20.5), 0);
        assert_eq!(run(&mut m, Slouching, 21.0, 21.0), 1);
    }

    #[test]
    fn test_good_side_and_unknown_reset() {
        for label in [GoodSide, Unknown] {
            let mut m = monitor();
            m.update(Slouching, 0.0);
            m.update(label, 5.0);
            assert_eq!(m.state(), AlertState::Good);
            assert!(m.episode().start_time.is_none());
        }
    }

    #[test]
    fn test_defect_change_keeps_episode() {
        let mut m = monitor();
        m.update(Slouching, 0.0);
        m.update(PostureLabel::ForwardHead, 6.0);
        let event = m.update(PostureLabel::LeaningLeft, 10.5);
        assert_eq!(event.map(|e| e.label), Some(PostureLabel::LeaningLeft));
    }
}
