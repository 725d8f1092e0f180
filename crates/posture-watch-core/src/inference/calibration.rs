//! Turning raw classifier decision values into verdicts.
//!
//! A linear SVM exports an uncalibrated margin, a logistic regression exports
//! log-odds. Both end up as a good/bad verdict with a confidence in `[0.5, 1]`.

use crate::domain::Verdict;

/// Logistic sigmoid.
#[inline]
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Verdict from a signed distance to the separating hyperplane.
///
/// The margin is not a probability; its magnitude is squashed so that points
/// far from the boundary approach full confidence. A margin of exactly zero
/// is bad posture.
#[must_use]
pub fn margin_verdict(margin: f32) -> Verdict {
    Verdict {
        good: margin > 0.0,
        confidence: sigmoid(margin.abs()),
    }
}

/// Verdict from the log-odds of good posture.
#[must_use]
pub fn log_odds_verdict(log_odds: f32) -> Verdict {
    let p_good = sigmoid(log_odds);
    Verdict {
        good: p_good >= 0.5,
        confidence: p_good.max(1.0 - p_good),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_margin_sign_decides() {
        assert!(margin_verdict(0.3).good);
        assert!(!margin_verdict(-0.3).good);
        assert!(!margin_verdict(0.0).good);
    }

    #[test]
    fn test_margin_confidence_is_symmetric() {
        let a = margin_verdict(1.5).confidence;
        let b = margin_verdict(-1.5).confidence;
        assert!((a - b).abs() < 1e-6);
        assert!(a > 0.5);
    }

    #[test]
    fn test_log_odds_boundary_is_good() {
        let verdict = log_odds_verdict(0.0);
        assert!(verdict.good);
        assert!((verdict.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_log_odds_confidence_tracks_probability() {
        let verdict = log_odds_verdict(-3.0);
        assert!(!verdict.good);
        assert!((verdict.confidence - (1.0 - sigmoid(-3.0))).abs() < 1e-6);
    }
}
