//! Temporal smoothing of per-frame labels by majority vote.

use std::collections::VecDeque;

use crate::domain::PostureLabel;

/// Configuration for label smoothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothingConfig {
    /// Number of recent labels kept in the voting window.
    pub window: usize,
    /// Minimum window fill before voting starts.
    pub min_fill: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 15,
            min_fill: 5,
        }
    }
}

/// Stabilized label and its vote share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedLabel {
    /// Winning label.
    pub label: PostureLabel,
    /// Share of the window voting for the label (0.0 to 1.0).
    pub confidence: f32,
}

/// Rolling majority vote over the most recent instant labels.
#[derive(Debug, Clone)]
pub struct LabelSmoother {
    capacity: usize,
    min_fill: usize,
    window: VecDeque<PostureLabel>,
}

impl LabelSmoother {
    /// Creates a smoother.
    ///
    /// A zero window is treated as a window of one, and `min_fill` is capped
    /// at the window so that voting always starts once the window is full.
    #[must_use]
    pub fn new(config: &SmoothingConfig) -> Self {
        let capacity = config.window.max(1);
        Self {
            capacity,
            min_fill: config.min_fill.min(capacity),
            window: VecDeque::with_capacity(capacity),
        }
    }

    /// Adds a label and returns the smoothed result.
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, label: PostureLabel) -> SmoothedLabel {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(label);

        if self.window.len() < self.min_fill {
            return SmoothedLabel {
                label,
                confidence: 1.0,
            };
        }

        let (winner, count) = self.majority();
        SmoothedLabel {
            label: winner,
            confidence: count as f32 / self.window.len() as f32,
        }
    }

    /// Most frequent label; ties go to the label seen first in the window.
    fn majority(&self) -> (PostureLabel, usize) {
        let mut tally: Vec<(PostureLabel, usize)> = Vec::new();
        for &label in &self.window {
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((label, 1)),
            }
        }

        let mut best = (PostureLabel::Unknown, 0);
        for entry in tally {
            if entry.1 > best.1 {
                best = entry;
            }
        }
        best
    }
}
