// ABOUTME: Running form quality score derived from each rep's range of motion
// ABOUTME: Exponentially smoothed 0-100 score that starts from a configurable baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::constants::form;
use repcount_core::models::RepCompleted;

/// Running form score
///
/// Each completed rep is scored by how much of the ideal range of motion it
/// covered (a half curl scores about 50). The running score blends every new
/// rep score into the previous value so a single sloppy rep moves it but does
/// not dominate it.
#[derive(Debug, Clone)]
pub struct FormQualityTracker {
    baseline: u8,
    score: f64,
    scored_reps: u32,
}

impl FormQualityTracker {
    /// Create a tracker reporting `baseline` until the first rep (clamped to 100)
    #[must_use]
    pub fn new(baseline: u8) -> Self {
        let baseline = baseline.min(form::MAX_SCORE);
        Self {
            baseline,
            score: f64::from(baseline),
            scored_reps: 0,
        }
    }

    /// Score a single rep in [0, 100]
    #[must_use]
    pub fn rep_score(event: &RepCompleted) -> f64 {
        let max = f64::from(form::MAX_SCORE);
        (event.range_of_motion() / form::IDEAL_RANGE_OF_MOTION_DEGREES * max).clamp(0.0, max)
    }

    /// Blend a completed rep into the running score
    pub fn record(&mut self, event: &RepCompleted) {
        let rep_score = Self::rep_score(event);
        self.score = form::SMOOTHING_FACTOR.mul_add(rep_score - self.score, self.score);
        self.scored_reps = self.scored_reps.saturating_add(1);
    }

    /// Current score rounded to a whole percentage
    #[must_use]
    pub fn score(&self) -> u8 {
        self.score.round().clamp(0.0, f64::from(form::MAX_SCORE)) as u8
    }

    /// Reps that contributed to the score
    #[must_use]
    pub const fn scored_reps(&self) -> u32 {
        self.scored_reps
    }

    /// Return to the baseline score
    pub fn reset(&mut self) {
        self.score = f64::from(self.baseline);
        self.scored_reps = 0;
    }
}
