// ABOUTME: Hysteresis-based repetition state machine over per-tick angle readings
// ABOUTME: Counts exactly one rep per Extended to Flexed transition and ignores absent readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::config::ThresholdConfig;
use repcount_core::errors::ConfigError;
use repcount_core::models::{AngleReading, RepCompleted, RepState};
use tracing::debug;

/// Two-threshold repetition counter
///
/// # Transitions
///
/// - **absent reading**: nothing changes
/// - **angle >= upper**: `Extended`
/// - **angle <= lower from `Extended`**: `Flexed`, count one rep, emit `RepCompleted`
/// - **angle <= lower from `Idle` or `Flexed`**: `Flexed`, no rep
/// - **between thresholds**: nothing changes
///
/// `Flexed` to `Extended` is the reset edge and never counts, so a rep cannot
/// be counted before the first extension or twice during sustained flexion.
/// The dead band between the thresholds absorbs frame-to-frame jitter that a
/// single midpoint threshold would turn into extra counts.
#[derive(Debug, Clone)]
pub struct RepStateMachine {
    thresholds: ThresholdConfig,
    state: RepState,
    reps: u32,
    /// Highest angle seen since the last entry into `Extended`
    peak_degrees: f64,
}

impl RepStateMachine {
    /// Create a state machine in `Idle` with zero reps
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the thresholds are invalid.
    pub fn new(thresholds: ThresholdConfig) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            state: RepState::Idle,
            reps: 0,
            peak_degrees: 0.0,
        })
    }

    /// Feed one tick's reading
    ///
    /// Returns the rep event when this reading completed a rep.
    pub fn observe(&mut self, reading: Option<AngleReading>) -> Option<RepCompleted> {
        let degrees = reading?.degrees();

        if degrees >= self.thresholds.upper_degrees {
            if self.state == RepState::Extended {
                self.peak_degrees = self.peak_degrees.max(degrees);
            } else {
                debug!(angle = degrees, from = %self.state, "Joint extended");
                self.state = RepState::Extended;
                self.peak_degrees = degrees;
            }
            return None;
        }

        if degrees <= self.thresholds.lower_degrees {
            let previous = std::mem::replace(&mut self.state, RepState::Flexed);
            if previous != RepState::Extended {
                return None;
            }
            self.reps = self.reps.saturating_add(1);
            debug!(total = self.reps, angle = degrees, "Rep completed");
            return Some(RepCompleted {
                total: self.reps,
                peak_degrees: self.peak_degrees,
                trough_degrees: degrees,
            });
        }

        None
    }

    /// Return to `Idle` with zero reps
    pub fn reset(&mut self) {
        self.state = RepState::Idle;
        self.reps = 0;
        self.peak_degrees = 0.0;
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> RepState {
        self.state
    }

    /// Reps counted since construction or the last reset
    #[must_use]
    pub const fn reps(&self) -> u32 {
        self.reps
    }

    /// Configured thresholds
    #[must_use]
    pub const fn thresholds(&self) -> ThresholdConfig {
        self.thresholds
    }
}
