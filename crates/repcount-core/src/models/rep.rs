// ABOUTME: Repetition domain models: angle readings, rep states, rep events, and tick snapshots
// ABOUTME: Shapes emitted by the state machine and delivered to session observers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::angles;

/// A joint angle in degrees, always within [0, 180]
///
/// An absent reading is represented as `Option::<AngleReading>::None`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleReading(f64);

impl AngleReading {
    /// Build a reading from degrees, clamping into [0, 180]
    ///
    /// Returns `None` for non-finite input.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        degrees
            .is_finite()
            .then(|| Self(degrees.clamp(angles::MIN_DEGREES, angles::MAX_DEGREES)))
    }

    /// Angle in degrees
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for AngleReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Hysteresis state of the tracked joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepState {
    /// No qualifying sample observed yet
    #[default]
    Idle,
    /// Angle at or above the upper threshold
    Extended,
    /// Angle at or below the lower threshold
    Flexed,
}

impl RepState {
    /// Display label for the host UI
    ///
    /// For a curl the extended arm hangs down and the flexed arm is up. The
    /// label is cosmetic and plays no part in counting.
    #[must_use]
    pub const fn phase(self) -> Option<RepPhase> {
        match self {
            Self::Idle => None,
            Self::Extended => Some(RepPhase::Down),
            Self::Flexed => Some(RepPhase::Up),
        }
    }
}

impl fmt::Display for RepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Extended => f.write_str("extended"),
            Self::Flexed => f.write_str("flexed"),
        }
    }
}

/// UI-facing phase label derived from `RepState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepPhase {
    /// Arm extended
    Down,
    /// Arm flexed
    Up,
}

/// Emitted on every `Extended` to `Flexed` transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepCompleted {
    /// Rep count including this rep
    pub total: u32,
    /// Highest angle seen while extended during this cycle
    pub peak_degrees: f64,
    /// Angle that completed the rep
    pub trough_degrees: f64,
}

impl RepCompleted {
    /// Degrees travelled between full extension and the completing flexion
    #[must_use]
    pub fn range_of_motion(&self) -> f64 {
        (self.peak_degrees - self.trough_degrees).max(0.0)
    }
}

/// Per-tick view of the session handed to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Reps counted so far
    pub total_reps: u32,
    /// Session seconds excluding pauses
    pub elapsed_seconds: u64,
    /// Angle computed this tick, `None` when the reading was absent
    pub last_angle: Option<f64>,
    /// State machine state after this tick
    pub state: RepState,
    /// Running form score in [0, 100]
    pub form_score: u8,
}
