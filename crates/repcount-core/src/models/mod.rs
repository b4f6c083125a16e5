// ABOUTME: Core data models for joints, reps, and the processing loop status
// ABOUTME: Re-exports joint, rep, and status types for convenient access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Joint positions, detector landmarks, and arm selection
pub mod joint;
/// Angle readings, rep states, and rep events
pub mod rep;

pub use joint::{Joint, JointSample, Point2, RawLandmark, TrackedArm};
pub use rep::{AngleReading, RepCompleted, RepPhase, RepState, TickSnapshot};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing loop status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopStatus {
    /// No resources held, no ticks scheduled
    #[default]
    Stopped,
    /// Resources held, ticks scheduled
    Running,
    /// Resources held, ticks suspended
    Paused,
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => f.write_str("stopped"),
            Self::Running => f.write_str("running"),
            Self::Paused => f.write_str("paused"),
        }
    }
}
