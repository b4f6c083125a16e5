// ABOUTME: Lifecycle transition errors for the processing loop
// ABOUTME: Reports invalid transitions, acquisition failures, and a vanished driver task
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AcquisitionError;
use crate::models::LoopStatus;

/// Lifecycle operations exposed by the processing loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleOperation {
    /// Acquire resources and begin ticking
    Start,
    /// Suspend ticking, keep resources
    Pause,
    /// Continue ticking after a pause
    Resume,
    /// Release resources and stop ticking
    Stop,
    /// Zero counters and timing
    Reset,
}

impl LifecycleOperation {
    /// Statuses from which this operation is permitted
    #[must_use]
    pub const fn allowed_from(self) -> &'static [LoopStatus] {
        match self {
            Self::Start => &[LoopStatus::Stopped],
            Self::Pause => &[LoopStatus::Running],
            Self::Resume => &[LoopStatus::Paused],
            Self::Stop => &[LoopStatus::Running, LoopStatus::Paused],
            Self::Reset => &[LoopStatus::Stopped, LoopStatus::Paused],
        }
    }

    /// Whether the operation may run while the loop is in `status`
    #[must_use]
    pub fn permits(self, status: LoopStatus) -> bool {
        self.allowed_from().contains(&status)
    }
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors returned by processing loop lifecycle calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The call is not permitted from the current status; nothing changed
    #[error("Cannot {operation} while {status}")]
    InvalidTransition {
        /// Operation that was attempted
        operation: LifecycleOperation,
        /// Status at the time of the call
        status: LoopStatus,
    },

    /// Start failed because a collaborator could not be acquired
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// The task driving the loop has shut down
    #[error("Processing loop driver is no longer running")]
    DriverClosed,
}

/// Result alias for lifecycle calls
pub type LifecycleResult<T = ()> = Result<T, LifecycleError>;
