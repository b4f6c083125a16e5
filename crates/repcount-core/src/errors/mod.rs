// ABOUTME: Error taxonomy for the repcount engine
// ABOUTME: Acquisition, per-tick detection, configuration, and lifecycle transition errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Engine Error Types
//!
//! - `AcquisitionError` - frame source or detector unavailable at start; fatal to the start attempt
//! - `DetectionFailure` - a single frame could not be turned into landmarks; recovered locally
//! - `ConfigError` - thresholds or confidence floor out of range; prevents construction
//! - `LifecycleError` - a lifecycle call made from a state that does not permit it

/// Lifecycle transition errors and the operations that can raise them
pub mod lifecycle;

pub use lifecycle::{LifecycleError, LifecycleOperation, LifecycleResult};

use thiserror::Error;

/// Failure to acquire the frame source or landmark detector
///
/// Each variant carries a human-readable detail so the host UI can tell the
/// user whether to grant a permission, plug in a camera, or reinstall a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// The operating system or user refused access to the device
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// No frame source device (or recording) exists at the configured location
    #[error("Frame source not found: {0}")]
    DeviceNotFound(String),

    /// The landmark detection model could not be loaded
    #[error("Landmark model failed to load: {0}")]
    ModelLoadFailed(String),
}

impl AcquisitionError {
    /// Short actionable hint for the host UI
    #[must_use]
    pub const fn guidance(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "Allow camera access for this application and try again",
            Self::DeviceNotFound(_) => "Connect a camera or choose another video source",
            Self::ModelLoadFailed(_) => "Reinstall or update the pose detection model",
        }
    }

    /// Map an I/O failure while opening a frame source or reading a recording
    #[must_use]
    pub fn from_source_io(context: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(format!("{context}: {error}"))
            }
            _ => Self::DeviceNotFound(format!("{context}: {error}")),
        }
    }
}

/// Per-frame detection failure; the tick is treated as an absent reading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionFailure {
    /// The detector raised an error while running inference
    #[error("Detector error: {0}")]
    Detector(String),

    /// The detector produced output that does not meet the landmark contract
    #[error("Malformed detector output: {0}")]
    MalformedOutput(String),
}

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Upper threshold does not exceed lower threshold
    #[error("Invalid thresholds: upper {upper} must exceed lower {lower}")]
    InvalidThresholds {
        /// Configured extension threshold
        upper: f64,
        /// Configured flexion threshold
        lower: f64,
    },

    /// Numeric value outside the valid range for the parameter
    #[error("Value out of range for {field}: {value}")]
    ValueOutOfRange {
        /// Name of the offending setting
        field: &'static str,
        /// Value that was rejected
        value: f64,
    },
}
