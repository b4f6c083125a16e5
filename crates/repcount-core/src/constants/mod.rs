// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default thresholds, environment variable names, and landmark identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Default engine settings used when the environment does not override them
pub mod defaults {
    /// Angle at or above which the arm counts as extended (degrees)
    pub const UPPER_THRESHOLD_DEGREES: f64 = 160.0;
    /// Angle at or below which the arm counts as flexed (degrees)
    pub const LOWER_THRESHOLD_DEGREES: f64 = 50.0;
    /// Minimum landmark visibility for a joint to contribute to a reading
    pub const MIN_VISIBILITY: f64 = 0.5;
    /// Frame tick interval, roughly one display refresh at 30 Hz
    pub const FRAME_INTERVAL_MS: u64 = 33;
    /// Form score reported before any rep has been scored
    pub const FORM_BASELINE: u8 = 85;
}

/// Geometric limits for joint angles
pub mod angles {
    /// Smallest interior angle a joint can report
    pub const MIN_DEGREES: f64 = 0.0;
    /// Largest interior angle a joint can report
    pub const MAX_DEGREES: f64 = 180.0;
}

/// Session timing constants
pub mod timing {
    /// Session clock granularity in seconds; fixed, independent of frame rate
    pub const CLOCK_TICK_SECS: u64 = 1;
    /// Smallest accepted frame interval
    pub const MIN_FRAME_INTERVAL_MS: u64 = 1;
    /// Largest accepted frame interval
    pub const MAX_FRAME_INTERVAL_MS: u64 = 1_000;
}

/// Form quality scoring constants
pub mod form {
    /// Elbow range of motion that scores 100 for a single curl (about 165 to 35 degrees)
    pub const IDEAL_RANGE_OF_MOTION_DEGREES: f64 = 130.0;
    /// Weight of the newest rep in the running form score
    pub const SMOOTHING_FACTOR: f64 = 0.3;
    /// Maximum form score
    pub const MAX_SCORE: u8 = 100;
}

/// Environment variable names read by `EngineConfig::from_env`
pub mod env_config {
    /// Upper (extension) threshold in degrees
    pub const UPPER_THRESHOLD_DEG: &str = "REPCOUNT_UPPER_THRESHOLD_DEG";
    /// Lower (flexion) threshold in degrees
    pub const LOWER_THRESHOLD_DEG: &str = "REPCOUNT_LOWER_THRESHOLD_DEG";
    /// Minimum joint visibility in [0, 1]
    pub const MIN_VISIBILITY: &str = "REPCOUNT_MIN_VISIBILITY";
    /// Tracked arm (`left` or `right`)
    pub const TRACKED_ARM: &str = "REPCOUNT_TRACKED_ARM";
    /// Frame tick interval in milliseconds
    pub const FRAME_INTERVAL_MS: &str = "REPCOUNT_FRAME_INTERVAL_MS";
    /// Initial form score in [0, 100]
    pub const FORM_BASELINE: &str = "REPCOUNT_FORM_BASELINE";
}

/// Environment variable names read by `LoggingConfig::from_env`
pub mod log_env {
    /// Filter directives, e.g. `repcount=debug`
    pub const FILTER: &str = "RUST_LOG";
    /// Output format (`json`, `pretty` or `compact`)
    pub const FORMAT: &str = "LOG_FORMAT";
    /// Switch for source file and line numbers
    pub const INCLUDE_LOCATION: &str = "LOG_INCLUDE_LOCATION";
    /// Switch for span open and close events
    pub const INCLUDE_SPANS: &str = "LOG_INCLUDE_SPANS";
    /// Service name stamped on the startup event
    pub const SERVICE_NAME: &str = "SERVICE_NAME";
    /// Service version stamped on the startup event
    pub const SERVICE_VERSION: &str = "SERVICE_VERSION";
    /// Filter used when none is configured
    pub const DEFAULT_FILTER: &str = "info";
}

/// Landmark names emitted by pose detectors (`MediaPipe` pose naming)
pub mod landmarks {
    /// Left shoulder
    pub const LEFT_SHOULDER: &str = "left_shoulder";
    /// Left elbow
    pub const LEFT_ELBOW: &str = "left_elbow";
    /// Left wrist
    pub const LEFT_WRIST: &str = "left_wrist";
    /// Right shoulder
    pub const RIGHT_SHOULDER: &str = "right_shoulder";
    /// Right elbow
    pub const RIGHT_ELBOW: &str = "right_elbow";
    /// Right wrist
    pub const RIGHT_WRIST: &str = "right_wrist";
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Engine service name
    pub const REPCOUNT: &str = "repcount";
}
