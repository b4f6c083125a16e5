// ABOUTME: Engine configuration with hysteresis thresholds, confidence floor, and tick interval
// ABOUTME: Environment-only loading with fail-fast validation at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::environment::env_parse_or;
use crate::constants::{angles, defaults, env_config, form, timing};
use crate::errors::ConfigError;
use crate::models::TrackedArm;

/// Two-threshold hysteresis band for the rep state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// At or above this angle the joint is extended
    pub upper_degrees: f64,
    /// At or below this angle the joint is flexed
    pub lower_degrees: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            upper_degrees: defaults::UPPER_THRESHOLD_DEGREES,
            lower_degrees: defaults::LOWER_THRESHOLD_DEGREES,
        }
    }
}

impl ThresholdConfig {
    /// Create a validated threshold pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either threshold is outside [0, 180] or the
    /// upper threshold does not exceed the lower one.
    pub fn new(upper_degrees: f64, lower_degrees: f64) -> Result<Self, ConfigError> {
        let thresholds = Self {
            upper_degrees,
            lower_degrees,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the hysteresis band
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a threshold outside [0, 180]
    /// and `ConfigError::InvalidThresholds` when upper <= lower.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "upper_degrees",
            self.upper_degrees,
            angles::MIN_DEGREES,
            angles::MAX_DEGREES,
        )?;
        check_range(
            "lower_degrees",
            self.lower_degrees,
            angles::MIN_DEGREES,
            angles::MAX_DEGREES,
        )?;
        if self.upper_degrees <= self.lower_degrees {
            return Err(ConfigError::InvalidThresholds {
                upper: self.upper_degrees,
                lower: self.lower_degrees,
            });
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hysteresis thresholds
    pub thresholds: ThresholdConfig,
    /// Minimum visibility for every tracked joint; below it the reading is absent
    pub min_visibility: f64,
    /// Arm whose elbow angle is tracked
    pub tracked_arm: TrackedArm,
    /// Interval between frame ticks in milliseconds
    pub frame_interval_ms: u64,
    /// Form score reported before any rep has been scored
    pub form_baseline: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            min_visibility: defaults::MIN_VISIBILITY,
            tracked_arm: TrackedArm::default(),
            frame_interval_ms: defaults::FRAME_INTERVAL_MS,
            form_baseline: defaults::FORM_BASELINE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Unparseable values fall back to their defaults with a warning; values
    /// that parse but are out of range are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the resulting configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            thresholds: ThresholdConfig {
                upper_degrees: env_parse_or(
                    env_config::UPPER_THRESHOLD_DEG,
                    defaults::UPPER_THRESHOLD_DEGREES,
                ),
                lower_degrees: env_parse_or(
                    env_config::LOWER_THRESHOLD_DEG,
                    defaults::LOWER_THRESHOLD_DEGREES,
                ),
            },
            min_visibility: env_parse_or(env_config::MIN_VISIBILITY, defaults::MIN_VISIBILITY),
            tracked_arm: env_parse_or(env_config::TRACKED_ARM, TrackedArm::default()),
            frame_interval_ms: env_parse_or(
                env_config::FRAME_INTERVAL_MS,
                defaults::FRAME_INTERVAL_MS,
            ),
            form_baseline: env_parse_or(env_config::FORM_BASELINE, defaults::FORM_BASELINE),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every field
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        check_range("min_visibility", self.min_visibility, 0.0, 1.0)?;
        if !(timing::MIN_FRAME_INTERVAL_MS..=timing::MAX_FRAME_INTERVAL_MS)
            .contains(&self.frame_interval_ms)
        {
            return Err(ConfigError::ValueOutOfRange {
                field: "frame_interval_ms",
                value: self.frame_interval_ms as f64,
            });
        }
        if self.form_baseline > form::MAX_SCORE {
            return Err(ConfigError::ValueOutOfRange {
                field: "form_baseline",
                value: f64::from(self.form_baseline),
            });
        }
        Ok(())
    }

    /// Frame tick interval
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Session clock tick interval, fixed at one second
    #[must_use]
    pub const fn clock_interval(&self) -> Duration {
        Duration::from_secs(timing::CLOCK_TICK_SECS)
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange { field, value })
    }
}
