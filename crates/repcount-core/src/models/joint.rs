// ABOUTME: Joint and landmark models for pose-derived angle input
// ABOUTME: Converts loosely shaped detector landmarks into strict shoulder/elbow/wrist samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::landmarks;
use crate::errors::DetectionFailure;

/// A 2D position in detector image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point2 {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A tracked joint with its detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Joint position
    pub position: Point2,
    /// Visibility / confidence score in [0, 1]
    pub visibility: f64,
}

impl Joint {
    /// Create a new joint
    #[must_use]
    pub const fn new(position: Point2, visibility: f64) -> Self {
        Self {
            position,
            visibility,
        }
    }
}

/// Shoulder, elbow, and wrist of the tracked arm for a single frame
///
/// Produced fresh each tick and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    /// First ray endpoint
    pub shoulder: Joint,
    /// Angle vertex
    pub elbow: Joint,
    /// Second ray endpoint
    pub wrist: Joint,
}

impl JointSample {
    /// Lowest visibility across the three joints
    #[must_use]
    pub fn min_visibility(&self) -> f64 {
        self.shoulder
            .visibility
            .min(self.elbow.visibility)
            .min(self.wrist.visibility)
    }

    /// Every joint meets the confidence floor
    #[must_use]
    pub fn is_visible(&self, min_visibility: f64) -> bool {
        self.min_visibility() >= min_visibility
    }

    /// Extract the tracked arm from detector output
    ///
    /// Returns `Ok(None)` when any of the three joints is missing, which the
    /// loop treats as an absent reading.
    ///
    /// # Errors
    ///
    /// Returns `DetectionFailure::MalformedOutput` if a tracked landmark has
    /// non-finite coordinates or a visibility outside [0, 1].
    pub fn from_landmarks(
        detected: &[RawLandmark],
        arm: TrackedArm,
    ) -> Result<Option<Self>, DetectionFailure> {
        let [shoulder_name, elbow_name, wrist_name] = arm.landmark_names();
        let (Some(shoulder), Some(elbow), Some(wrist)) = (
            find_landmark(detected, shoulder_name),
            find_landmark(detected, elbow_name),
            find_landmark(detected, wrist_name),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            shoulder: shoulder.to_joint()?,
            elbow: elbow.to_joint()?,
            wrist: wrist.to_joint()?,
        }))
    }
}

fn find_landmark<'a>(detected: &'a [RawLandmark], name: &str) -> Option<&'a RawLandmark> {
    detected
        .iter()
        .find(|landmark| landmark.name.eq_ignore_ascii_case(name))
}

/// A named landmark exactly as a detector reports it
///
/// Detectors hand back loosely shaped results; visibility may be missing.
/// Nothing downstream of `JointSample::from_landmarks` sees this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    /// Landmark name, e.g. `left_elbow`
    pub name: String,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Visibility score; missing means the detector gave no confidence
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl RawLandmark {
    /// Create a landmark with a visibility score
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64, visibility: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            visibility: Some(visibility),
        }
    }

    /// Validate and convert into a strict joint
    ///
    /// A missing visibility becomes 0.0 so the joint never passes a
    /// confidence floor.
    ///
    /// # Errors
    ///
    /// Returns `DetectionFailure::MalformedOutput` for non-finite coordinates
    /// or a visibility outside [0, 1].
    pub fn to_joint(&self) -> Result<Joint, DetectionFailure> {
        let position = Point2::new(self.x, self.y);
        if !position.is_finite() {
            return Err(DetectionFailure::MalformedOutput(format!(
                "landmark '{}' has non-finite coordinates",
                self.name
            )));
        }
        let visibility = self.visibility.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&visibility) {
            return Err(DetectionFailure::MalformedOutput(format!(
                "landmark '{}' visibility {visibility} outside [0, 1]",
                self.name
            )));
        }
        Ok(Joint::new(position, visibility))
    }
}

/// Which arm feeds the joint sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedArm {
    /// Left shoulder, elbow, and wrist
    #[default]
    Left,
    /// Right shoulder, elbow, and wrist
    Right,
}

impl TrackedArm {
    /// Shoulder, elbow, and wrist landmark names for this arm
    #[must_use]
    pub const fn landmark_names(self) -> [&'static str; 3] {
        match self {
            Self::Left => [
                landmarks::LEFT_SHOULDER,
                landmarks::LEFT_ELBOW,
                landmarks::LEFT_WRIST,
            ],
            Self::Right => [
                landmarks::RIGHT_SHOULDER,
                landmarks::RIGHT_ELBOW,
                landmarks::RIGHT_WRIST,
            ],
        }
    }
}

impl FromStr for TrackedArm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(format!("unknown arm '{other}', expected left or right")),
        }
    }
}

impl fmt::Display for TrackedArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}
