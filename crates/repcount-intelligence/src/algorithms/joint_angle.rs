// ABOUTME: Interior joint angle from three 2D points using the two-vector atan2 formula
// ABOUTME: Confidence-gated conversion of a joint sample into an angle reading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::constants::angles;
use repcount_core::models::{AngleReading, JointSample, Point2};

const FULL_TURN_DEGREES: f64 = 360.0;

/// Interior angle at `vertex` between the rays to `first` and `second`, in degrees
///
/// `|atan2(second - vertex) - atan2(first - vertex)|`, folded into [0, 180]
/// by replacing anything above 180 with `360 - angle`. Symmetric in `first`
/// and `second`. Callers must pass finite coordinates.
#[must_use]
pub fn joint_angle(first: Point2, vertex: Point2, second: Point2) -> f64 {
    let to_second = (second.y - vertex.y).atan2(second.x - vertex.x);
    let to_first = (first.y - vertex.y).atan2(first.x - vertex.x);
    let degrees = (to_second - to_first).to_degrees().abs();

    if degrees > angles::MAX_DEGREES {
        FULL_TURN_DEGREES - degrees
    } else {
        degrees
    }
}

/// Elbow angle of a sample, or `None` when any joint is below `min_visibility`
#[must_use]
pub fn angle_reading(sample: &JointSample, min_visibility: f64) -> Option<AngleReading> {
    if !sample.is_visible(min_visibility) {
        return None;
    }
    AngleReading::from_degrees(joint_angle(
        sample.shoulder.position,
        sample.elbow.position,
        sample.wrist.position,
    ))
}
