// ABOUTME: Repetition intelligence algorithms for the repcount engine
// ABOUTME: Joint angle geometry, rep state machine, form quality scoring, and tempo metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Repetition intelligence.
//!
//! Everything here is synchronous and driven by the caller; scheduling lives
//! in the processing loop of the root crate.

/// Geometric algorithms over joint positions
pub mod algorithms;
/// Running form score from per-rep range of motion
pub mod form_quality;
/// Hysteresis-based repetition state machine
pub mod rep_state_machine;
/// Tempo metrics and elapsed-time formatting
pub mod tempo;

pub use algorithms::joint_angle::{angle_reading, joint_angle};
pub use form_quality::FormQualityTracker;
pub use rep_state_machine::RepStateMachine;
pub use tempo::{average_seconds_per_rep, format_mm_ss, SessionSummary};
