// ABOUTME: Core types and constants for the repcount repetition-counting engine
// ABOUTME: Foundation crate with error handling, joint and rep models, configuration, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Repcount Core
//!
//! Foundation crate providing shared types and constants for the repcount
//! engine. Nothing in here knows about scheduling or I/O; the intelligence
//! crate and the processing loop build on these shapes.
//!
//! ## Modules
//!
//! - **errors**: Acquisition, detection, configuration, and lifecycle errors
//! - **constants**: Defaults, environment variable names, and landmark names
//! - **models**: Joint samples, angle readings, rep states and events, loop status
//! - **config**: Validated engine configuration loaded from the environment

/// Typed error enums shared by every layer of the engine
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`JointSample`, `AngleReading`, `RepState`, `LoopStatus`, ...)
pub mod models;

/// Engine configuration (thresholds, confidence floor, tracked arm, intervals)
pub mod config;

pub use config::{EngineConfig, ThresholdConfig};
pub use errors::{AcquisitionError, ConfigError, DetectionFailure, LifecycleError};
