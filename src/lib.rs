// ABOUTME: Main library entry point for the repcount repetition-counting engine
// ABOUTME: Wires joint angles, the rep state machine, the session clock, and the processing loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Repcount
//!
//! In-process engine that turns a stream of body-joint landmarks into exercise
//! repetitions, session time, tempo, and a running form score.
//!
//! ## Architecture
//!
//! - **Frame source / landmark detector**: external collaborators behind traits
//! - **Intelligence**: joint angle geometry and the hysteresis rep state machine
//! - **Session clock**: one-second ticks that exclude paused time
//! - **Processing loop**: start/pause/resume/stop lifecycle and the per-frame tick
//! - **Driver**: runs one loop on a tokio task with independent frame and clock triggers
//!
//! ## Example
//!
//! ```rust,no_run
//! use repcount::config::EngineConfig;
//! use repcount::processing::{LoopDriver, ProcessingLoop, SessionUpdate};
//! use repcount::sources::recorded::{RecordedDetector, RecordedFrameSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env()?;
//! let engine = ProcessingLoop::new(
//!     config,
//!     RecordedFrameSource::new("curls.jsonl"),
//!     RecordedDetector::new("curls.jsonl"),
//!     |update: SessionUpdate| println!("{update:?}"),
//! )?;
//! let (handle, task) = LoopDriver::spawn(engine);
//! handle.start().await?;
//! # drop(handle);
//! # let _engine = task.await?;
//! # Ok(())
//! # }
//! ```

/// Re-exported core configuration
pub use repcount_core::config;
/// Re-exported constants
pub use repcount_core::constants;
/// Re-exported error types
pub use repcount_core::errors;
/// Re-exported data models
pub use repcount_core::models;

/// Re-exported intelligence algorithms
pub use repcount_intelligence as intelligence;

/// Structured logging setup
pub mod logging;

/// Session clock with pause/resume semantics
pub mod session;

/// Frame source and landmark detector collaborator interfaces
pub mod sources;

/// Processing loop lifecycle, per-frame tick, observers, and the tokio driver
pub mod processing;
