// ABOUTME: Processing loop lifecycle, per-frame tick, consumer callbacks, and tokio driver
// ABOUTME: Re-exports the public processing types for host integrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Processing loop.
//!
//! `ProcessingLoop` holds all session state and can be driven by hand (call
//! `tick_frame` from a display-refresh callback and `tick_clock` from a
//! one-second timer) or handed to `LoopDriver`, which does both on a tokio
//! task.

/// Tokio task running a processing loop with two independent triggers
pub mod driver;
/// Session state, collaborator handles, lifecycle, and the frame tick
pub mod engine;
/// Consumer callback interface and adapters
pub mod observer;

pub use driver::{LoopCommand, LoopDriver, LoopHandle};
pub use engine::{ProcessingLoop, TickOutcome};
pub use observer::{ChannelObserver, NoopObserver, SessionObserver, SessionUpdate};
