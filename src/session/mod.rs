// ABOUTME: Session timing for the rep counter
// ABOUTME: Re-exports the pause-aware session clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// One-second session clock that excludes paused time
pub mod clock;

pub use clock::SessionClock;
