// ABOUTME: Session clock accumulating whole seconds while running and frozen while paused
// ABOUTME: Advanced by an independent one-second trigger, never by counting frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_intelligence::tempo::format_mm_ss;

/// Elapsed session time in whole seconds
///
/// Only `tick()` advances time and only while running, so paused intervals
/// are excluded no matter how long they last on the wall clock.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    elapsed_seconds: u64,
    running: bool,
}

impl SessionClock {
    /// Create a stopped clock at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            running: false,
        }
    }

    /// Begin accumulating; keeps any previously accumulated time
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freeze accumulation
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue accumulating after a pause
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Stop accumulating without clearing the total
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Clear the accumulated total; running state is unchanged
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
    }

    /// Advance by one second if running
    ///
    /// Returns whether time advanced.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.running
    }

    /// Accumulated seconds
    #[must_use]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether ticks currently advance time
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Accumulated time as `mm:ss`
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_mm_ss(self.elapsed_seconds)
    }
}
