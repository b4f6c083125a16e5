// ABOUTME: Tempo metrics for a rep session: seconds per rep and mm:ss elapsed formatting
// ABOUTME: SessionSummary bundles the counters a host displays after or during a set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::models::RepState;
use serde::{Deserialize, Serialize};

/// Average seconds per rep, `0.0` before the first rep
#[must_use]
pub fn average_seconds_per_rep(elapsed_seconds: u64, reps: u32) -> f64 {
    if reps == 0 {
        return 0.0;
    }
    elapsed_seconds as f64 / f64::from(reps)
}

/// Format seconds as zero-padded `mm:ss`; minutes keep growing past 99
#[must_use]
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Counters and derived tempo for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Reps counted
    pub total_reps: u32,
    /// Session seconds excluding pauses
    pub elapsed_seconds: u64,
    /// `elapsed_seconds` as `mm:ss`
    pub elapsed_display: String,
    /// Average seconds per rep
    pub average_seconds_per_rep: f64,
    /// Running form score in [0, 100]
    pub form_score: u8,
    /// State machine state
    pub state: RepState,
}

impl SessionSummary {
    /// Build a summary from raw counters
    #[must_use]
    pub fn new(total_reps: u32, elapsed_seconds: u64, form_score: u8, state: RepState) -> Self {
        Self {
            total_reps,
            elapsed_seconds,
            elapsed_display: format_mm_ss(elapsed_seconds),
            average_seconds_per_rep: average_seconds_per_rep(elapsed_seconds, total_reps),
            form_score,
            state,
        }
    }

    /// Average tempo with one decimal, e.g. `3.5 sec/rep`
    #[must_use]
    pub fn tempo_display(&self) -> String {
        format!("{:.1} sec/rep", self.average_seconds_per_rep)
    }
}
