// ABOUTME: Consumer callback interface for per-tick snapshots and rep completion events
// ABOUTME: Closure and tokio channel adapters so hosts can consume updates synchronously or async
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::models::{RepCompleted, TickSnapshot};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Update delivered to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// Once per processed frame tick
    Tick(TickSnapshot),
    /// On each qualifying `Extended` to `Flexed` transition, before that tick's snapshot
    RepCompleted(RepCompleted),
}

/// Consumer of processing loop output
///
/// Called from the tick, so implementations must not block.
pub trait SessionObserver: Send {
    /// Called once per processed frame tick
    fn on_tick(&mut self, snapshot: &TickSnapshot);

    /// Called when a rep completes
    fn on_rep_completed(&mut self, event: &RepCompleted);
}

impl<F> SessionObserver for F
where
    F: FnMut(SessionUpdate) + Send,
{
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        self(SessionUpdate::Tick(snapshot.clone()));
    }

    fn on_rep_completed(&mut self, event: &RepCompleted) {
        self(SessionUpdate::RepCompleted(*event));
    }
}

/// Observer that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_tick(&mut self, _snapshot: &TickSnapshot) {}

    fn on_rep_completed(&mut self, _event: &RepCompleted) {}
}

/// Observer forwarding updates into an unbounded tokio channel
///
/// Updates are dropped once the receiver is gone; the loop keeps running.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<SessionUpdate>,
}

impl ChannelObserver {
    /// Create an observer and the receiver for its updates
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionUpdate>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn forward(&self, update: SessionUpdate) {
        if self.sender.send(update).is_err() {
            debug!("Session update receiver dropped");
        }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        self.forward(SessionUpdate::Tick(snapshot.clone()));
    }

    fn on_rep_completed(&mut self, event: &RepCompleted) {
        self.forward(SessionUpdate::RepCompleted(*event));
    }
}
