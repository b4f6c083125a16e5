// ABOUTME: Tokio driver running one processing loop with independent frame and clock triggers
// ABOUTME: Lifecycle calls arrive over a command channel so the task stays the single writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::errors::{LifecycleError, LifecycleResult};
use repcount_core::models::LoopStatus;
use repcount_intelligence::SessionSummary;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use super::engine::ProcessingLoop;
use crate::sources::{FrameSource, LandmarkDetector};

/// Capacity of the lifecycle command channel
const COMMAND_BUFFER: usize = 16;

type Reply<T> = oneshot::Sender<T>;

/// Lifecycle command sent to the driver task
#[derive(Debug)]
pub enum LoopCommand {
    /// `ProcessingLoop::start`
    Start(Reply<LifecycleResult>),
    /// `ProcessingLoop::pause`
    Pause(Reply<LifecycleResult>),
    /// `ProcessingLoop::resume`
    Resume(Reply<LifecycleResult>),
    /// `ProcessingLoop::stop`
    Stop(Reply<LifecycleResult>),
    /// `ProcessingLoop::reset`
    Reset(Reply<LifecycleResult>),
    /// Current status
    Status(Reply<LoopStatus>),
    /// Current summary
    Summary(Reply<SessionSummary>),
}

/// Cloneable handle for issuing lifecycle calls to a driven loop
///
/// Dropping every handle shuts the driver down and tears the loop down.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    commands: mpsc::Sender<LoopCommand>,
}

impl LoopHandle {
    /// Start the loop
    ///
    /// # Errors
    ///
    /// Returns the loop's `LifecycleError`, or `DriverClosed` if the task is gone.
    pub async fn start(&self) -> LifecycleResult {
        self.request(LoopCommand::Start).await?
    }

    /// Pause the loop
    ///
    /// # Errors
    ///
    /// Returns the loop's `LifecycleError`, or `DriverClosed` if the task is gone.
    pub async fn pause(&self) -> LifecycleResult {
        self.request(LoopCommand::Pause).await?
    }

    /// Resume the loop
    ///
    /// # Errors
    ///
    /// Returns the loop's `LifecycleError`, or `DriverClosed` if the task is gone.
    pub async fn resume(&self) -> LifecycleResult {
        self.request(LoopCommand::Resume).await?
    }

    /// Stop the loop and release its resources
    ///
    /// # Errors
    ///
    /// Returns the loop's `LifecycleError`, or `DriverClosed` if the task is gone.
    pub async fn stop(&self) -> LifecycleResult {
        self.request(LoopCommand::Stop).await?
    }

    /// Reset counters and timing
    ///
    /// # Errors
    ///
    /// Returns the loop's `LifecycleError`, or `DriverClosed` if the task is gone.
    pub async fn reset(&self) -> LifecycleResult {
        self.request(LoopCommand::Reset).await?
    }

    /// Current lifecycle status
    ///
    /// # Errors
    ///
    /// Returns `DriverClosed` if the task is gone.
    pub async fn status(&self) -> LifecycleResult<LoopStatus> {
        self.request(LoopCommand::Status).await
    }

    /// Current counters and tempo
    ///
    /// # Errors
    ///
    /// Returns `DriverClosed` if the task is gone.
    pub async fn summary(&self) -> LifecycleResult<SessionSummary> {
        self.request(LoopCommand::Summary).await
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> LoopCommand) -> LifecycleResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| LifecycleError::DriverClosed)?;
        response.await.map_err(|_| LifecycleError::DriverClosed)
    }
}

/// How far the clock interval has run into its current period
///
/// Pausing freezes that progress and resuming schedules the next clock tick
/// for the rest of the period, so running time split by pauses adds up the
/// same as uninterrupted running time.
#[derive(Debug, Clone, Copy)]
struct ClockPhase {
    period: Duration,
    /// Instant the current period began, in running time
    started: Instant,
    /// Progress frozen at the last pause
    carried: Duration,
}

impl ClockPhase {
    fn new(period: Duration) -> Self {
        Self {
            period,
            started: Instant::now(),
            carried: Duration::ZERO,
        }
    }

    fn ticked(&mut self, at: Instant) {
        self.started = at;
    }

    fn pause(&mut self, now: Instant) {
        self.carried = now.saturating_duration_since(self.started).min(self.period);
    }

    /// Drop any carried progress; the next arm begins a whole period
    fn clear(&mut self) {
        self.carried = Duration::ZERO;
    }

    /// Schedule the next clock tick for the remainder of the period
    fn arm(&mut self, clock: &mut Interval, now: Instant) {
        self.started = now.checked_sub(self.carried).unwrap_or(now);
        clock.reset_at(now + self.period.saturating_sub(self.carried));
        self.carried = Duration::ZERO;
    }
}

/// Runs a `ProcessingLoop` on its own tokio task
///
/// The task multiplexes three sources with `tokio::select!`: lifecycle
/// commands, the frame interval, and the one-second clock interval. Both
/// intervals are only polled while the loop is running. Time spent paused
/// never produces catch-up ticks, and the part of a second already run
/// before a pause still counts after the resume.
pub struct LoopDriver;

impl LoopDriver {
    /// Move `engine` onto a new task
    ///
    /// The join handle yields the loop back, torn down, once every
    /// `LoopHandle` has been dropped.
    pub fn spawn<S, D>(engine: ProcessingLoop<S, D>) -> (LoopHandle, JoinHandle<ProcessingLoop<S, D>>)
    where
        S: FrameSource + 'static,
        D: LandmarkDetector + 'static,
    {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(Self::run(engine, receiver));
        (LoopHandle { commands }, task)
    }

    async fn run<S, D>(
        mut engine: ProcessingLoop<S, D>,
        mut commands: mpsc::Receiver<LoopCommand>,
    ) -> ProcessingLoop<S, D>
    where
        S: FrameSource,
        D: LandmarkDetector,
    {
        let mut frames = time::interval(engine.config().frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let clock_period = engine.config().clock_interval();
        let mut clock = time::interval_at(Instant::now() + clock_period, clock_period);
        let mut phase = ClockPhase::new(clock_period);

        info!(session.id = %engine.session_id(), "Processing loop driver started");
        loop {
            let running = engine.is_running();
            let generation = engine.generation();
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    Self::dispatch(&mut engine, command, &mut frames, &mut clock, &mut phase).await;
                }
                _ = frames.tick(), if running => {
                    engine.tick_frame(generation);
                }
                at = clock.tick(), if running => {
                    phase.ticked(at);
                    engine.tick_clock();
                }
            }
        }

        engine.teardown().await;
        info!(
            session.id = %engine.session_id(),
            reps = engine.reps(),
            elapsed = engine.elapsed_seconds(),
            "Processing loop driver stopped"
        );
        engine
    }

    async fn dispatch<S, D>(
        engine: &mut ProcessingLoop<S, D>,
        command: LoopCommand,
        frames: &mut Interval,
        clock: &mut Interval,
        phase: &mut ClockPhase,
    ) where
        S: FrameSource,
        D: LandmarkDetector,
    {
        debug!(session.id = %engine.session_id(), ?command, "Lifecycle command received");
        let replied = match command {
            LoopCommand::Start(reply) => {
                let result = engine.start().await;
                if result.is_ok() {
                    phase.clear();
                    Self::rearm(frames, clock, phase);
                }
                reply.send(result).is_ok()
            }
            LoopCommand::Pause(reply) => {
                let result = engine.pause();
                if result.is_ok() {
                    phase.pause(Instant::now());
                }
                reply.send(result).is_ok()
            }
            LoopCommand::Resume(reply) => {
                let result = engine.resume();
                if result.is_ok() {
                    Self::rearm(frames, clock, phase);
                }
                reply.send(result).is_ok()
            }
            LoopCommand::Stop(reply) => reply.send(engine.stop().await).is_ok(),
            LoopCommand::Reset(reply) => {
                let result = engine.reset();
                if result.is_ok() {
                    phase.clear();
                }
                reply.send(result).is_ok()
            }
            LoopCommand::Status(reply) => reply.send(engine.status()).is_ok(),
            LoopCommand::Summary(reply) => reply.send(engine.summary()).is_ok(),
        };
        if !replied {
            debug!(session.id = %engine.session_id(), "Lifecycle caller went away before the reply");
        }
    }

    /// First frame immediately, next clock tick when the carried period completes
    fn rearm(frames: &mut Interval, clock: &mut Interval, phase: &mut ClockPhase) {
        frames.reset_immediately();
        phase.arm(clock, Instant::now());
    }
}
