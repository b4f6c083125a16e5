// ABOUTME: Processing loop owning the session state, collaborator handles, and lifecycle transitions
// ABOUTME: Runs the per-frame tick: frame, landmarks, joint sample, angle, state machine, observer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use repcount_core::config::EngineConfig;
use repcount_core::errors::{
    AcquisitionError, ConfigError, LifecycleError, LifecycleOperation, LifecycleResult,
};
use repcount_core::models::{
    AngleReading, JointSample, LoopStatus, RawLandmark, RepState, TickSnapshot,
};
use repcount_intelligence::{angle_reading, FormQualityTracker, RepStateMachine, SessionSummary};
use tracing::span::EnteredSpan;
use tracing::{debug, error, info, info_span, trace, warn, Instrument, Span};
use uuid::Uuid;

use super::observer::SessionObserver;
use crate::session::SessionClock;
use crate::sources::{FrameSource, LandmarkDetector};

/// Result of a single frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop was not running or the tick belonged to a cancelled generation
    Inactive,
    /// The source had no frame ready; nothing changed
    NoFrame,
    /// A frame was processed and observers were notified
    Processed,
}

/// One rep-counting session
///
/// Owns every piece of mutable session state and the collaborator handles.
/// All methods take `&mut self`, so whichever execution context holds the
/// loop is its only writer.
///
/// # Lifecycle
///
/// `Stopped -> Running <-> Paused -> Stopped`. Calls from any other status
/// return `LifecycleError::InvalidTransition` and change nothing.
///
/// # Cancellation
///
/// `pause` and `stop` bump the generation. A tick carrying an older
/// generation, or arriving while not running, is ignored, so nothing is
/// processed after a cancellation has been requested.
///
/// # Tracing
///
/// Lifecycle calls and frame ticks run inside a `processing_loop` span
/// carrying `session.id`.
pub struct ProcessingLoop<S: FrameSource, D: LandmarkDetector> {
    session_id: Uuid,
    span: Span,
    config: EngineConfig,
    source: S,
    detector: D,
    source_handle: Option<S::Handle>,
    detector_handle: Option<D::Handle>,
    status: LoopStatus,
    generation: u64,
    machine: RepStateMachine,
    clock: SessionClock,
    form: FormQualityTracker,
    last_angle: Option<f64>,
    observer: Box<dyn SessionObserver>,
}

impl<S: FrameSource, D: LandmarkDetector> ProcessingLoop<S, D> {
    /// Create a stopped loop
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(
        config: EngineConfig,
        source: S,
        detector: D,
        observer: impl SessionObserver + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let machine = RepStateMachine::new(config.thresholds)?;
        let form = FormQualityTracker::new(config.form_baseline);
        let session_id = Uuid::new_v4();
        Ok(Self {
            session_id,
            span: info_span!("processing_loop", session.id = %session_id),
            config,
            source,
            detector,
            source_handle: None,
            detector_handle: None,
            status: LoopStatus::Stopped,
            generation: 0,
            machine,
            clock: SessionClock::new(),
            form,
            last_angle: None,
            observer: Box::new(observer),
        })
    }

    /// Acquire the detector and frame source and begin running
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless stopped, and
    /// `LifecycleError::Acquisition` if a collaborator cannot be acquired. On
    /// acquisition failure every partially acquired handle is released and the
    /// loop stays stopped.
    pub async fn start(&mut self) -> LifecycleResult {
        let span = self.span.clone();
        self.start_in_span().instrument(span).await
    }

    async fn start_in_span(&mut self) -> LifecycleResult {
        self.ensure(LifecycleOperation::Start)?;

        if let Err(cause) = self.acquire().await {
            error!(
                error = %cause,
                guidance = cause.guidance(),
                "Failed to acquire rep counter resources"
            );
            self.release().await;
            return Err(cause.into());
        }

        self.generation = self.generation.wrapping_add(1);
        self.status = LoopStatus::Running;
        self.clock.start();
        info!(
            arm = %self.config.tracked_arm,
            upper = self.config.thresholds.upper_degrees,
            lower = self.config.thresholds.lower_degrees,
            "Rep counter started"
        );
        Ok(())
    }

    /// Suspend ticking and the clock; handles stay acquired
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless running.
    pub fn pause(&mut self) -> LifecycleResult {
        let _entered = self.enter_span();
        self.ensure(LifecycleOperation::Pause)?;
        self.generation = self.generation.wrapping_add(1);
        self.status = LoopStatus::Paused;
        self.clock.pause();
        info!(
            reps = self.machine.reps(),
            elapsed = self.clock.elapsed(),
            "Rep counter paused"
        );
        Ok(())
    }

    /// Continue after a pause
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless paused.
    pub fn resume(&mut self) -> LifecycleResult {
        let _entered = self.enter_span();
        self.ensure(LifecycleOperation::Resume)?;
        self.status = LoopStatus::Running;
        self.clock.resume();
        info!("Rep counter resumed");
        Ok(())
    }

    /// Stop ticking and release the frame source and detector
    ///
    /// Counters and elapsed time are kept; call `reset` for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless running or paused.
    pub async fn stop(&mut self) -> LifecycleResult {
        let span = self.span.clone();
        self.stop_in_span().instrument(span).await
    }

    async fn stop_in_span(&mut self) -> LifecycleResult {
        self.ensure(LifecycleOperation::Stop)?;
        self.generation = self.generation.wrapping_add(1);
        self.status = LoopStatus::Stopped;
        self.clock.stop();
        self.release().await;
        info!(
            reps = self.machine.reps(),
            elapsed = self.clock.elapsed(),
            "Rep counter stopped"
        );
        Ok(())
    }

    /// Zero reps, rep state, elapsed time, and form score
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` unless stopped or paused.
    pub fn reset(&mut self) -> LifecycleResult {
        let _entered = self.enter_span();
        self.ensure(LifecycleOperation::Reset)?;
        self.machine.reset();
        self.clock.reset();
        self.form.reset();
        self.last_angle = None;
        debug!("Rep counter reset");
        Ok(())
    }

    /// Stop if active and release anything still held
    ///
    /// Safe to call in any status and any number of times.
    pub async fn teardown(&mut self) {
        let span = self.span.clone();
        self.teardown_in_span().instrument(span).await;
    }

    async fn teardown_in_span(&mut self) {
        if self.status != LoopStatus::Stopped {
            self.generation = self.generation.wrapping_add(1);
            self.status = LoopStatus::Stopped;
            self.clock.stop();
        }
        self.release().await;
    }

    /// Release whichever collaborator handles are held
    ///
    /// Idempotent; also used to unwind a partially failed start.
    pub async fn release(&mut self) {
        if let Some(handle) = self.source_handle.take() {
            self.source.close(handle).await;
            debug!("Frame source released");
        }
        if let Some(handle) = self.detector_handle.take() {
            self.detector.close(handle).await;
            debug!("Landmark detector released");
        }
    }

    /// Process one frame if `generation` is current and the loop is running
    pub fn tick_frame(&mut self, generation: u64) -> TickOutcome {
        if self.status != LoopStatus::Running || generation != self.generation {
            return TickOutcome::Inactive;
        }
        let _entered = self.enter_span();
        let (Some(source_handle), Some(detector_handle)) =
            (self.source_handle.as_mut(), self.detector_handle.as_mut())
        else {
            return TickOutcome::Inactive;
        };

        let Some(frame) = self.source.next_frame(source_handle) else {
            trace!("No frame ready");
            return TickOutcome::NoFrame;
        };

        let reading = match self
            .detector
            .detect(detector_handle, &frame, frame.timestamp)
        {
            Ok(landmarks) => self.reading_from(&landmarks),
            Err(failure) => {
                warn!(
                    frame = frame.sequence,
                    error = %failure,
                    "Landmark detection failed, treating frame as absent"
                );
                None
            }
        };

        self.last_angle = reading.map(AngleReading::degrees);
        if let Some(event) = self.machine.observe(reading) {
            self.form.record(&event);
            self.observer.on_rep_completed(&event);
        }
        let snapshot = self.snapshot();
        self.observer.on_tick(&snapshot);
        TickOutcome::Processed
    }

    /// Advance the session clock by one second if running
    ///
    /// Returns whether time advanced.
    pub fn tick_clock(&mut self) -> bool {
        self.status == LoopStatus::Running && self.clock.tick()
    }

    fn reading_from(&self, landmarks: &[RawLandmark]) -> Option<AngleReading> {
        match JointSample::from_landmarks(landmarks, self.config.tracked_arm) {
            Ok(Some(sample)) => angle_reading(&sample, self.config.min_visibility),
            Ok(None) => {
                trace!("Tracked joints not detected");
                None
            }
            Err(failure) => {
                warn!(error = %failure, "Discarding malformed landmarks"
                );
                None
            }
        }
    }

    async fn acquire(&mut self) -> Result<(), AcquisitionError> {
        let detector = self.detector.load().await?;
        self.detector_handle = Some(detector);
        let source = self.source.open().await?;
        self.source_handle = Some(source);
        Ok(())
    }

    fn enter_span(&self) -> EnteredSpan {
        self.span.clone().entered()
    }

    fn ensure(&self, operation: LifecycleOperation) -> LifecycleResult {
        if operation.permits(self.status) {
            Ok(())
        } else {
            warn!(
                operation = %operation,
                status = %self.status,
                "Rejected lifecycle call"
            );
            Err(LifecycleError::InvalidTransition {
                operation,
                status: self.status,
            })
        }
    }

    /// Current per-tick view
    #[must_use]
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            total_reps: self.machine.reps(),
            elapsed_seconds: self.clock.elapsed(),
            last_angle: self.last_angle,
            state: self.machine.state(),
            form_score: self.form.score(),
        }
    }

    /// Counters and derived tempo
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(
            self.machine.reps(),
            self.clock.elapsed(),
            self.form.score(),
            self.machine.state(),
        )
    }

    /// Session identifier used in logs
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current lifecycle status
    #[must_use]
    pub const fn status(&self) -> LoopStatus {
        self.status
    }

    /// Whether frame ticks should keep being scheduled
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }

    /// Current cancellation generation; pass it back to `tick_frame`
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Reps counted
    #[must_use]
    pub const fn reps(&self) -> u32 {
        self.machine.reps()
    }

    /// Rep state machine state
    #[must_use]
    pub const fn rep_state(&self) -> RepState {
        self.machine.state()
    }

    /// Elapsed session seconds
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed()
    }

    /// Whether any collaborator handle is currently held
    #[must_use]
    pub const fn holds_resources(&self) -> bool {
        self.source_handle.is_some() || self.detector_handle.is_some()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<S: FrameSource, D: LandmarkDetector> Drop for ProcessingLoop<S, D> {
    fn drop(&mut self) {
        if self.holds_resources() {
            warn!(
                session.id = %self.session_id,
                "Processing loop dropped while holding resources; handles dropped without close"
            );
        }
    }
}
