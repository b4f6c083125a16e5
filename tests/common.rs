// ABOUTME: Shared fakes and helpers for rep counter integration tests
// ABOUTME: Scripted frame source and detector with failure injection and resource counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `repcount`
//!
//! The fake detector answers each frame from a script indexed by the frame
//! sequence number, so tests can drive exact angle sequences through the
//! processing loop without a camera or model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use repcount::config::EngineConfig;
use repcount::errors::{AcquisitionError, DetectionFailure};
use repcount::models::RawLandmark;
use repcount::processing::{ProcessingLoop, SessionUpdate};
use repcount::sources::{Frame, FrameSource, LandmarkDetector};

/// Open/close bookkeeping shared between a fake and the test
#[derive(Debug, Default)]
pub struct ResourceCounters {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl ResourceCounters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Handles handed out and not yet closed
    pub fn held(&self) -> usize {
        self.acquired() - self.released()
    }
}

/// What the fake detector reports for one frame
#[derive(Debug, Clone)]
pub enum Step {
    /// Tracked arm visible at this elbow angle
    Angle(f64),
    /// Tracked arm visible at this angle but below the confidence floor
    Occluded(f64),
    /// No person in frame
    Absent,
    /// Inference error
    Fail,
    /// Landmarks with non-finite coordinates
    Malformed,
}

/// Left-arm landmarks forming `degrees` at the elbow
///
/// The upper arm points straight up from the elbow and the forearm is rotated
/// by `degrees` from it, so the computed angle equals the input for [0, 180].
pub fn arm_at(degrees: f64, visibility: f64) -> Vec<RawLandmark> {
    let (elbow_x, elbow_y) = (0.5, 0.5);
    let forearm = degrees.to_radians() - std::f64::consts::FRAC_PI_2;
    vec![
        RawLandmark::new("left_shoulder", elbow_x, elbow_y - 0.2, visibility),
        RawLandmark::new("left_elbow", elbow_x, elbow_y, visibility),
        RawLandmark::new(
            "left_wrist",
            0.2f64.mul_add(forearm.cos(), elbow_x),
            0.2f64.mul_add(forearm.sin(), elbow_y),
            visibility,
        ),
    ]
}

/// Shorthand for a script of visible angles
pub fn angles(values: &[f64]) -> Vec<Step> {
    values.iter().copied().map(Step::Angle).collect()
}

/// Frame source yielding `limit` frames (unbounded when `None`)
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub counters: Arc<ResourceCounters>,
    failures_remaining: Arc<AtomicUsize>,
    failure: AcquisitionError,
    limit: Option<u64>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            counters: Arc::default(),
            failures_remaining: Arc::default(),
            failure: AcquisitionError::DeviceNotFound("fake camera unplugged".into()),
            limit: None,
        }
    }

    /// Fail the next `times` opens with `failure`
    pub fn failing(mut self, times: usize, failure: AcquisitionError) -> Self {
        self.failures_remaining = Arc::new(AtomicUsize::new(times));
        self.failure = failure;
        self
    }

    pub const fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }
}

/// Open handle of `FakeSource`
#[derive(Debug)]
pub struct FakeCursor {
    next: u64,
    limit: Option<u64>,
}

#[async_trait]
impl FrameSource for FakeSource {
    type Handle = FakeCursor;

    async fn open(&self) -> Result<Self::Handle, AcquisitionError> {
        if take_failure(&self.failures_remaining) {
            return Err(self.failure.clone());
        }
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(FakeCursor {
            next: 0,
            limit: self.limit,
        })
    }

    fn next_frame(&self, handle: &mut Self::Handle) -> Option<Frame> {
        if handle.limit.is_some_and(|limit| handle.next >= limit) {
            return None;
        }
        let frame = Frame::empty(handle.next, Duration::from_millis(handle.next * 33));
        handle.next += 1;
        Some(frame)
    }

    async fn close(&self, _handle: Self::Handle) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Detector answering frame `n` with `script[n]`; frames past the end are absent
#[derive(Debug, Clone)]
pub struct FakeDetector {
    pub counters: Arc<ResourceCounters>,
    failures_remaining: Arc<AtomicUsize>,
    script: Arc<Vec<Step>>,
}

impl FakeDetector {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            counters: Arc::default(),
            failures_remaining: Arc::default(),
            script: Arc::new(script),
        }
    }

    /// Fail the next `times` loads with `ModelLoadFailed`
    pub fn failing(mut self, times: usize) -> Self {
        self.failures_remaining = Arc::new(AtomicUsize::new(times));
        self
    }
}

#[async_trait]
impl LandmarkDetector for FakeDetector {
    type Handle = ();

    async fn load(&self) -> Result<Self::Handle, AcquisitionError> {
        if take_failure(&self.failures_remaining) {
            return Err(AcquisitionError::ModelLoadFailed("fake model corrupt".into()));
        }
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn detect(
        &self,
        _handle: &mut Self::Handle,
        frame: &Frame,
        _timestamp: Duration,
    ) -> Result<Vec<RawLandmark>, DetectionFailure> {
        let step = usize::try_from(frame.sequence)
            .ok()
            .and_then(|index| self.script.get(index));
        match step {
            Some(Step::Angle(degrees)) => Ok(arm_at(*degrees, 0.9)),
            Some(Step::Occluded(degrees)) => Ok(arm_at(*degrees, 0.2)),
            Some(Step::Fail) => Err(DetectionFailure::Detector("inference crashed".into())),
            Some(Step::Malformed) => Ok(vec![
                RawLandmark::new("left_shoulder", f64::NAN, 0.1, 0.9),
                RawLandmark::new("left_elbow", 0.5, 0.5, 0.9),
                RawLandmark::new("left_wrist", 0.5, 0.7, 0.9),
            ]),
            Some(Step::Absent) | None => Ok(Vec::new()),
        }
    }

    async fn close(&self, _handle: Self::Handle) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn take_failure(remaining: &AtomicUsize) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
        .is_ok()
}

/// Updates captured by a closure observer
pub type Captured = Arc<Mutex<Vec<SessionUpdate>>>;

/// Loop over the fakes with a capturing closure observer
pub fn build_loop(
    source: FakeSource,
    detector: FakeDetector,
) -> (ProcessingLoop<FakeSource, FakeDetector>, Captured) {
    build_loop_with_config(EngineConfig::default(), source, detector)
}

pub fn build_loop_with_config(
    config: EngineConfig,
    source: FakeSource,
    detector: FakeDetector,
) -> (ProcessingLoop<FakeSource, FakeDetector>, Captured) {
    let captured: Captured = Arc::default();
    let sink = Arc::clone(&captured);
    let engine = ProcessingLoop::new(config, source, detector, move |update: SessionUpdate| {
        sink.lock().unwrap().push(update);
    })
    .expect("default configuration is valid");
    (engine, captured)
}

/// Totals of every `RepCompleted` update captured so far
pub fn rep_totals(captured: &Captured) -> Vec<u32> {
    captured
        .lock()
        .unwrap()
        .iter()
        .filter_map(|update| match update {
            SessionUpdate::RepCompleted(event) => Some(event.total),
            SessionUpdate::Tick(_) => None,
        })
        .collect()
}
