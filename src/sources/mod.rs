// ABOUTME: Collaborator interfaces for frame acquisition and landmark detection
// ABOUTME: The processing loop owns the handles these traits hand out between start and stop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Frame source and landmark detector interfaces.
//!
//! Camera capture and pose inference live outside this crate. A
//! collaborator is a factory: `open`/`load` hand out a handle that the
//! processing loop owns exclusively until it passes the handle back to
//! `close` on stop.

/// JSON-lines landmark recordings replayed as a frame source and detector
pub mod recorded;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use repcount_core::errors::{AcquisitionError, DetectionFailure};
use repcount_core::models::RawLandmark;

/// A single captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Monotonic frame number within the source
    pub sequence: u64,
    /// Capture time relative to the start of the source
    pub timestamp: Duration,
    /// Encoded pixel data; empty for sources that carry landmarks out of band
    pub pixels: Bytes,
}

impl Frame {
    /// Create a frame without pixel data
    #[must_use]
    pub const fn empty(sequence: u64, timestamp: Duration) -> Self {
        Self {
            sequence,
            timestamp,
            pixels: Bytes::new(),
        }
    }
}

/// Supplier of frames (camera device, video file, recording)
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Open handle, owned by the processing loop while running or paused
    type Handle: Send;

    /// Acquire the source
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError` when the device is missing or access is denied.
    async fn open(&self) -> Result<Self::Handle, AcquisitionError>;

    /// Next frame, or `None` if no frame is ready yet
    fn next_frame(&self, handle: &mut Self::Handle) -> Option<Frame>;

    /// Release the source
    async fn close(&self, handle: Self::Handle);
}

/// Pose landmark detector
#[async_trait]
pub trait LandmarkDetector: Send + Sync {
    /// Loaded model handle, owned by the processing loop while running or paused
    type Handle: Send;

    /// Load the model
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError` when the model cannot be loaded.
    async fn load(&self) -> Result<Self::Handle, AcquisitionError>;

    /// Run inference on one frame; an empty list means no person was found
    ///
    /// # Errors
    ///
    /// Returns `DetectionFailure` when inference fails or produces unusable output.
    fn detect(
        &self,
        handle: &mut Self::Handle,
        frame: &Frame,
        timestamp: Duration,
    ) -> Result<Vec<RawLandmark>, DetectionFailure>;

    /// Release the model
    async fn close(&self, handle: Self::Handle);
}
