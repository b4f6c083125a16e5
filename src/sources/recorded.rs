// ABOUTME: Recorded landmark sessions replayed through the processing loop
// ABOUTME: JSON-lines recordings act as both the frame source and the landmark detector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recorded sessions.
//!
//! A recording is a JSON-lines file with one object per frame:
//!
//! ```json
//! {"timestamp_ms": 0, "landmarks": [{"name": "left_shoulder", "x": 0.41, "y": 0.22, "visibility": 0.98}]}
//! ```
//!
//! Blank lines are ignored. The frame source replays the timestamps and the
//! detector answers each frame with the landmarks recorded for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use repcount_core::errors::{AcquisitionError, DetectionFailure};
use repcount_core::models::RawLandmark;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{Frame, FrameSource, LandmarkDetector};

/// One recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Capture time relative to the start of the recording
    pub timestamp_ms: u64,
    /// Landmarks detected on this frame; empty when no person was visible
    #[serde(default)]
    pub landmarks: Vec<RawLandmark>,
}

/// Errors while reading a recording
#[derive(Debug, Error)]
pub enum RecordingError {
    /// The file could not be read
    #[error("Failed to read recording {path}: {source}")]
    Io {
        /// Recording path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid recorded frame
    #[error("Invalid recording line {line}: {source}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// An in-memory recording
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Wrap already decoded frames
    #[must_use]
    pub const fn from_frames(frames: Vec<RecordedFrame>) -> Self {
        Self { frames }
    }

    /// Parse JSON-lines content
    ///
    /// # Errors
    ///
    /// Returns `RecordingError::Parse` for the first line that is not a recorded frame.
    pub fn parse(contents: &str) -> Result<Self, RecordingError> {
        let frames = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|source| RecordingError::Parse {
                    line: index + 1,
                    source,
                })
            })
            .collect::<Result<Vec<RecordedFrame>, _>>()?;
        Ok(Self { frames })
    }

    /// Read and parse a recording file
    ///
    /// # Errors
    ///
    /// Returns `RecordingError` if the file cannot be read or parsed.
    pub async fn read(path: &Path) -> Result<Self, RecordingError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| RecordingError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
        Self::parse(&contents)
    }

    /// Serialize back to JSON lines
    ///
    /// # Errors
    ///
    /// Returns a JSON error if a frame cannot be serialized.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(&serde_json::to_string(frame)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the recording holds no frames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame by sequence number
    #[must_use]
    pub fn frame(&self, sequence: u64) -> Option<&RecordedFrame> {
        usize::try_from(sequence)
            .ok()
            .and_then(|index| self.frames.get(index))
    }
}

/// Replay position handed out by `RecordedFrameSource::open`
#[derive(Debug)]
pub struct RecordingCursor {
    timestamps: Vec<Duration>,
    next: usize,
}

impl RecordingCursor {
    /// Frames not yet replayed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.timestamps.len().saturating_sub(self.next)
    }
}

/// Frame source replaying the timestamps of a recording
#[derive(Debug, Clone)]
pub struct RecordedFrameSource {
    path: PathBuf,
}

impl RecordedFrameSource {
    /// Create a source for the recording at `path`; nothing is read until `open`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FrameSource for RecordedFrameSource {
    type Handle = RecordingCursor;

    async fn open(&self) -> Result<Self::Handle, AcquisitionError> {
        let recording = Recording::read(&self.path)
            .await
            .map_err(|error| match error {
                RecordingError::Io { path, source } => AcquisitionError::from_source_io(
                    &format!("recording {}", path.display()),
                    &source,
                ),
                RecordingError::Parse { .. } => AcquisitionError::DeviceNotFound(format!(
                    "{} is not a valid landmark recording: {error}",
                    self.path.display()
                )),
            })?;

        debug!(path = %self.path.display(), frames = recording.len(), "Recording opened as frame source");
        Ok(RecordingCursor {
            timestamps: recording
                .frames
                .iter()
                .map(|frame| Duration::from_millis(frame.timestamp_ms))
                .collect(),
            next: 0,
        })
    }

    fn next_frame(&self, handle: &mut Self::Handle) -> Option<Frame> {
        let timestamp = *handle.timestamps.get(handle.next)?;
        let frame = Frame::empty(handle.next as u64, timestamp);
        handle.next += 1;
        Some(frame)
    }

    async fn close(&self, handle: Self::Handle) {
        debug!(
            path = %self.path.display(),
            remaining = handle.remaining(),
            "Recording frame source closed"
        );
    }
}

/// Detector answering each frame with its recorded landmarks
#[derive(Debug, Clone)]
pub struct RecordedDetector {
    path: PathBuf,
}

impl RecordedDetector {
    /// Create a detector for the recording at `path`; nothing is read until `load`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LandmarkDetector for RecordedDetector {
    type Handle = Recording;

    async fn load(&self) -> Result<Self::Handle, AcquisitionError> {
        Recording::read(&self.path)
            .await
            .map_err(|error| match error {
                RecordingError::Io { path, source } => AcquisitionError::from_source_io(
                    &format!("recording {}", path.display()),
                    &source,
                ),
                RecordingError::Parse { .. } => AcquisitionError::ModelLoadFailed(error.to_string()),
            })
    }

    fn detect(
        &self,
        handle: &mut Self::Handle,
        frame: &Frame,
        _timestamp: Duration,
    ) -> Result<Vec<RawLandmark>, DetectionFailure> {
        handle
            .frame(frame.sequence)
            .map(|recorded| recorded.landmarks.clone())
            .ok_or_else(|| {
                DetectionFailure::Detector(format!(
                    "no recorded landmarks for frame {}",
                    frame.sequence
                ))
            })
    }

    async fn close(&self, handle: Self::Handle) {
        debug!(path = %self.path.display(), frames = handle.len(), "Recorded detector closed");
    }
}
