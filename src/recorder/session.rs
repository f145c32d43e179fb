//! One recording session: an ordered chunk buffer with a small lifecycle.

use crate::media::{Artifact, StreamFormat};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// Session lifecycle. `Stopping` covers the window between the stop
/// request and the stream's release sentinel, during which chunks already
/// produced by the device must still be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    Recording,
    Stopping,
    Stopped,
}

/// Buffers chunks from one device stream until finalized into an artifact.
///
/// Bound to the stream epoch it was started against; chunks from any
/// other epoch are rejected.
#[derive(Debug)]
pub struct RecordingSession {
    pub id: Uuid,
    epoch: u64,
    format: StreamFormat,
    state: SessionState,
    chunks: Vec<Vec<u8>>,
    pub started_at: DateTime<Utc>,
}

impl RecordingSession {
    pub fn new(epoch: u64, format: StreamFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            epoch,
            format,
            state: SessionState::Inactive,
            chunks: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn start(&mut self) {
        if self.state == SessionState::Inactive {
            self.state = SessionState::Recording;
            self.started_at = Utc::now();
            debug!(session = %self.id, epoch = self.epoch, "recording session started");
        }
    }

    /// Append one chunk in arrival order.
    ///
    /// Accepted only while Recording or Stopping and only for the epoch
    /// this session was bound to. Returns whether the chunk was kept.
    pub fn append(&mut self, epoch: u64, bytes: Vec<u8>) -> bool {
        if !self.is_active() || epoch != self.epoch {
            return false;
        }
        self.chunks.push(bytes);
        true
    }

    /// Mark the session as stopping; chunks keep arriving until the
    /// stream's release sentinel.
    pub fn request_stop(&mut self) {
        if self.state == SessionState::Recording {
            self.state = SessionState::Stopping;
        }
    }

    /// Assemble the artifact from the buffered chunks, in order.
    ///
    /// Consumes the session so it can finalize at most once.
    pub fn finalize(mut self) -> Artifact {
        self.state = SessionState::Stopped;
        let total: usize = self.chunks.iter().map(Vec::len).sum();
        let mut bytes = Vec::with_capacity(total);
        for chunk in &self.chunks {
            bytes.extend_from_slice(chunk);
        }
        debug!(
            session = %self.id,
            chunks = self.chunks.len(),
            bytes = bytes.len(),
            "recording session finalized"
        );
        Artifact::new(self.format, bytes)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Recording | SessionState::Stopping)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn duration_seconds(&self) -> f32 {
        self.format.duration_seconds(self.byte_len())
    }
}
