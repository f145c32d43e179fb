//! Deterministic stream source for tests and headless runs.

use super::{CaptureEvent, StreamSource};
use crate::media::{MediaKind, StreamFormat};
use crate::{RecorderError, Result};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;

struct ScriptedInner {
    format: StreamFormat,
    deny: Option<RecorderError>,
    active: bool,
    epoch: u64,
    events: Option<Sender<CaptureEvent>>,
}

/// A stream source driven from test code instead of hardware.
///
/// Cloning yields a handle to the same source, so a test can hand the
/// source to a controller and keep a handle to `emit` chunks through.
#[derive(Clone)]
pub struct ScriptedSource {
    inner: Arc<Mutex<ScriptedInner>>,
}

impl ScriptedSource {
    pub fn audio() -> Self {
        Self::with_format(StreamFormat::Audio {
            sample_rate: 16000,
            channels: 1,
        })
    }

    pub fn video() -> Self {
        Self::with_format(StreamFormat::Video {
            width: 4,
            height: 4,
            fps: 10,
        })
    }

    pub fn with_format(format: StreamFormat) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScriptedInner {
                format,
                deny: None,
                active: false,
                epoch: 0,
                events: None,
            })),
        }
    }

    /// Make every `start` fail with the given error, like a denied
    /// permission prompt or an unplugged device.
    pub fn denying(self, error: RecorderError) -> Self {
        self.inner.lock().deny = Some(error);
        self
    }

    /// Push one data chunk as if the device produced it.
    ///
    /// Returns false when the source is not active (the chunk is dropped,
    /// mirroring a callback that fires into a released stream).
    pub fn emit(&self, bytes: Vec<u8>) -> bool {
        let inner = self.inner.lock();
        if !inner.active {
            return false;
        }
        if let Some(events) = &inner.events {
            return events
                .send(CaptureEvent::Data {
                    epoch: inner.epoch,
                    bytes,
                })
                .is_ok();
        }
        false
    }

    /// Emit a chunk tagged with an arbitrary epoch, bypassing the active
    /// check. Used to simulate stray callbacks from a torn-down stream.
    pub fn emit_stale(&self, epoch: u64, bytes: Vec<u8>) -> bool {
        let inner = self.inner.lock();
        if let Some(events) = &inner.events {
            return events.send(CaptureEvent::Data { epoch, bytes }).is_ok();
        }
        false
    }

    pub fn current_epoch(&self) -> u64 {
        self.inner.lock().epoch
    }
}

impl StreamSource for ScriptedSource {
    fn media_kind(&self) -> MediaKind {
        self.inner.lock().format.kind()
    }

    fn start(&mut self, epoch: u64, events: Sender<CaptureEvent>) -> Result<StreamFormat> {
        let mut inner = self.inner.lock();
        if let Some(error) = &inner.deny {
            return Err(error.clone());
        }
        inner.active = true;
        inner.epoch = epoch;
        inner.events = Some(events);
        Ok(inner.format)
    }

    fn stop(&mut self) {
        let mut inner = self.inner.lock();
        inner.active = false;
        inner.events = None;
    }

    fn is_active(&self) -> bool {
        self.inner.lock().active
    }
}
