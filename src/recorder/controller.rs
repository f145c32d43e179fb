//! Per-widget recorder controller.
//!
//! Owns one capture stream, at most one recording session, and the
//! completion callback. Drained from the UI thread via `pump`; never
//! blocks.

use crate::capture::{CaptureController, CaptureEvent};
use crate::media::{decode_pcm16, Artifact, BlobStore, MediaKind, StreamFormat};
use crate::recorder::RecordingSession;
use crate::ui::state::WidgetState;
use crate::{RecorderError, Result};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Invoked exactly once per finalized recording, with its locator.
pub type CompletionCallback = Box<dyn FnMut(&str)>;

const LIVE_PREVIEW_SAMPLES: usize = 4096;

pub struct RecorderController {
    capture: CaptureController,
    event_rx: Receiver<CaptureEvent>,
    session: Option<RecordingSession>,
    store: BlobStore,
    error: Option<RecorderError>,
    last_locator: Option<String>,
    last_artifact: Option<Arc<Artifact>>,
    live_samples: Vec<f32>,
    live_frame: Option<Vec<u8>>,
    on_complete: Option<CompletionCallback>,
}

impl RecorderController {
    pub fn new(
        capture: CaptureController,
        event_rx: Receiver<CaptureEvent>,
        store: BlobStore,
    ) -> Self {
        Self {
            capture,
            event_rx,
            session: None,
            store,
            error: None,
            last_locator: None,
            last_artifact: None,
            live_samples: Vec::new(),
            live_frame: None,
            on_complete: None,
        }
    }

    pub fn set_on_complete(&mut self, callback: CompletionCallback) {
        self.on_complete = Some(callback);
    }

    pub fn media_kind(&self) -> MediaKind {
        self.capture.media_kind()
    }

    /// Acquire the device stream. Denial is terminal for the widget.
    pub fn start_device(&mut self) -> Result<StreamFormat> {
        match self.capture.acquire() {
            Ok(format) => {
                self.live_samples.clear();
                self.live_frame = None;
                Ok(format)
            }
            Err(e) => {
                warn!("Device acquisition failed: {}", e);
                if e.is_terminal() {
                    self.error = Some(e.clone());
                }
                Err(e)
            }
        }
    }

    /// Release the device stream.
    ///
    /// An in-flight recording is not abandoned: the release sentinel will
    /// finalize it with whatever chunks arrived.
    pub fn stop_device(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.request_stop();
        }
        self.capture.release();
    }

    /// Begin a recording session on the live stream.
    ///
    /// Refused while not streaming or while a session is already active.
    pub fn start_recording(&mut self) {
        if !self.capture.is_streaming() {
            debug!("start_recording ignored: no live stream");
            return;
        }
        if self.session.as_ref().is_some_and(|s| s.is_active()) {
            debug!("start_recording ignored: session already active");
            return;
        }
        let Some(format) = self.capture.format() else {
            return;
        };
        let mut session = RecordingSession::new(self.capture.epoch(), format);
        session.start();
        info!(session = %session.id, "recording started");
        self.session = Some(session);
    }

    /// Stop the current recording.
    ///
    /// Releases the stream first so its sentinel lands behind every chunk
    /// the device already produced; finalization happens in `pump` when
    /// the sentinel is drained.
    pub fn stop_recording(&mut self) {
        if !self.session.as_ref().is_some_and(|s| s.is_active()) {
            return;
        }
        self.capture.release();
        if let Some(session) = self.session.as_mut() {
            session.request_stop();
        }
    }

    /// Drain pending capture events. Call once per UI frame.
    pub fn pump(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                CaptureEvent::Data { epoch, bytes } => self.on_data(epoch, bytes),
                CaptureEvent::Released { epoch } => self.on_released(epoch),
            }
        }
    }

    fn on_data(&mut self, epoch: u64, bytes: Vec<u8>) {
        // Live preview only for the current stream; stale chunks may still
        // belong to a stopping session and are handled below.
        if epoch == self.capture.epoch() && self.capture.is_streaming() {
            self.update_preview(&bytes);
        }
        if let Some(session) = self.session.as_mut() {
            if !session.append(epoch, bytes) {
                debug!(epoch, "chunk discarded");
            }
        }
    }

    fn on_released(&mut self, epoch: u64) {
        let finalize = self
            .session
            .as_ref()
            .is_some_and(|s| s.is_active() && s.epoch() == epoch);
        if !finalize {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };
        let artifact = session.finalize();
        let locator = self.store.register(artifact.clone());
        info!(
            %locator,
            bytes = artifact.len(),
            duration = artifact.duration_seconds(),
            "recording complete"
        );
        self.last_artifact = self.store.resolve(&locator);
        self.last_locator = Some(locator.clone());
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&locator);
        }
    }

    fn update_preview(&mut self, bytes: &[u8]) {
        match self.capture.format() {
            Some(StreamFormat::Audio { .. }) => {
                self.live_samples.extend(decode_pcm16(bytes));
                let len = self.live_samples.len();
                if len > LIVE_PREVIEW_SAMPLES {
                    self.live_samples.drain(..len - LIVE_PREVIEW_SAMPLES);
                }
            }
            Some(StreamFormat::Video { .. }) => {
                self.live_frame = Some(bytes.to_vec());
            }
            None => {}
        }
    }

    /// Derive the widget state. Error wins; an active recording outranks
    /// plain streaming; a finished artifact shows as playable only once
    /// the stream is gone.
    pub fn widget_state(&self) -> WidgetState {
        if self.error.is_some() {
            return WidgetState::Error;
        }
        if self.session.as_ref().is_some_and(|s| s.is_active()) {
            return WidgetState::Recording;
        }
        if self.capture.is_streaming() {
            return WidgetState::Streaming;
        }
        if self.last_artifact.is_some() {
            return WidgetState::Playable;
        }
        WidgetState::Idle
    }

    pub fn is_streaming(&self) -> bool {
        self.capture.is_streaming()
    }

    pub fn is_recording(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_active())
    }

    pub fn stream_format(&self) -> Option<StreamFormat> {
        self.capture.format()
    }

    pub fn error(&self) -> Option<&RecorderError> {
        self.error.as_ref()
    }

    pub fn last_locator(&self) -> Option<&str> {
        self.last_locator.as_deref()
    }

    pub fn last_artifact(&self) -> Option<Arc<Artifact>> {
        self.last_artifact.clone()
    }

    pub fn live_samples(&self) -> &[f32] {
        &self.live_samples
    }

    pub fn live_frame(&self) -> Option<&[u8]> {
        self.live_frame.as_deref()
    }

    pub fn recording_duration(&self) -> Option<f32> {
        self.session
            .as_ref()
            .filter(|s| s.is_active())
            .map(|s| s.duration_seconds())
    }
}
