//! Device stream acquisition.
//!
//! Host capture callbacks are modeled as events on a channel drained by
//! the UI thread. Each acquisition bumps a stream epoch; events carry the
//! epoch so consumers can discard callbacks from streams that have since
//! been released.

#[cfg(feature = "media-io")]
pub mod camera;
#[cfg(feature = "media-io")]
pub mod microphone;
pub mod scripted;

#[cfg(feature = "media-io")]
pub use camera::CameraSource;
#[cfg(feature = "media-io")]
pub use microphone::MicrophoneSource;
pub use scripted::ScriptedSource;

use crate::media::{MediaKind, StreamFormat};
use crate::Result;
use crossbeam_channel::Sender;
use tracing::info;

/// Events produced by an acquired stream.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// One opaque data chunk, in production order.
    Data { epoch: u64, bytes: Vec<u8> },
    /// The stream was released. Enqueued after the source stopped, so it
    /// arrives behind every pending chunk of that stream.
    Released { epoch: u64 },
}

/// A device media stream: microphone, camera, or a scripted stand-in.
///
/// `start` acquires the device and begins delivering `CaptureEvent::Data`
/// tagged with `epoch` on the supplied channel. `stop` must be idempotent.
pub trait StreamSource {
    fn media_kind(&self) -> MediaKind;

    fn start(&mut self, epoch: u64, events: Sender<CaptureEvent>) -> Result<StreamFormat>;

    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Owns one stream source and its lifecycle.
pub struct CaptureController {
    source: Box<dyn StreamSource>,
    event_tx: Sender<CaptureEvent>,
    epoch: u64,
    format: Option<StreamFormat>,
}

impl CaptureController {
    pub fn new(source: Box<dyn StreamSource>, event_tx: Sender<CaptureEvent>) -> Self {
        Self {
            source,
            event_tx,
            epoch: 0,
            format: None,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        self.source.media_kind()
    }

    /// Acquire the device stream.
    ///
    /// No-op when already streaming. On denial the error is returned and
    /// no state changes; the caller decides what becomes of the widget.
    pub fn acquire(&mut self) -> Result<StreamFormat> {
        if let Some(format) = self.format {
            if self.source.is_active() {
                return Ok(format);
            }
        }

        self.epoch += 1;
        let format = self.source.start(self.epoch, self.event_tx.clone())?;
        info!(epoch = self.epoch, ?format, "device stream acquired");
        self.format = Some(format);
        Ok(format)
    }

    /// Release the device stream. Safe to call when no stream is held.
    ///
    /// The `Released` sentinel is enqueued only after the source stopped,
    /// so it trails every chunk the stream already produced.
    pub fn release(&mut self) {
        if !self.source.is_active() {
            return;
        }
        self.source.stop();
        self.format = None;
        let _ = self.event_tx.send(CaptureEvent::Released { epoch: self.epoch });
        info!(epoch = self.epoch, "device stream released");
    }

    pub fn is_streaming(&self) -> bool {
        self.source.is_active()
    }

    pub fn format(&self) -> Option<StreamFormat> {
        self.format
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::channels::CaptureChannels;
    use crate::RecorderError;

    #[test]
    fn test_acquire_release_cycle() {
        let channels = CaptureChannels::new();
        let source = ScriptedSource::audio();
        let mut controller = CaptureController::new(Box::new(source), channels.event_tx);

        assert!(!controller.is_streaming());
        assert!(controller.format().is_none());

        controller.acquire().expect("acquire should succeed");
        assert!(controller.is_streaming());
        assert_eq!(controller.epoch(), 1);
        assert!(controller.format().is_some());

        controller.release();
        assert!(!controller.is_streaming());
        assert!(controller.format().is_none());

        // re-acquiring bumps the epoch
        controller.acquire().expect("second acquire should succeed");
        assert_eq!(controller.epoch(), 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let channels = CaptureChannels::new();
        let source = ScriptedSource::audio();
        let mut controller = CaptureController::new(Box::new(source), channels.event_tx);

        controller.acquire().expect("acquire should succeed");
        controller.release();
        controller.release();

        // exactly one Released sentinel in the channel
        let mut released = 0;
        while let Ok(event) = channels.event_rx.try_recv() {
            if matches!(event, CaptureEvent::Released { .. }) {
                released += 1;
            }
        }
        assert_eq!(released, 1);
    }

    #[test]
    fn test_release_without_stream_is_a_no_op() {
        let channels = CaptureChannels::new();
        let source = ScriptedSource::audio();
        let mut controller = CaptureController::new(Box::new(source), channels.event_tx);

        controller.release();
        assert!(channels.event_rx.try_recv().is_err());
    }

    #[test]
    fn test_sentinel_trails_pending_chunks() {
        let channels = CaptureChannels::new();
        let source = ScriptedSource::audio();
        let handle = source.clone();
        let mut controller = CaptureController::new(Box::new(source), channels.event_tx);

        controller.acquire().expect("acquire should succeed");
        assert!(handle.emit(b"A".to_vec()));
        assert!(handle.emit(b"B".to_vec()));
        controller.release();

        let mut order = Vec::new();
        while let Ok(event) = channels.event_rx.try_recv() {
            match event {
                CaptureEvent::Data { bytes, .. } => order.push(bytes),
                CaptureEvent::Released { .. } => order.push(b"released".to_vec()),
            }
        }
        assert_eq!(order, vec![b"A".to_vec(), b"B".to_vec(), b"released".to_vec()]);
    }

    #[test]
    fn test_denied_acquisition_surfaces_error() {
        let channels = CaptureChannels::new();
        let source = ScriptedSource::audio()
            .denying(RecorderError::PermissionDenied("scripted denial".into()));
        let mut controller = CaptureController::new(Box::new(source), channels.event_tx);

        let err = controller.acquire().expect_err("acquire should fail");
        assert!(err.is_terminal());
        assert!(!controller.is_streaming());
    }
}
