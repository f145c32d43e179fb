//! Microphone capture via cpal.

use super::{CaptureEvent, StreamSource};
use crate::media::{encode_pcm16, MediaKind, StreamFormat};
use crate::{RecorderError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

/// Captures PCM16 chunks from the default input device.
pub struct MicrophoneSource {
    stream: Option<cpal::Stream>,
    active: Arc<Mutex<bool>>,
    format: Option<StreamFormat>,
}

impl MicrophoneSource {
    pub fn new() -> Self {
        Self {
            stream: None,
            active: Arc::new(Mutex::new(false)),
            format: None,
        }
    }
}

impl Default for MicrophoneSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSource for MicrophoneSource {
    fn media_kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn start(&mut self, epoch: u64, events: Sender<CaptureEvent>) -> Result<StreamFormat> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or_else(|| {
            RecorderError::DeviceUnavailable("No input device available".to_string())
        })?;

        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown".to_string());
        info!("Using input device: {}", device_name);

        let config = device.default_input_config().map_err(|e| {
            RecorderError::PermissionDenied(format!("Failed to get input config: {}", e))
        })?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();
        info!("Input config: {} Hz, {} channels", sample_rate, channels);

        let active = self.active.clone();
        *active.lock() = true;
        let active_cb = active.clone();

        let err_fn = |e| error!("Audio input stream error: {}", e);

        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*active_cb.lock() {
                        return;
                    }
                    let _ = events.send(CaptureEvent::Data {
                        epoch,
                        bytes: encode_pcm16(data),
                    });
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                RecorderError::CaptureError(format!("Failed to build input stream: {}", e))
            })?;

        stream
            .play()
            .map_err(|e| RecorderError::CaptureError(format!("Failed to start stream: {}", e)))?;

        let format = StreamFormat::Audio {
            sample_rate,
            channels,
        };
        self.stream = Some(stream);
        self.format = Some(format);
        Ok(format)
    }

    fn stop(&mut self) {
        *self.active.lock() = false;
        // Dropping the stream stops the device callback
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Microphone stream stopped");
        }
        self.format = None;
    }

    fn is_active(&self) -> bool {
        *self.active.lock()
    }
}

impl Drop for MicrophoneSource {
    fn drop(&mut self) {
        self.stop();
    }
}
