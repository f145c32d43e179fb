//! Webcam capture via nokhwa.

use super::{CaptureEvent, StreamSource};
use crate::media::{MediaKind, StreamFormat};
use crate::{RecorderError, Result};
use crossbeam_channel::{bounded, Sender};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Captures raw RGB24 frames from the default camera.
///
/// The camera handle is not sendable on every backend, so it is opened
/// and driven entirely inside a capture thread. `start` blocks until the
/// thread reports whether the open succeeded.
pub struct CameraSource {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CameraSource {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl Default for CameraSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSource for CameraSource {
    fn media_kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn start(&mut self, epoch: u64, events: Sender<CaptureEvent>) -> Result<StreamFormat> {
        let running = self.running.clone();
        running.store(true, Ordering::SeqCst);

        let (ready_tx, ready_rx) = bounded::<Result<StreamFormat>>(1);
        let running_worker = running.clone();

        let worker = std::thread::spawn(move || {
            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = match Camera::new(CameraIndex::Index(0), requested) {
                Ok(camera) => camera,
                Err(e) => {
                    let _ = ready_tx.send(Err(RecorderError::DeviceUnavailable(format!(
                        "Failed to open camera: {}",
                        e
                    ))));
                    running_worker.store(false, Ordering::SeqCst);
                    return;
                }
            };

            if let Err(e) = camera.open_stream() {
                let _ = ready_tx.send(Err(RecorderError::PermissionDenied(format!(
                    "Failed to open camera stream: {}",
                    e
                ))));
                running_worker.store(false, Ordering::SeqCst);
                return;
            }

            let resolution = camera.resolution();
            let fps = camera.frame_rate().max(1);
            let format = StreamFormat::Video {
                width: resolution.width(),
                height: resolution.height(),
                fps,
            };
            info!(?format, "Camera stream opened");
            let _ = ready_tx.send(Ok(format));

            let interval = Duration::from_secs_f64(1.0 / fps as f64);
            while running_worker.load(Ordering::SeqCst) {
                let deadline = Instant::now() + interval;
                match camera.frame().and_then(|f| f.decode_image::<RgbFormat>()) {
                    Ok(image) => {
                        let _ = events.send(CaptureEvent::Data {
                            epoch,
                            bytes: image.into_raw(),
                        });
                    }
                    Err(e) => {
                        warn!("Failed to read camera frame: {}", e);
                    }
                }
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
            }

            if let Err(e) = camera.stop_stream() {
                error!("Failed to stop camera stream: {}", e);
            }
            info!("Camera capture thread exiting");
        });

        let format = match ready_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(RecorderError::DeviceUnavailable(
                "Camera thread exited before reporting".to_string(),
            )),
        };

        match format {
            Ok(format) => {
                self.worker = Some(worker);
                Ok(format)
            }
            Err(e) => {
                running.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(e)
            }
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            info!("Camera stream stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.stop();
    }
}
