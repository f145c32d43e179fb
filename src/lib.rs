pub mod capture;
pub mod media;
pub mod playback;
pub mod recorder;
pub mod ui;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RecorderError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Capture error: {0}")]
    CaptureError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for RecorderError {
    fn from(e: std::io::Error) -> Self {
        RecorderError::IoError(e.to_string())
    }
}

impl RecorderError {
    /// Check if this error leaves the widget in a terminal state.
    ///
    /// Acquisition failures are not retried: the widget shows the error
    /// and disables its controls.
    pub fn is_terminal(&self) -> bool {
        match self {
            RecorderError::PermissionDenied(_) => true,
            RecorderError::DeviceUnavailable(_) => true,
            RecorderError::CaptureError(_) => false,
            RecorderError::PlaybackError(_) => false,
            RecorderError::IoError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            RecorderError::PermissionDenied(_) => {
                "Access to the capture device was denied.".to_string()
            }
            RecorderError::DeviceUnavailable(_) => {
                "No capture device is available. Please check your camera/microphone.".to_string()
            }
            RecorderError::CaptureError(_) => {
                "Capture failed. Please try again.".to_string()
            }
            RecorderError::PlaybackError(_) => {
                "Playback failed. The recording is still available.".to_string()
            }
            RecorderError::IoError(_) => {
                "File system error occurred.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RecorderError>;
