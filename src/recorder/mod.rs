//! Recording sessions and the per-widget recorder controller.

pub mod controller;
pub mod session;

pub use controller::RecorderController;
pub use session::{RecordingSession, SessionState};
