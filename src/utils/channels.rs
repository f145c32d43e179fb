//! Channel plumbing between capture threads and the UI thread.

use crate::capture::CaptureEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// The event channel one widget's capture stream feeds.
///
/// Unbounded: recorded chunks must not be dropped under backpressure, and
/// the UI drains every frame.
pub struct CaptureChannels {
    pub event_tx: Sender<CaptureEvent>,
    pub event_rx: Receiver<CaptureEvent>,
}

impl CaptureChannels {
    pub fn new() -> Self {
        let (event_tx, event_rx) = unbounded();
        Self { event_tx, event_rx }
    }
}

impl Default for CaptureChannels {
    fn default() -> Self {
        Self::new()
    }
}
