pub mod recorder_panel;
pub mod waveform;

pub use recorder_panel::RecorderPanel;
pub use waveform::Waveform;
