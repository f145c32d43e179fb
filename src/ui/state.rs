//! Widget state and its single source of control truth.
//!
//! Button labels, enablement and the display binding are all derived
//! from one tagged state, so no combination of controls can contradict
//! the widget's actual condition.

use crate::media::MediaKind;

/// The five conditions a recorder widget can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// No stream, no artifact.
    Idle,
    /// Device stream live, not recording.
    Streaming,
    /// Stream live and a session buffering chunks.
    Recording,
    /// No stream; a finished artifact is ready.
    Playable,
    /// Terminal device failure.
    Error,
}

/// One button's derived presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: String,
    pub enabled: bool,
}

impl ButtonSpec {
    fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
        }
    }
}

/// The widget's three controls: device toggle, record, transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSet {
    pub device: ButtonSpec,
    pub record: ButtonSpec,
    pub transport: ButtonSpec,
}

/// Derive all three controls from the widget state.
pub fn controls_for(state: WidgetState, kind: MediaKind) -> ControlSet {
    let noun = kind.device_noun();
    match state {
        WidgetState::Idle => ControlSet {
            device: ButtonSpec::new(format!("Start {noun}"), true),
            record: ButtonSpec::new("Start Recording", false),
            transport: ButtonSpec::new("Stop Recording", false),
        },
        WidgetState::Streaming => ControlSet {
            device: ButtonSpec::new(format!("Stop {noun}"), true),
            record: ButtonSpec::new("Start Recording", true),
            // enabled but a no-op until a session starts
            transport: ButtonSpec::new("Stop Recording", true),
        },
        WidgetState::Recording => ControlSet {
            device: ButtonSpec::new(format!("Stop {noun}"), true),
            record: ButtonSpec::new("Recording...", false),
            transport: ButtonSpec::new("Stop Recording", true),
        },
        WidgetState::Playable => ControlSet {
            device: ButtonSpec::new(format!("Start {noun}"), true),
            record: ButtonSpec::new("Start Recording", false),
            transport: ButtonSpec::new("Play Recording", true),
        },
        WidgetState::Error => ControlSet {
            device: ButtonSpec::new(format!("Start {noun}"), false),
            record: ButtonSpec::new("Start Recording", false),
            transport: ButtonSpec::new("Stop Recording", false),
        },
    }
}

/// What the widget's display element should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySource {
    /// Nothing bound; show a placeholder.
    Unbound,
    /// Mirror the live device stream.
    Live,
    /// Show the finished artifact.
    Artifact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBinding {
    pub source: DisplaySource,
    /// Live monitoring is muted to avoid feedback; artifacts are not.
    pub muted: bool,
    pub autoplay: bool,
    pub controls: bool,
}

/// Derive the display binding from the widget state.
pub fn display_binding(state: WidgetState) -> DisplayBinding {
    match state {
        WidgetState::Streaming | WidgetState::Recording => DisplayBinding {
            source: DisplaySource::Live,
            muted: true,
            autoplay: true,
            controls: false,
        },
        WidgetState::Playable => DisplayBinding {
            source: DisplaySource::Artifact,
            muted: false,
            autoplay: false,
            controls: true,
        },
        WidgetState::Idle | WidgetState::Error => DisplayBinding {
            source: DisplaySource::Unbound,
            muted: true,
            autoplay: false,
            controls: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_controls() {
        let controls = controls_for(WidgetState::Idle, MediaKind::Video);
        assert_eq!(controls.device.label, "Start Camera");
        assert!(controls.device.enabled);
        assert!(!controls.record.enabled);
        assert!(!controls.transport.enabled);
    }

    #[test]
    fn test_streaming_controls() {
        let controls = controls_for(WidgetState::Streaming, MediaKind::Audio);
        assert_eq!(controls.device.label, "Stop Microphone");
        assert_eq!(controls.record.label, "Start Recording");
        assert!(controls.record.enabled);
        assert!(controls.transport.enabled);
    }

    #[test]
    fn test_recording_controls() {
        let controls = controls_for(WidgetState::Recording, MediaKind::Audio);
        assert_eq!(controls.record.label, "Recording...");
        assert!(!controls.record.enabled);
        assert_eq!(controls.transport.label, "Stop Recording");
        assert!(controls.transport.enabled);
    }

    #[test]
    fn test_playable_controls() {
        let controls = controls_for(WidgetState::Playable, MediaKind::Video);
        assert_eq!(controls.device.label, "Start Camera");
        assert!(controls.device.enabled);
        assert_eq!(controls.transport.label, "Play Recording");
        assert!(controls.transport.enabled);
        assert!(!controls.record.enabled);
    }

    #[test]
    fn test_error_disables_everything() {
        let controls = controls_for(WidgetState::Error, MediaKind::Audio);
        assert!(!controls.device.enabled);
        assert!(!controls.record.enabled);
        assert!(!controls.transport.enabled);
    }

    #[test]
    fn test_display_binding_follows_state() {
        let live = display_binding(WidgetState::Recording);
        assert_eq!(live.source, DisplaySource::Live);
        assert!(live.muted);
        assert!(live.autoplay);
        assert!(!live.controls);

        let playable = display_binding(WidgetState::Playable);
        assert_eq!(playable.source, DisplaySource::Artifact);
        assert!(!playable.muted);
        assert!(playable.controls);

        assert_eq!(display_binding(WidgetState::Idle).source, DisplaySource::Unbound);
        assert_eq!(display_binding(WidgetState::Error).source, DisplaySource::Unbound);
    }
}
