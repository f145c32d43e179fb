//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests drive the recorder widget through its buttons and check
//! the accessibility tree for the derived labels.

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use mediarec::capture::{CaptureController, ScriptedSource};
use mediarec::media::BlobStore;
use mediarec::recorder::RecorderController;
use mediarec::ui::components::RecorderPanel;
use mediarec::ui::Theme;
use mediarec::utils::channels::CaptureChannels;
use mediarec::RecorderError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Widget wrapper for testing
struct TestWidget {
    panel: RecorderPanel,
    handle: ScriptedSource,
    store: BlobStore,
    completions: Arc<Mutex<Vec<String>>>,
    theme: Theme,
}

impl TestWidget {
    fn new(source: ScriptedSource) -> Self {
        let channels = CaptureChannels::new();
        let handle = source.clone();
        let store = BlobStore::new();
        let capture = CaptureController::new(Box::new(source), channels.event_tx);
        let mut controller = RecorderController::new(capture, channels.event_rx, store.clone());

        let completions: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = completions.clone();
        controller.set_on_complete(Box::new(move |locator| {
            sink.lock().push(locator.to_string());
        }));

        Self {
            panel: RecorderPanel::new(controller),
            handle,
            store,
            completions,
            theme: Theme::default(),
        }
    }

    fn audio() -> Self {
        Self::new(ScriptedSource::audio())
    }

    fn video() -> Self {
        Self::new(ScriptedSource::video())
    }
}

fn harness(widget: TestWidget) -> Harness<'static, TestWidget> {
    Harness::builder()
        .with_size(egui::Vec2::new(500.0, 400.0))
        .build_state(
            |ctx, widget: &mut TestWidget| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    widget.panel.show(ui, &widget.theme);
                });
            },
            widget,
        )
}

/// Test that the idle widget shows all three controls
#[test]
fn test_idle_widget_shows_controls() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    let _device = harness.get_by_label("Start Microphone");
    let _record = harness.get_by_label("Start Recording");
    let _transport = harness.get_by_label("Stop Recording");
}

/// Test that starting the device flips the toggle label
#[test]
fn test_device_toggle_labels() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    harness.get_by_label("Start Microphone").click();
    harness.run();

    let _device = harness.get_by_label("Stop Microphone");

    harness.get_by_label("Stop Microphone").click();
    harness.run();

    let _device = harness.get_by_label("Start Microphone");
}

/// Test the complete flow: acquire, record, stop, play affordance
#[test]
fn test_complete_recording_flow() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    // Step 1: Acquire the microphone
    harness.get_by_label("Start Microphone").click();
    harness.run();

    // Step 2: Start recording
    harness.get_by_label("Start Recording").click();
    harness.run();

    // The record button now shows the in-progress label
    let _recording = harness.get_by_label("Recording...");

    // Step 3: Device produces chunks
    harness.state().handle.emit(b"AB".to_vec());
    harness.state().handle.emit(b"CD".to_vec());
    harness.run();

    // Step 4: Stop recording
    harness.get_by_label("Stop Recording").click();
    harness.run();

    // The transport becomes the play affordance
    let _play = harness.get_by_label("Play Recording");

    // Completion callback fired with a resolvable locator
    let completions = harness.state().completions.lock();
    assert_eq!(completions.len(), 1, "Should have exactly one completion");
    let artifact = harness
        .state()
        .store
        .resolve(&completions[0])
        .expect("locator should resolve");
    assert_eq!(artifact.bytes.as_slice(), b"ABCD");
}

/// Test that a denied device shows the error message and disables controls
#[test]
fn test_denied_device_shows_error() {
    let widget = TestWidget::new(
        ScriptedSource::audio().denying(RecorderError::PermissionDenied("no mic".into())),
    );
    let mut harness = harness(widget);
    harness.run();

    harness.get_by_label("Start Microphone").click();
    harness.run();

    let _error = harness.get_by_label("Access to the capture device was denied.");
    assert!(harness.state().completions.lock().is_empty());
}

/// Test that the record button does nothing while idle
#[test]
fn test_record_disabled_while_idle() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    harness.get_by_label("Start Recording").click();
    harness.run();

    // still idle: device toggle still reads "Start"
    let _device = harness.get_by_label("Start Microphone");
    assert!(harness.state().completions.lock().is_empty());
}

/// Test that the video widget derives camera labels
#[test]
fn test_video_widget_uses_camera_labels() {
    let mut harness = harness(TestWidget::video());
    harness.run();

    let _title = harness.get_by_label("Video Recorder");
    harness.get_by_label("Start Camera").click();
    harness.run();

    let _device = harness.get_by_label("Stop Camera");
}

/// Test that stopping the device mid-recording still completes the recording
#[test]
fn test_device_stop_mid_recording_completes() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    harness.get_by_label("Start Microphone").click();
    harness.run();
    harness.get_by_label("Start Recording").click();
    harness.run();

    harness.state().handle.emit(b"partial".to_vec());
    harness.get_by_label("Stop Microphone").click();
    harness.run();

    let _play = harness.get_by_label("Play Recording");
    assert_eq!(harness.state().completions.lock().len(), 1);
}

/// Test re-recording after a completed take
#[test]
fn test_rerecord_after_playable() {
    let mut harness = harness(TestWidget::audio());
    harness.run();

    // first take
    harness.get_by_label("Start Microphone").click();
    harness.run();
    harness.get_by_label("Start Recording").click();
    harness.run();
    harness.state().handle.emit(b"one".to_vec());
    harness.get_by_label("Stop Recording").click();
    harness.run();

    // second take
    harness.get_by_label("Start Microphone").click();
    harness.run();
    harness.get_by_label("Start Recording").click();
    harness.run();
    harness.state().handle.emit(b"two".to_vec());
    harness.get_by_label("Stop Recording").click();
    harness.run();

    let completions = harness.state().completions.lock();
    assert_eq!(completions.len(), 2);
    assert_ne!(completions[0], completions[1]);
}
