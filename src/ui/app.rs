//! Application shell: routing between the home page and the two
//! recorder widgets.

use crate::capture::{CaptureController, StreamSource};
use crate::media::{BlobStore, MediaKind};
use crate::recorder::RecorderController;
use crate::ui::components::RecorderPanel;
use crate::ui::theme::Theme;
use crate::utils::channels::CaptureChannels;
use eframe::egui;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    VideoRecorder,
    AudioRecorder,
}

pub struct MediarecApp {
    route: Route,
    theme: Theme,
    store: BlobStore,
    video_panel: Option<RecorderPanel>,
    audio_panel: Option<RecorderPanel>,
}

impl MediarecApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);
        Self {
            route: Route::Home,
            theme,
            store: BlobStore::new(),
            video_panel: None,
            audio_panel: None,
        }
    }

    #[cfg(feature = "media-io")]
    fn default_source(kind: MediaKind) -> Box<dyn StreamSource> {
        match kind {
            MediaKind::Audio => Box::new(crate::capture::MicrophoneSource::new()),
            MediaKind::Video => Box::new(crate::capture::CameraSource::new()),
        }
    }

    #[cfg(not(feature = "media-io"))]
    fn default_source(kind: MediaKind) -> Box<dyn StreamSource> {
        match kind {
            MediaKind::Audio => Box::new(crate::capture::ScriptedSource::audio()),
            MediaKind::Video => Box::new(crate::capture::ScriptedSource::video()),
        }
    }

    fn build_panel(&self, kind: MediaKind) -> RecorderPanel {
        let channels = CaptureChannels::new();
        let capture = CaptureController::new(Self::default_source(kind), channels.event_tx);
        let mut controller =
            RecorderController::new(capture, channels.event_rx, self.store.clone());
        controller.set_on_complete(Box::new(|locator| {
            info!(%locator, "recording complete");
        }));
        RecorderPanel::new(controller)
    }

    fn panel_for(&mut self, kind: MediaKind) -> &mut RecorderPanel {
        let slot = match kind {
            MediaKind::Video => &mut self.video_panel,
            MediaKind::Audio => &mut self.audio_panel,
        };
        if slot.is_none() {
            let panel = self.build_panel(kind);
            let slot = match kind {
                MediaKind::Video => &mut self.video_panel,
                MediaKind::Audio => &mut self.audio_panel,
            };
            *slot = Some(panel);
        }
        match kind {
            MediaKind::Video => self.video_panel.as_mut().expect("panel built above"),
            MediaKind::Audio => self.audio_panel.as_mut().expect("panel built above"),
        }
    }

    fn show_nav(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.route, Route::Home, "Home");
            ui.selectable_value(&mut self.route, Route::VideoRecorder, "Video Recorder");
            ui.selectable_value(&mut self.route, Route::AudioRecorder, "Audio Recorder");
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.heading("Media Recorder");
        ui.add_space(12.0);
        ui.label("Record from your camera or microphone.");
        ui.add_space(12.0);
        if ui.button("Open Video Recorder").clicked() {
            self.route = Route::VideoRecorder;
        }
        if ui.button("Open Audio Recorder").clicked() {
            self.route = Route::AudioRecorder;
        }
        let recordings = self.store.len();
        if recordings > 0 {
            ui.add_space(12.0);
            ui.label(format!("{recordings} recording(s) this session"));
        }
    }
}

impl eframe::App for MediarecApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = self.theme.clone();
        theme.apply(ctx);

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_nav(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::Home => self.show_home(ui),
            Route::VideoRecorder => self.panel_for(MediaKind::Video).show(ui, &theme),
            Route::AudioRecorder => self.panel_for(MediaKind::Audio).show(ui, &theme),
        });
    }
}
