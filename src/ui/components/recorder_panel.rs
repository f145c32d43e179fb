//! One recorder widget: display element, three controls, status line.

use crate::media::{MediaKind, StreamFormat};
use crate::recorder::RecorderController;
use crate::ui::components::Waveform;
use crate::ui::state::{controls_for, display_binding, ButtonSpec, DisplaySource, WidgetState};
use crate::ui::theme::Theme;
#[cfg(feature = "media-io")]
use crate::playback::AudioPlayer;
use crate::playback::VideoPlayer;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use tracing::warn;

pub struct RecorderPanel {
    controller: RecorderController,
    #[cfg(feature = "media-io")]
    audio_player: AudioPlayer,
    video_player: VideoPlayer,
    texture: Option<TextureHandle>,
}

impl RecorderPanel {
    pub fn new(controller: RecorderController) -> Self {
        Self {
            controller,
            #[cfg(feature = "media-io")]
            audio_player: AudioPlayer::new(),
            video_player: VideoPlayer::new(),
            texture: None,
        }
    }

    pub fn controller_mut(&mut self) -> &mut RecorderController {
        &mut self.controller
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        self.controller.pump();

        let kind = self.controller.media_kind();
        let state = self.controller.widget_state();
        let controls = controls_for(state, kind);

        ui.heading(kind.widget_title());
        ui.add_space(8.0);

        self.show_display(ui, theme, kind, state);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if Self::button(ui, &controls.device).clicked() {
                self.on_device_clicked(state);
            }
            if Self::button(ui, &controls.record).clicked() {
                self.controller.start_recording();
            }
            if Self::button(ui, &controls.transport).clicked() {
                self.on_transport_clicked(state);
            }
        });

        ui.add_space(6.0);
        self.show_status(ui, theme, state);

        if self.is_busy(state) {
            ui.ctx().request_repaint();
        }
    }

    fn button(ui: &mut egui::Ui, spec: &ButtonSpec) -> egui::Response {
        ui.add_enabled(spec.enabled, egui::Button::new(&spec.label))
    }

    fn on_device_clicked(&mut self, state: WidgetState) {
        match state {
            WidgetState::Streaming | WidgetState::Recording => self.controller.stop_device(),
            _ => {
                self.stop_playback();
                if let Err(e) = self.controller.start_device() {
                    warn!("Device toggle failed: {}", e);
                }
            }
        }
    }

    fn on_transport_clicked(&mut self, state: WidgetState) {
        match state {
            WidgetState::Recording => self.controller.stop_recording(),
            WidgetState::Playable => self.play_artifact(),
            _ => {}
        }
    }

    fn play_artifact(&mut self) {
        let Some(artifact) = self.controller.last_artifact() else {
            return;
        };
        let result = match artifact.format {
            StreamFormat::Audio { .. } => {
                #[cfg(feature = "media-io")]
                {
                    self.audio_player.play(&artifact)
                }
                #[cfg(not(feature = "media-io"))]
                {
                    Ok(())
                }
            }
            StreamFormat::Video { .. } => self.video_player.play(artifact),
        };
        if let Err(e) = result {
            warn!("Playback failed: {}", e);
        }
    }

    fn stop_playback(&mut self) {
        #[cfg(feature = "media-io")]
        self.audio_player.stop();
        self.video_player.stop();
    }

    fn show_display(
        &mut self,
        ui: &mut egui::Ui,
        theme: &Theme,
        kind: MediaKind,
        state: WidgetState,
    ) {
        let binding = display_binding(state);
        match (binding.source, kind) {
            (DisplaySource::Live, MediaKind::Audio) => {
                Waveform::new(self.controller.live_samples(), theme).show(ui);
            }
            (DisplaySource::Live, MediaKind::Video) => {
                let frame = self.controller.live_frame().map(<[u8]>::to_vec);
                if let (Some(frame), Some(format)) = (frame, self.controller.stream_format()) {
                    self.show_frame(ui, &frame, format);
                } else {
                    self.show_placeholder(ui, theme, "Waiting for frames...");
                }
            }
            (DisplaySource::Artifact, MediaKind::Audio) => {
                self.show_audio_playback(ui, theme);
            }
            (DisplaySource::Artifact, MediaKind::Video) => {
                self.show_video_playback(ui, theme);
            }
            (DisplaySource::Unbound, _) => {
                let message = if state == WidgetState::Error {
                    "Device unavailable"
                } else {
                    "No stream"
                };
                self.show_placeholder(ui, theme, message);
            }
        }
    }

    fn show_audio_playback(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let samples: Vec<f32> = self
            .controller
            .last_artifact()
            .map(|a| crate::media::decode_pcm16(&a.bytes))
            .unwrap_or_default();
        Waveform::new(&samples, theme).color(theme.accent).show(ui);
        #[cfg(feature = "media-io")]
        if self.audio_player.is_playing() {
            ui.add(egui::ProgressBar::new(self.audio_player.progress()).desired_height(6.0));
        }
    }

    fn show_video_playback(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let Some(artifact) = self.controller.last_artifact() else {
            self.show_placeholder(ui, theme, "No recording");
            return;
        };
        let frame = self.video_player.current_frame().map(<[u8]>::to_vec);
        match frame {
            Some(frame) => self.show_frame(ui, &frame, artifact.format),
            None => {
                // not played yet; show the first frame
                let StreamFormat::Video { width, height, .. } = artifact.format else {
                    return;
                };
                let frame_size = (width as usize) * (height as usize) * 3;
                if artifact.bytes.len() >= frame_size && frame_size > 0 {
                    let first = artifact.bytes[..frame_size].to_vec();
                    self.show_frame(ui, &first, artifact.format);
                } else {
                    self.show_placeholder(ui, theme, "Empty recording");
                }
            }
        }
        if self.video_player.is_playing() {
            ui.add(egui::ProgressBar::new(self.video_player.progress()).desired_height(6.0));
        }
    }

    fn show_frame(&mut self, ui: &mut egui::Ui, frame: &[u8], format: StreamFormat) {
        let StreamFormat::Video { width, height, .. } = format else {
            return;
        };
        let expected = (width as usize) * (height as usize) * 3;
        if frame.len() != expected {
            return;
        }
        let image = ColorImage::from_rgb([width as usize, height as usize], frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ui.ctx().load_texture(
                    "recorder-frame",
                    image,
                    TextureOptions::LINEAR,
                ));
            }
        }
        if let Some(texture) = &self.texture {
            let max_width = ui.available_width().min(480.0);
            let scale = max_width / width as f32;
            ui.image((texture.id(), egui::Vec2::new(max_width, height as f32 * scale)));
        }
    }

    fn show_placeholder(&self, ui: &mut egui::Ui, theme: &Theme, message: &str) {
        let (response, painter) = ui.allocate_painter(
            egui::Vec2::new(ui.available_width(), 80.0),
            egui::Sense::hover(),
        );
        painter.rect_filled(response.rect, 4.0, theme.panel);
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::proportional(14.0),
            theme.text_dim,
        );
    }

    fn show_status(&mut self, ui: &mut egui::Ui, theme: &Theme, state: WidgetState) {
        match state {
            WidgetState::Error => {
                if let Some(error) = self.controller.error() {
                    ui.colored_label(theme.error, error.user_message());
                }
            }
            WidgetState::Recording => {
                let duration = self.controller.recording_duration().unwrap_or(0.0);
                ui.colored_label(theme.recording, format!("Recording {:.1}s", duration));
            }
            WidgetState::Playable => {
                if let Some(artifact) = self.controller.last_artifact() {
                    ui.colored_label(
                        theme.text_dim,
                        format!(
                            "{} ({:.1}s)",
                            artifact.media_type,
                            artifact.duration_seconds()
                        ),
                    );
                }
                self.show_export(ui, theme);
            }
            WidgetState::Streaming => {
                ui.colored_label(theme.text_dim, "Live");
            }
            WidgetState::Idle => {}
        }
    }

    fn show_export(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        let Some(artifact) = self.controller.last_artifact() else {
            return;
        };
        if !matches!(artifact.format, StreamFormat::Audio { .. }) {
            return;
        }
        if ui.button("Save WAV").clicked() {
            let path = std::env::temp_dir().join(format!("recording-{}.wav", artifact.id));
            match crate::media::wav::export_artifact(&path, &artifact) {
                Ok(()) => {
                    ui.colored_label(theme.text_dim, format!("Saved to {}", path.display()));
                }
                Err(e) => warn!("WAV export failed: {}", e),
            }
        }
    }

    fn is_busy(&self, state: WidgetState) -> bool {
        if matches!(state, WidgetState::Streaming | WidgetState::Recording) {
            return true;
        }
        #[cfg(feature = "media-io")]
        if self.audio_player.is_playing() {
            return true;
        }
        self.video_player.is_playing()
    }
}
