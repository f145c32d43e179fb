//! Application theme.

use eframe::egui::{self, Color32};

#[derive(Clone)]
pub struct Theme {
    pub background: Color32,
    pub panel: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub accent: Color32,
    pub recording: Color32,
    pub error: Color32,
    pub waveform: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(24, 26, 31),
            panel: Color32::from_rgb(32, 34, 40),
            text: Color32::from_rgb(220, 222, 228),
            text_dim: Color32::from_rgb(140, 144, 152),
            accent: Color32::from_rgb(86, 156, 214),
            recording: Color32::from_rgb(220, 80, 80),
            error: Color32::from_rgb(235, 110, 100),
            waveform: Color32::from_rgb(100, 200, 140),
        }
    }
}

impl Theme {
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.background;
        visuals.window_fill = self.panel;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.hovered.bg_fill = self.accent.linear_multiply(0.3);
        visuals.widgets.active.bg_fill = self.accent.linear_multiply(0.5);
        visuals.selection.bg_fill = self.accent.linear_multiply(0.4);
        ctx.set_visuals(visuals);
    }
}
