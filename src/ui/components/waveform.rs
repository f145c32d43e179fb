//! Waveform display for live audio and playback progress.

use crate::ui::theme::Theme;
use eframe::egui::{self, Color32, Pos2, Stroke, Vec2};

pub struct Waveform<'a> {
    samples: &'a [f32],
    color: Color32,
    height: f32,
}

impl<'a> Waveform<'a> {
    pub fn new(samples: &'a [f32], theme: &Theme) -> Self {
        Self {
            samples,
            color: theme.waveform,
            height: 80.0,
        }
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (response, painter) =
            ui.allocate_painter(Vec2::new(width, self.height), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, Color32::from_black_alpha(60));

        if self.samples.is_empty() {
            let mid = rect.center().y;
            painter.line_segment(
                [Pos2::new(rect.left(), mid), Pos2::new(rect.right(), mid)],
                Stroke::new(1.0, self.color.linear_multiply(0.3)),
            );
            return;
        }

        // one vertical bar per pixel column, peak within the column's span
        let columns = rect.width().max(1.0) as usize;
        let per_column = (self.samples.len() as f32 / columns as f32).max(1.0);
        let mid = rect.center().y;
        let half = rect.height() / 2.0 - 2.0;

        for col in 0..columns {
            let start = (col as f32 * per_column) as usize;
            let end = (((col + 1) as f32 * per_column) as usize).min(self.samples.len());
            if start >= end {
                continue;
            }
            let peak = self.samples[start..end]
                .iter()
                .fold(0.0f32, |acc, s| acc.max(s.abs()))
                .min(1.0);
            let x = rect.left() + col as f32;
            let extent = (peak * half).max(0.5);
            painter.line_segment(
                [Pos2::new(x, mid - extent), Pos2::new(x, mid + extent)],
                Stroke::new(1.0, self.color),
            );
        }
    }
}
