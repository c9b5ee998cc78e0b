//! Built-in widgets listed in the `core` group.
//!
//! Simple stand-ins: they keep their values locally and
//! only draw enough to be recognizable on the surface.

use super::{Interactivity, Resizable, Widget};
use eframe::egui;
use std::f32::consts::TAU;
use std::time::Duration;

/// Waveform display with a draggable playhead.
#[derive(Debug, Clone)]
pub struct Waveform {
    samples: Vec<f32>,
    playhead: f32,
    enabled: bool,
}

impl Waveform {
    /// Creates a waveform sized for the default instance width.
    pub fn new() -> Self {
        let mut waveform = Self {
            samples: Vec::new(),
            playhead: 0.0,
            enabled: true,
        };
        waveform.resample(crate::constants::SPAWN_WIDTH as usize);
        waveform
    }

    /// Number of points currently rendered, one per horizontal pixel.
    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    fn resample(&mut self, points: usize) {
        let points = points.max(2);
        self.samples = (0..points)
            .map(|i| {
                let t = i as f32 / (points - 1) as f32;
                let envelope = (t * TAU * 0.5).sin().abs();
                envelope * (t * TAU * 12.0).sin() * 0.8
            })
            .collect();
    }
}

impl Default for Waveform {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Waveform {
    fn kind(&self) -> &str {
        "waveform"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let sense = if self.enabled {
            egui::Sense::click_and_drag()
        } else {
            egui::Sense::hover()
        };
        let response = ui.allocate_rect(rect, sense);
        if self.enabled && (response.clicked() || response.dragged()) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.playhead = ((pos.x - rect.min.x) / rect.width()).clamp(0.0, 1.0);
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(20));
        let mid = rect.center().y;
        let half = rect.height() * 0.45;
        let step = rect.width() / (self.samples.len() - 1) as f32;
        let points: Vec<egui::Pos2> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| egui::pos2(rect.min.x + i as f32 * step, mid - s * half))
            .collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 200, 255)),
        ));
        let x = rect.min.x + self.playhead * rect.width();
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 200, 60)),
        );
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }

    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        Some(self)
    }
}

impl Resizable for Waveform {
    fn resize(&mut self, size: egui::Vec2) {
        self.resample(size.x.round() as usize);
    }
}

impl Interactivity for Waveform {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Stereo level meters split into segments.
#[derive(Debug, Clone)]
pub struct Meters {
    segments: usize,
}

impl Meters {
    const SEGMENT_HEIGHT: f32 = 8.0;
    /// Level animation frame interval while live.
    const REFRESH: Duration = Duration::from_millis(33);

    /// Creates meters sized for the default instance height.
    pub fn new() -> Self {
        Self {
            segments: Self::segments_for(crate::constants::SPAWN_HEIGHT),
        }
    }

    /// Number of lit/unlit segments per channel.
    pub fn segments(&self) -> usize {
        self.segments
    }

    fn segments_for(height: f32) -> usize {
        ((height / Self::SEGMENT_HEIGHT) as usize).max(1)
    }
}

impl Default for Meters {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Meters {
    fn kind(&self) -> &str {
        "meters"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(20));

        // Local stand-in levels; real values arrive from the host.
        if ui.is_enabled() {
            ui.ctx().request_repaint_after(Self::REFRESH);
        }
        let time = ui.input(|i| i.time) as f32;
        let levels = [
            0.5 + 0.4 * (time * 2.1).sin(),
            0.5 + 0.4 * (time * 1.7 + 1.0).sin(),
        ];
        let inner = rect.shrink(8.0);
        let channel_width = inner.width() / 2.0;
        let segment_height = inner.height() / self.segments as f32;
        for (channel, level) in levels.iter().enumerate() {
            let lit = (level * self.segments as f32).round() as usize;
            let left = inner.min.x + channel as f32 * channel_width + channel_width * 0.2;
            for segment in 0..self.segments {
                let bottom = inner.max.y - segment as f32 * segment_height;
                let seg_rect = egui::Rect::from_min_max(
                    egui::pos2(left, bottom - segment_height + 1.0),
                    egui::pos2(left + channel_width * 0.6, bottom),
                );
                let color = if segment >= lit {
                    egui::Color32::from_gray(45)
                } else if segment as f32 > self.segments as f32 * 0.85 {
                    egui::Color32::from_rgb(230, 70, 60)
                } else {
                    egui::Color32::from_rgb(80, 200, 100)
                };
                painter.rect_filled(seg_rect, 1.0, color);
            }
        }
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for Meters {
    fn resize(&mut self, size: egui::Vec2) {
        self.segments = Self::segments_for(size.y);
    }
}

/// Transport buttons.
#[derive(Debug, Clone)]
pub struct ButtonGrid {
    playing: bool,
    recording: bool,
    looping: bool,
    enabled: bool,
}

impl ButtonGrid {
    /// Creates the grid with everything stopped.
    pub fn new() -> Self {
        Self {
            playing: false,
            recording: false,
            looping: false,
            enabled: true,
        }
    }
}

impl Default for ButtonGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ButtonGrid {
    fn kind(&self) -> &str {
        "buttongrid"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.add_enabled_ui(self.enabled, |ui| {
            egui::Grid::new(ui.next_auto_id())
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    let play_label = if self.playing { "⏸ Pause" } else { "▶ Play" };
                    if ui.button(play_label).clicked() {
                        self.playing = !self.playing;
                    }
                    if ui.button("⏹ Stop").clicked() {
                        self.playing = false;
                        self.recording = false;
                    }
                    ui.end_row();
                    ui.toggle_value(&mut self.recording, "⏺ Record");
                    ui.toggle_value(&mut self.looping, "🔁 Loop");
                    ui.end_row();
                });
        });
    }

    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        Some(self)
    }
}

impl Interactivity for ButtonGrid {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A small bank of parameter sliders.
#[derive(Debug, Clone)]
pub struct Sliders {
    values: [f32; 3],
    slider_width: f32,
    enabled: bool,
}

impl Sliders {
    const LABELS: [&'static str; 3] = ["Gain", "Tone", "Mix"];

    /// Creates the bank with every slider at half travel.
    pub fn new() -> Self {
        Self {
            values: [0.5; 3],
            slider_width: crate::constants::SPAWN_WIDTH * 0.6,
            enabled: true,
        }
    }
}

impl Default for Sliders {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Sliders {
    fn kind(&self) -> &str {
        "sliders"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().slider_width = self.slider_width;
        ui.add_enabled_ui(self.enabled, |ui| {
            for (label, value) in Self::LABELS.iter().zip(self.values.iter_mut()) {
                ui.add(egui::Slider::new(value, 0.0..=1.0).text(*label));
            }
        });
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }

    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        Some(self)
    }
}

impl Resizable for Sliders {
    fn resize(&mut self, size: egui::Vec2) {
        self.slider_width = (size.x * 0.6).max(40.0);
    }
}

impl Interactivity for Sliders {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Static information panel. Has no optional capabilities.
#[derive(Debug, Clone, Default)]
pub struct InfoPane;

impl InfoPane {
    /// Creates the pane.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for InfoPane {
    fn kind(&self) -> &str {
        "infopane"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Info");
        ui.separator();
        egui::Grid::new(ui.next_auto_id()).num_columns(2).show(ui, |ui| {
            ui.label("Sample rate");
            ui.label("48000 Hz");
            ui.end_row();
            ui.label("Block size");
            ui.label("512");
            ui.end_row();
        });
    }
}
