//! Pannable viewport and background grid.
//!
//! The viewport owns the cumulative pan offset and the drawable size of the
//! surface. Grid lines are computed only for the visible window, so their
//! number depends on the surface size and never on how far the user panned.

use crate::constants::GRID_SIZE;
use crate::types::PanEvent;
use eframe::egui;

/// Grid lines visible in the current window, in surface-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// x coordinates of vertical lines
    pub vertical: Vec<f32>,
    /// y coordinates of horizontal lines
    pub horizontal: Vec<f32>,
}

/// Pan offset, drawable size and pan gesture state.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pan_offset: egui::Vec2,
    size: egui::Vec2,
    last_pan_pos: Option<egui::Pos2>,
    grid_size: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Creates a viewport with no pan and no drawable area.
    pub fn new() -> Self {
        Self {
            pan_offset: egui::Vec2::ZERO,
            size: egui::Vec2::ZERO,
            last_pan_pos: None,
            grid_size: GRID_SIZE,
        }
    }

    /// Cumulative pan offset.
    pub fn pan_offset(&self) -> egui::Vec2 {
        self.pan_offset
    }

    /// Drawable size.
    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    /// Sets the drawable area. The pan offset is kept.
    ///
    /// Returns `true` if the size actually changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let size = egui::vec2(width.max(0.0), height.max(0.0));
        let changed = size != self.size;
        self.size = size;
        changed
    }

    /// Returns `true` while a pan gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.last_pan_pos.is_some()
    }

    /// Starts a pan gesture at `pos`.
    pub fn begin_pan(&mut self, pos: egui::Pos2) {
        self.last_pan_pos = Some(pos);
    }

    /// Continues the pan gesture; returns the emitted event, or `None` if no
    /// gesture is active or the pointer did not move.
    pub fn pan_to(&mut self, pos: egui::Pos2) -> Option<PanEvent> {
        let last = self.last_pan_pos?;
        let delta = pos - last;
        self.last_pan_pos = Some(pos);
        if delta == egui::Vec2::ZERO {
            return None;
        }
        Some(self.pan_by(delta))
    }

    /// Ends the pan gesture.
    pub fn end_pan(&mut self) {
        self.last_pan_pos = None;
    }

    /// Shifts the offset by `delta` and describes the step.
    pub fn pan_by(&mut self, delta: egui::Vec2) -> PanEvent {
        self.pan_offset += delta;
        PanEvent {
            dx: delta.x,
            dy: delta.y,
            offset_x: self.pan_offset.x,
            offset_y: self.pan_offset.y,
        }
    }

    /// Converts a surface-local position into world coordinates.
    pub fn surface_to_world(&self, pos: egui::Pos2) -> egui::Pos2 {
        pos - self.pan_offset
    }

    /// Converts a world position into surface-local coordinates.
    pub fn world_to_surface(&self, pos: egui::Pos2) -> egui::Pos2 {
        pos + self.pan_offset
    }

    /// Computes the grid lines covering the visible world window
    /// `[-offset - margin, -offset + size + margin]` with one cell of margin,
    /// translated back into surface-local coordinates.
    pub fn grid_lines(&self) -> GridLines {
        let grid = self.grid_size;
        let world_min = self.surface_to_world(egui::Pos2::ZERO) - egui::vec2(grid, grid);
        let world_max = world_min + self.size + egui::vec2(grid * 2.0, grid * 2.0);

        GridLines {
            vertical: Self::lines_between(world_min.x, world_max.x, grid)
                .map(|x| self.world_to_surface(egui::pos2(x, 0.0)).x)
                .collect(),
            horizontal: Self::lines_between(world_min.y, world_max.y, grid)
                .map(|y| self.world_to_surface(egui::pos2(0.0, y)).y)
                .collect(),
        }
    }

    fn lines_between(start: f32, end: f32, grid: f32) -> impl Iterator<Item = f32> {
        let first = (start / grid).floor() as i64;
        let last = (end / grid).ceil() as i64;
        (first..=last)
            .map(move |i| i as f32 * grid)
            .filter(move |v| *v >= start && *v < end)
    }

    /// Draws the grid into `rect`, whose top-left is the surface origin.
    ///
    /// Pure function of the pan offset and the drawable size, so redundant
    /// calls paint the same shapes.
    pub fn render(&self, painter: &egui::Painter, rect: egui::Rect, stroke: egui::Stroke) {
        let lines = self.grid_lines();
        for x in lines.vertical {
            let sx = rect.min.x + x;
            painter.line_segment(
                [egui::pos2(sx, rect.min.y), egui::pos2(sx, rect.max.y)],
                stroke,
            );
        }
        for y in lines.horizontal {
            let sy = rect.min.y + y;
            painter.line_segment(
                [egui::pos2(rect.min.x, sy), egui::pos2(rect.max.x, sy)],
                stroke,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_keeps_pan_offset() {
        let mut viewport = Viewport::new();
        viewport.pan_by(egui::vec2(30.0, -12.0));

        assert!(viewport.resize(800.0, 600.0));
        assert!(!viewport.resize(800.0, 600.0));

        assert_eq!(viewport.pan_offset(), egui::vec2(30.0, -12.0));
        assert_eq!(viewport.size(), egui::vec2(800.0, 600.0));
    }

    #[test]
    fn test_pan_gesture_emits_delta_and_offset() {
        let mut viewport = Viewport::new();
        viewport.begin_pan(egui::pos2(100.0, 100.0));

        let event = viewport.pan_to(egui::pos2(110.0, 95.0)).unwrap();

        assert_eq!(
            event,
            PanEvent {
                dx: 10.0,
                dy: -5.0,
                offset_x: 10.0,
                offset_y: -5.0
            }
        );
        assert!(viewport.pan_to(egui::pos2(110.0, 95.0)).is_none());

        viewport.end_pan();
        assert!(!viewport.is_panning());
        assert!(viewport.pan_to(egui::pos2(200.0, 200.0)).is_none());
    }

    #[test]
    fn test_grid_line_count_is_independent_of_pan() {
        let mut viewport = Viewport::new();
        viewport.resize(400.0, 200.0);
        let before = viewport.grid_lines();

        viewport.pan_by(egui::vec2(-1_000_000.0, 523_456.0));
        let after = viewport.grid_lines();

        assert_eq!(before.vertical.len(), after.vertical.len());
        assert_eq!(before.horizontal.len(), after.horizontal.len());
        // 400 / 20 cells plus one cell of margin on either side
        assert_eq!(before.vertical.len(), 22);
    }

    #[test]
    fn test_grid_lines_cover_visible_window_and_track_pan() {
        let mut viewport = Viewport::new();
        viewport.resize(100.0, 100.0);
        viewport.pan_by(egui::vec2(7.0, 0.0));

        let lines = viewport.grid_lines();

        assert!(lines.vertical.iter().all(|x| *x >= -GRID_SIZE && *x <= 100.0 + GRID_SIZE));
        assert!(lines.vertical.iter().any(|x| *x <= 0.0));
        assert!(lines.vertical.iter().any(|x| *x >= 100.0));
        // World line 0 lands at the pan offset
        assert!(lines.vertical.contains(&7.0));
    }

    #[test]
    fn test_grid_is_idempotent() {
        let mut viewport = Viewport::new();
        viewport.resize(320.0, 240.0);
        viewport.pan_by(egui::vec2(3.5, 9.25));

        assert_eq!(viewport.grid_lines(), viewport.grid_lines());
    }

    #[test]
    fn test_world_surface_round_trip() {
        let mut viewport = Viewport::new();
        viewport.pan_by(egui::vec2(40.0, -20.0));

        let world = viewport.surface_to_world(egui::pos2(50.0, 50.0));

        assert_eq!(world, egui::pos2(10.0, 70.0));
        assert_eq!(viewport.world_to_surface(world), egui::pos2(50.0, 50.0));
    }
}
