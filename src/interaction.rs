//! Drag and resize geometry.
//!
//! Pure functions and small session records used by the input dispatcher.
//! Resizing works in absolute (screen) coordinates captured at press time and
//! converts back to surface-local coordinates only when committing, so a pan
//! during the gesture cannot make the rectangle drift.

use crate::constants::HANDLE_SIZE;
use crate::types::{Geometry, InstanceId, ResizeHandle};
use eframe::egui;

/// An active drag-to-move gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Instance being moved
    pub id: InstanceId,
    /// Pointer position of the previous step
    pub reference: egui::Pos2,
}

impl DragSession {
    /// Starts a drag at `pointer`.
    pub fn new(id: InstanceId, pointer: egui::Pos2) -> Self {
        Self {
            id,
            reference: pointer,
        }
    }

    /// Delta since the previous step; moves the reference to `pointer`.
    pub fn step(&mut self, pointer: egui::Pos2) -> egui::Vec2 {
        let delta = pointer - self.reference;
        self.reference = pointer;
        delta
    }
}

/// An active drag-to-resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    /// Instance being resized
    pub id: InstanceId,
    /// Handle grabbed
    pub handle: ResizeHandle,
    /// Pointer position at press, in screen space
    pub start_pointer: egui::Pos2,
    /// Instance rectangle at press, in screen space
    pub start_rect: Geometry,
}

impl ResizeSession {
    /// Screen-space rectangle for the pointer at `pointer`.
    pub fn rect_at(&self, pointer: egui::Pos2, min_size: f32) -> Geometry {
        resize_rect(self.handle, self.start_rect, pointer - self.start_pointer, min_size)
    }
}

/// Applies a handle drag of `delta` to `start`.
///
/// `E`/`S` grow the size; `W`/`N` shrink it and move the left/top edge so the
/// opposite edge stays put. A dimension whose raw value falls below
/// `min_size` is floored and its origin shift is dropped: the axis freezes
/// instead of overshooting.
pub fn resize_rect(
    handle: ResizeHandle,
    start: Geometry,
    delta: egui::Vec2,
    min_size: f32,
) -> Geometry {
    let mut rect = start;

    if handle.moves_right() {
        rect.width = (start.width + delta.x).max(min_size);
    } else if handle.moves_left() {
        let raw = start.width - delta.x;
        if raw >= min_size {
            rect.width = raw;
            rect.x = start.x + delta.x;
        } else {
            rect.width = min_size;
        }
    }

    if handle.moves_bottom() {
        rect.height = (start.height + delta.y).max(min_size);
    } else if handle.moves_top() {
        let raw = start.height - delta.y;
        if raw >= min_size {
            rect.height = raw;
            rect.y = start.y + delta.y;
        } else {
            rect.height = min_size;
        }
    }

    rect
}

/// Hot zone of `handle` for an instance at `rect`, centered on its anchor.
pub fn handle_rect(handle: ResizeHandle, rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(handle.anchor(rect), egui::vec2(HANDLE_SIZE, HANDLE_SIZE))
}

/// The handle whose hot zone contains `point`, if any.
pub fn handle_at(rect: egui::Rect, point: egui::Pos2) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|handle| handle_rect(*handle, rect).contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MIN_SIZE;
    use uuid::Uuid;

    fn start() -> Geometry {
        Geometry::new(60.0, 45.0, 300.0, 200.0)
    }

    #[test]
    fn test_east_and_south_grow() {
        let rect = resize_rect(ResizeHandle::SE, start(), egui::vec2(40.0, 40.0), MIN_SIZE);

        assert_eq!(rect, Geometry::new(60.0, 45.0, 340.0, 240.0));
    }

    #[test]
    fn test_west_keeps_right_edge() {
        let rect = resize_rect(ResizeHandle::W, start(), egui::vec2(50.0, 13.0), MIN_SIZE);

        assert_eq!(rect, Geometry::new(110.0, 45.0, 250.0, 200.0));
        assert_eq!(rect.x + rect.width, start().x + start().width);
    }

    #[test]
    fn test_west_below_minimum_freezes_left_edge() {
        let rect = resize_rect(ResizeHandle::W, start(), egui::vec2(250.0, 0.0), MIN_SIZE);

        assert_eq!(rect.width, MIN_SIZE);
        assert_eq!(rect.x, start().x);
    }

    #[test]
    fn test_north_below_minimum_freezes_top_edge() {
        let rect = resize_rect(ResizeHandle::N, start(), egui::vec2(0.0, 180.0), MIN_SIZE);

        assert_eq!(rect.height, MIN_SIZE);
        assert_eq!(rect.y, start().y);
    }

    #[test]
    fn test_edge_handles_change_one_dimension() {
        let delta = egui::vec2(30.0, 30.0);

        let east = resize_rect(ResizeHandle::E, start(), delta, MIN_SIZE);
        let south = resize_rect(ResizeHandle::S, start(), delta, MIN_SIZE);

        assert_eq!(east, Geometry::new(60.0, 45.0, 330.0, 200.0));
        assert_eq!(south, Geometry::new(60.0, 45.0, 300.0, 230.0));
    }

    #[test]
    fn test_northwest_combines_both_shifts() {
        let rect = resize_rect(ResizeHandle::NW, start(), egui::vec2(-20.0, -10.0), MIN_SIZE);

        assert_eq!(rect, Geometry::new(40.0, 35.0, 320.0, 210.0));
    }

    #[test]
    fn test_corner_clamps_each_axis_independently() {
        let rect = resize_rect(ResizeHandle::SW, start(), egui::vec2(500.0, 25.0), MIN_SIZE);

        assert_eq!(rect, Geometry::new(60.0, 45.0, MIN_SIZE, 225.0));
    }

    #[test]
    fn test_east_shrinks_to_floor() {
        let rect = resize_rect(ResizeHandle::NE, start(), egui::vec2(-400.0, 0.0), MIN_SIZE);

        assert_eq!(rect.width, MIN_SIZE);
        assert_eq!(rect.x, start().x);
    }

    #[test]
    fn test_drag_session_accumulates_deltas() {
        let mut session = DragSession::new(Uuid::new_v4(), egui::pos2(10.0, 10.0));

        assert_eq!(session.step(egui::pos2(15.0, 12.0)), egui::vec2(5.0, 2.0));
        assert_eq!(session.step(egui::pos2(14.0, 20.0)), egui::vec2(-1.0, 8.0));
        assert_eq!(session.reference, egui::pos2(14.0, 20.0));
    }

    #[test]
    fn test_resize_session_measures_from_start_pointer() {
        let session = ResizeSession {
            id: Uuid::new_v4(),
            handle: ResizeHandle::E,
            start_pointer: egui::pos2(360.0, 100.0),
            start_rect: start(),
        };

        let first = session.rect_at(egui::pos2(370.0, 100.0), MIN_SIZE);
        let second = session.rect_at(egui::pos2(380.0, 100.0), MIN_SIZE);

        assert_eq!(first.width, 310.0);
        assert_eq!(second.width, 320.0);
    }

    #[test]
    fn test_handle_hit_testing() {
        let rect = start().to_rect();

        assert_eq!(handle_at(rect, egui::pos2(60.0, 45.0)), Some(ResizeHandle::NW));
        assert_eq!(handle_at(rect, egui::pos2(362.0, 145.0)), Some(ResizeHandle::E));
        assert_eq!(handle_at(rect, egui::pos2(210.0, 245.0)), Some(ResizeHandle::S));
        assert_eq!(handle_at(rect, egui::pos2(200.0, 150.0)), None);
    }
}
