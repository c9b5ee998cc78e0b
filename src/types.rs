//! Core data types shared by the layout engine.
//!
//! Geometry is kept in plain `f32` fields rather than egui's math types so it
//! can be serialized and compared directly in tests; conversion helpers bridge
//! to `egui::Rect` where painting or hit-testing needs it.

use eframe::egui;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a placed instance.
pub type InstanceId = Uuid;

/// Position and size of a placed instance in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width, never below [`crate::constants::MIN_SIZE`] once placed
    pub width: f32,
    /// Height, never below [`crate::constants::MIN_SIZE`] once placed
    pub height: f32,
}

impl Geometry {
    /// Creates a geometry from its four components.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a geometry from an egui rectangle.
    pub fn from_rect(rect: egui::Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }

    /// The geometry as a rectangle in the same coordinate space.
    pub fn to_rect(self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x, self.y),
            egui::vec2(self.width, self.height),
        )
    }

    /// The geometry translated by `offset`, e.g. from surface-local into screen space.
    pub fn translated(self, offset: egui::Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Floors width and height at `min_size`.
    pub fn clamped_size(self, min_size: f32) -> Self {
        Self::new(
            self.x,
            self.y,
            self.width.max(min_size),
            self.height.max(min_size),
        )
    }

    /// Returns `true` if `point` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: egui::Pos2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Partial geometry update; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPatch {
    /// New left edge
    pub x: Option<f32>,
    /// New top edge
    pub y: Option<f32>,
    /// New width
    pub width: Option<f32>,
    /// New height
    pub height: Option<f32>,
}

impl GeometryPatch {
    /// Patch that only sets `x`.
    pub fn x(value: f32) -> Self {
        Self {
            x: Some(value),
            ..Default::default()
        }
    }

    /// Patch that only sets `y`.
    pub fn y(value: f32) -> Self {
        Self {
            y: Some(value),
            ..Default::default()
        }
    }

    /// Patch that only sets `width`.
    pub fn width(value: f32) -> Self {
        Self {
            width: Some(value),
            ..Default::default()
        }
    }

    /// Patch that only sets `height`.
    pub fn height(value: f32) -> Self {
        Self {
            height: Some(value),
            ..Default::default()
        }
    }

    /// Returns `true` if the patch touches width or height.
    pub fn changes_size(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    /// Applies the patch on top of `geometry`.
    pub fn apply_to(&self, geometry: Geometry) -> Geometry {
        Geometry {
            x: self.x.unwrap_or(geometry.x),
            y: self.y.unwrap_or(geometry.y),
            width: self.width.unwrap_or(geometry.width),
            height: self.height.unwrap_or(geometry.height),
        }
    }
}

/// Editor mode of the whole surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Layout manipulation: drag, resize and select; widgets are inert.
    #[default]
    Edit,
    /// Widgets are live; the layout is frozen.
    Play,
}

impl Mode {
    /// Label used on the mode switcher buttons.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Edit => "Edit",
            Mode::Play => "Play",
        }
    }
}

/// Per-instance interactivity, always derived from the current [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceFlags {
    /// Pressing inside the instance starts a drag
    pub draggable: bool,
    /// The eight resize handles are shown and hit-tested
    pub resizable: bool,
    /// The widget itself receives pointer input
    pub widget_enabled: bool,
}

/// The eight resize handles around an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    /// Top edge midpoint
    N,
    /// Top-right corner
    NE,
    /// Right edge midpoint
    E,
    /// Bottom-right corner
    SE,
    /// Bottom edge midpoint
    S,
    /// Bottom-left corner
    SW,
    /// Left edge midpoint
    W,
    /// Top-left corner
    NW,
}

impl ResizeHandle {
    /// All handles, in hit-test order (corners before edges so they win at overlaps).
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SE,
        ResizeHandle::SW,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Whether dragging this handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    /// Whether dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    /// Whether dragging this handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    /// Anchor of the handle on `rect`: a corner or an edge midpoint.
    pub fn anchor(self, rect: egui::Rect) -> egui::Pos2 {
        let x = if self.moves_left() {
            rect.min.x
        } else if self.moves_right() {
            rect.max.x
        } else {
            rect.center().x
        };
        let y = if self.moves_top() {
            rect.min.y
        } else if self.moves_bottom() {
            rect.max.y
        } else {
            rect.center().y
        };
        egui::pos2(x, y)
    }

    /// Cursor shown while hovering or dragging this handle.
    pub fn cursor(self) -> egui::CursorIcon {
        match self {
            ResizeHandle::N => egui::CursorIcon::ResizeNorth,
            ResizeHandle::NE => egui::CursorIcon::ResizeNorthEast,
            ResizeHandle::E => egui::CursorIcon::ResizeEast,
            ResizeHandle::SE => egui::CursorIcon::ResizeSouthEast,
            ResizeHandle::S => egui::CursorIcon::ResizeSouth,
            ResizeHandle::SW => egui::CursorIcon::ResizeSouthWest,
            ResizeHandle::W => egui::CursorIcon::ResizeWest,
            ResizeHandle::NW => egui::CursorIcon::ResizeNorthWest,
        }
    }
}

/// Notification emitted for every pan step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    /// Horizontal delta of this step
    pub dx: f32,
    /// Vertical delta of this step
    pub dy: f32,
    /// Cumulative horizontal pan offset after the step
    pub offset_x: f32,
    /// Cumulative vertical pan offset after the step
    pub offset_y: f32,
}

/// Read-only view of one placed instance, handed to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSummary {
    /// Instance id
    pub id: InstanceId,
    /// Widget type name
    pub kind: String,
    /// Current geometry
    pub geometry: Geometry,
}
