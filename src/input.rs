//! Shared input dispatch.
//!
//! Panning, dragging and resizing all follow pointer moves and releases from
//! the whole window, not just from the element that was pressed. Instead of
//! each instance tracking its own gesture, one dispatcher holds the single
//! active capture, so two gestures can never run at once.

use crate::interaction::{DragSession, ResizeSession};
use eframe::egui;

/// The gesture currently following the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Capture {
    /// Nothing captured
    #[default]
    Idle,
    /// Background pan
    Panning,
    /// Moving an instance
    Dragging(DragSession),
    /// Resizing an instance
    Resizing(ResizeSession),
}

impl Capture {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Capture::Idle => "idle",
            Capture::Panning => "panning",
            Capture::Dragging(_) => "dragging",
            Capture::Resizing(_) => "resizing",
        }
    }

    /// Instance targeted by the gesture, if any.
    pub fn target(&self) -> Option<crate::types::InstanceId> {
        match self {
            Capture::Dragging(session) => Some(session.id),
            Capture::Resizing(session) => Some(session.id),
            Capture::Idle | Capture::Panning => None,
        }
    }
}

/// A pointer press as seen by the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// Screen position
    pub pos: egui::Pos2,
    /// Button pressed
    pub button: egui::PointerButton,
    /// Modifiers held at press time
    pub modifiers: egui::Modifiers,
}

/// Holder of the single active capture and the button that started it.
#[derive(Debug, Default)]
pub struct InputDispatch {
    capture: Capture,
    button: Option<egui::PointerButton>,
}

impl InputDispatch {
    /// Creates an idle dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current capture.
    pub fn capture(&self) -> Capture {
        self.capture
    }

    /// Returns `true` if nothing is captured.
    pub fn is_idle(&self) -> bool {
        self.capture == Capture::Idle
    }

    /// Button holding the active gesture.
    pub fn button(&self) -> Option<egui::PointerButton> {
        self.button
    }

    /// Installs `capture` started by `button`, returning the gesture it
    /// replaced if one was still active (its release was lost).
    pub fn begin(&mut self, capture: Capture, button: egui::PointerButton) -> Option<Capture> {
        self.button = Some(button);
        let stale = std::mem::replace(&mut self.capture, capture);
        (stale != Capture::Idle).then_some(stale)
    }

    /// Replaces the state of the active gesture after a step.
    pub fn update(&mut self, capture: Capture) {
        self.capture = capture;
    }

    /// Ends the active gesture and returns it.
    pub fn release(&mut self) -> Capture {
        self.button = None;
        std::mem::take(&mut self.capture)
    }

    /// Ends the active gesture if `button` is the one that started it.
    ///
    /// Releases of other buttons leave the gesture running and return `None`.
    pub fn release_button(&mut self, button: egui::PointerButton) -> Option<Capture> {
        (self.button == Some(button)).then(|| self.release())
    }
}
