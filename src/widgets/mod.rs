//! Widgets that can be placed on the layout surface.
//!
//! The surface only relies on the [`Widget`] trait. Resizing and interactivity
//! are optional capabilities: a widget opts in by returning `Some` from
//! [`Widget::as_resizable`] or [`Widget::as_interactivity`], and the surface
//! skips the call silently for widgets that don't.

mod builtin;
mod catalog;
mod modular;
#[cfg(test)]
pub(crate) mod testing;

pub use builtin::{ButtonGrid, InfoPane, Meters, Sliders, Waveform};
pub use catalog::{CatalogEntry, Constructor, WidgetCatalog};
pub use modular::{ModularWidget, Parameter, Preset, PresetLibrary};

use eframe::egui;

/// A live widget occupying one placed instance.
pub trait Widget {
    /// Type name the widget was constructed from.
    fn kind(&self) -> &str;

    /// Draws the widget into `ui`, whose max rect is the instance's content area on screen.
    fn ui(&mut self, ui: &mut egui::Ui);

    /// Name for the instance's title strip; the type name is used when `None`.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Rescaling capability for widgets that render to a fixed-resolution buffer.
    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        None
    }

    /// Capability for widgets whose own pointer handling can be switched off.
    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        None
    }
}

/// Widgets that must be told when their placed size changes.
pub trait Resizable {
    /// Called after every committed size change with the new size in pixels.
    fn resize(&mut self, size: egui::Vec2);
}

/// Widgets whose pointer handling can be switched on and off.
pub trait Interactivity {
    /// Enables (play mode) or disables (edit mode) the widget's own input handling.
    fn set_enabled(&mut self, enabled: bool);
}
