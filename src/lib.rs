//! # Patch Canvas
//!
//! A visual layout editor for audio-style control panels. Widgets are placed
//! on a pannable, grid-backed surface and laid out by dragging and resizing:
//! - **Edit mode**: move, resize and select placed widgets; the widgets are inert
//! - **Play mode**: the layout is frozen and the widgets themselves are live
//!
//! ## Features
//! - Background panning with a windowed grid
//! - Eight-handle resizing with a minimum size floor
//! - Project navigator and property inspector kept in sync with the selection
//! - Built-in widget catalog plus preset-driven modular widgets

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod input;
pub mod interaction;
pub mod mode;
pub mod redraw;
pub mod registry;
pub mod surface;
pub mod types;
pub mod viewport;
pub mod widgets;
mod ui;

// Re-export the main entry points
pub use config::EditorConfig;
pub use error::LayoutError;
pub use surface::LayoutSurface;
pub use types::*;
pub use ui::EditorApp;

/// Runs the editor with the settings saved by the previous session.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     patch_canvas::run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Patch Canvas",
        options,
        Box::new(|cc| Ok(Box::new(EditorApp::from_creation_context(cc)))),
    )
}
