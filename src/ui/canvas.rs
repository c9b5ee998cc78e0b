//! Canvas input handling.
//!
//! Raw pointer events are forwarded to the surface instead of going through
//! egui's per-widget interaction, so a gesture keeps following the pointer
//! after it leaves the canvas and is ended by a release anywhere in the window.

use super::state::EditorApp;
use crate::input::PointerPress;
use eframe::egui;

impl EditorApp {
    /// Allocates the canvas, feeds it the frame's pointer events and paints it.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        self.surface.layout(canvas_rect);
        self.handle_pointer_events(ui);
        self.update_cursor(ui);

        self.render_surface(ui, &painter, canvas_rect);
    }

    /// Translates this frame's pointer events into surface input.
    ///
    /// Presses only count inside the canvas (the surface checks); moves and
    /// releases are forwarded wherever they happen.
    pub fn handle_pointer_events(&mut self, ui: &egui::Ui) {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => self.surface.pointer_moved(pos),
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    modifiers,
                } => {
                    self.surface.pointer_pressed(PointerPress {
                        pos,
                        button,
                        modifiers,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: false,
                    ..
                } => self.surface.pointer_released(pos, button),
                _ => {}
            }
        }
    }

    fn update_cursor(&self, ui: &egui::Ui) {
        let cursor = ui
            .input(|i| i.pointer.hover_pos())
            .and_then(|pos| self.surface.cursor_at(pos));
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }
    }
}
