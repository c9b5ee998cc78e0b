//! Drawing the surface: grid, placed widgets, selection outline and handles.

use super::state::EditorApp;
use crate::constants::{GRID_STROKE_WIDTH, SELECTION_STROKE_WIDTH};
use crate::interaction::handle_rect;
use crate::types::*;
use eframe::egui;
use egui::StrokeKind;

/// Height of the title strip drawn above each widget.
const TITLE_HEIGHT: f32 = 18.0;

impl EditorApp {
    /// Paints everything inside `canvas_rect`.
    ///
    /// Instances are painted in paint order, so the selected one ends up on top.
    pub fn render_surface(
        &mut self,
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
    ) {
        painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);
        if self.config.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        let selected = self.surface.selected();
        for id in self.surface.registry().paint_order() {
            let Some(screen_rect) = self.surface.screen_rect(id) else {
                continue;
            };
            self.draw_instance(ui, canvas_rect, id, screen_rect);
            if selected == Some(id) {
                self.draw_selection(ui, canvas_rect, screen_rect);
            }
            let resizable = self
                .surface
                .registry()
                .get(id)
                .is_some_and(|i| i.flags.resizable);
            if resizable {
                self.draw_handles(ui, canvas_rect, screen_rect, selected == Some(id));
            }
        }
    }

    /// Draws the background grid.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let grid_color = egui::Color32::from_rgba_unmultiplied(128, 128, 128, 48);
        let stroke = egui::Stroke::new(GRID_STROKE_WIDTH, grid_color);
        self.surface.viewport().render(painter, canvas_rect, stroke);
    }

    /// Frame, title strip and live widget contents of one instance.
    fn draw_instance(
        &mut self,
        ui: &mut egui::Ui,
        canvas_rect: egui::Rect,
        id: InstanceId,
        screen_rect: egui::Rect,
    ) {
        let visuals = ui.visuals().clone();
        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(screen_rect, 4.0, visuals.window_fill);
        painter.rect_stroke(
            screen_rect,
            4.0,
            visuals.window_stroke,
            StrokeKind::Inside,
        );

        let Some(instance) = self.surface.registry_mut().get_mut(id) else {
            return;
        };

        let title_rect =
            egui::Rect::from_min_size(screen_rect.min, egui::vec2(screen_rect.width(), TITLE_HEIGHT));
        let title = instance.widget().title().unwrap_or(instance.kind.as_str()).to_string();
        painter.text(
            title_rect.left_center() + egui::vec2(6.0, 0.0),
            egui::Align2::LEFT_CENTER,
            title,
            egui::FontId::proportional(12.0),
            visuals.weak_text_color(),
        );

        let content_rect = egui::Rect::from_min_max(
            egui::pos2(screen_rect.min.x, title_rect.max.y),
            screen_rect.max,
        )
        .shrink(6.0);
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .id_salt(id)
                .max_rect(content_rect)
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        child.set_clip_rect(content_rect.intersect(canvas_rect));
        if !instance.flags.widget_enabled {
            child.disable();
        }
        instance.widget_mut().ui(&mut child);
    }

    fn draw_selection(&self, ui: &egui::Ui, canvas_rect: egui::Rect, screen_rect: egui::Rect) {
        let painter = ui.painter_at(canvas_rect);
        let accent = ui.visuals().selection.stroke.color;
        painter.rect_stroke(
            screen_rect,
            4.0,
            egui::Stroke::new(SELECTION_STROKE_WIDTH, accent),
            StrokeKind::Outside,
        );
    }

    /// The eight resize handles; accented on the selected instance.
    fn draw_handles(
        &self,
        ui: &egui::Ui,
        canvas_rect: egui::Rect,
        screen_rect: egui::Rect,
        is_selected: bool,
    ) {
        let painter = ui.painter_at(canvas_rect);
        let color = if is_selected {
            ui.visuals().selection.stroke.color
        } else {
            ui.visuals().widgets.noninteractive.fg_stroke.color
        };
        for handle in ResizeHandle::ALL {
            let rect = handle_rect(handle, screen_rect);
            painter.rect_filled(rect, 1.0, ui.visuals().extreme_bg_color);
            painter.rect_stroke(rect, 1.0, egui::Stroke::new(1.0, color), StrokeKind::Inside);
        }
    }
}
