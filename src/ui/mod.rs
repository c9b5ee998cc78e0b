//! User interface for the layout editor.
//!
//! This module contains the eframe application, the canvas that hosts the
//! layout surface and the two side panels kept in sync with it.
//!
//! # Module Organization
//!
//! - `state` - The main EditorApp and the panel notification channel
//! - `canvas` - Pointer event forwarding into the surface
//! - `rendering` - Drawing the grid, placed widgets, selection and handles
//! - `navigator` - Instance list, mode switch and spawner
//! - `inspector` - Geometry fields for the selected instance

mod canvas;
mod inspector;
mod navigator;
mod rendering;
mod state;

pub use inspector::{GeometryField, Inspector};
pub use navigator::{Navigator, NavigatorAction};
pub use state::{EditorApp, PanelUpdate};

use crate::config::{PanModifier, PanelSide, PanelSlot, CONFIG_STORAGE_KEY};
use crate::redraw::Redraw;
use crate::types::*;
use eframe::egui;
use std::time::Duration;

impl eframe::App for EditorApp {
    /// Persist UI preferences between restarts. Layouts are not saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_config();
        match self.config.to_json() {
            Ok(json) => storage.set_string(CONFIG_STORAGE_KEY, json),
            Err(err) => log::error!("Failed to serialize editor config: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl EditorApp {
    /// Lays out and handles one frame: toolbar, side panels, canvas.
    pub fn show(&mut self, ctx: &egui::Context) {
        let visuals = if self.config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.drain_panel_updates();
        self.handle_delete_key(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        self.draw_navigator(ctx);
        self.draw_inspector(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        self.schedule_repaint(ctx);
    }

    /// Applies a navigator command to the surface.
    pub fn apply_navigator_action(&mut self, action: NavigatorAction) {
        match action {
            NavigatorAction::Select(id) => {
                self.surface.select(id);
            }
            NavigatorAction::Delete(id) => {
                self.surface.delete(id);
            }
            NavigatorAction::Spawn(kind) => {
                self.surface.spawn(&kind);
            }
            NavigatorAction::SetMode(mode) => self.surface.set_mode(mode),
        }
    }

    /// Commits an inspector edit; rejected edits are logged and dropped.
    pub fn apply_inspector_edit(&mut self, id: InstanceId, patch: GeometryPatch) {
        if let Err(err) = self.surface.set_geometry(id, patch) {
            log::warn!("Inspector edit rejected: {err}");
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("Mode: {}", self.surface.mode().label()));
            ui.separator();

            ui.checkbox(&mut self.config.show_grid, "Show Grid");
            ui.separator();
            ui.checkbox(&mut self.config.dark_mode, "Dark Mode");
            ui.separator();

            let before = self.config.pan_modifier;
            egui::ComboBox::from_id_salt("pan_modifier_combo")
                .selected_text(pan_modifier_label(self.config.pan_modifier))
                .show_ui(ui, |ui| {
                    for modifier in [PanModifier::Alt, PanModifier::Command] {
                        ui.selectable_value(
                            &mut self.config.pan_modifier,
                            modifier,
                            pan_modifier_label(modifier),
                        );
                    }
                });
            if self.config.pan_modifier != before {
                self.surface.set_pan_modifier(self.config.pan_modifier);
            }
            ui.separator();

            let mut chosen = None;
            let current = self
                .presets
                .get(&self.config.modular_preset)
                .map_or(self.config.modular_preset.as_str(), |p| p.name.as_str());
            egui::ComboBox::from_id_salt("modular_preset_combo")
                .selected_text(format!("Preset: {current}"))
                .show_ui(ui, |ui| {
                    for (id, name) in self.presets.available() {
                        let selected = id == self.config.modular_preset;
                        if ui.selectable_label(selected, name).clicked() && !selected {
                            chosen = Some(id);
                        }
                    }
                });
            if let Some(id) = chosen {
                self.set_modular_preset(&id);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let offset = self.surface.viewport().pan_offset();
                ui.label(format!("Pan: {:.0}, {:.0}", offset.x, offset.y));
                ui.label(format!("Components: {}", self.surface.registry().len()));
            });
        });
    }

    fn draw_navigator(&mut self, ctx: &egui::Context) {
        let Some(navigator) = self.navigator.as_mut() else {
            return;
        };
        let slot = navigator.slot();
        let catalog = self.surface.catalog();
        let mut actions = Vec::new();
        side_panel("navigator_panel", slot, ctx).show(ctx, |ui| {
            navigator.set_width(ui.available_width());
            actions = navigator.ui(ui, catalog);
        });
        for action in actions {
            self.apply_navigator_action(action);
        }
    }

    fn draw_inspector(&mut self, ctx: &egui::Context) {
        let Some(inspector) = self.inspector.as_mut() else {
            return;
        };
        let slot = inspector.slot();
        let mut edit = None;
        side_panel("inspector_panel", slot, ctx).show(ctx, |ui| {
            inspector.set_width(ui.available_width());
            edit = inspector.ui(ui);
        });
        if let Some((id, patch)) = edit {
            self.apply_inspector_edit(id, patch);
        }
    }

    /// Delete removes the selected instance in edit mode, unless a text field has focus.
    fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if self.surface.mode() != Mode::Edit || ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            if let Some(id) = self.surface.selected() {
                self.surface.delete(id);
            }
        }
    }

    fn schedule_repaint(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        match self.surface.poll_redraw(now) {
            Redraw::Now => ctx.request_repaint(),
            Redraw::After(seconds) => ctx.request_repaint_after(Duration::from_secs_f64(seconds)),
            Redraw::Idle => {}
        }
    }
}

/// Side panel at `slot`, width clamped to the window.
fn side_panel(id: &'static str, slot: PanelSlot, ctx: &egui::Context) -> egui::SidePanel {
    let viewport_width = ctx.input(|i| i.content_rect().width());
    let max_width = (viewport_width * 0.4).max(160.0);
    let panel = match slot.side {
        PanelSide::Left => egui::SidePanel::left(id),
        PanelSide::Right => egui::SidePanel::right(id),
    };
    panel
        .resizable(true)
        .default_width(slot.width.clamp(160.0, max_width))
        .width_range(160.0..=max_width)
}

fn pan_modifier_label(modifier: PanModifier) -> &'static str {
    match modifier {
        PanModifier::Alt => "Pan: Alt + drag",
        PanModifier::Command => "Pan: Cmd/Ctrl + drag",
    }
}

// Test module for headless egui-driven UI unit tests.
#[cfg(test)]
mod tests;
