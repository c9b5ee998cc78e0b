//! Project navigator: placed instances, mode switch and spawner.

use super::state::PanelUpdate;
use crate::config::PanelSlot;
use crate::error::LayoutError;
use crate::types::*;
use crate::widgets::WidgetCatalog;
use eframe::egui;

/// Command issued from the navigator, applied by the app after the panel is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigatorAction {
    /// Select an instance
    Select(InstanceId),
    /// Delete an instance
    Delete(InstanceId),
    /// Spawn a widget of the given type
    Spawn(String),
    /// Switch mode
    SetMode(Mode),
}

/// List of placed instances kept in sync with the surface.
#[derive(Debug, Clone)]
pub struct Navigator {
    slot: PanelSlot,
    entries: Vec<InstanceSummary>,
    selected: Option<InstanceId>,
    mode: Mode,
}

impl Navigator {
    /// Mounts the navigator at `slot`.
    pub fn mount(slot: Option<PanelSlot>) -> Result<Self, LayoutError> {
        let slot = slot.ok_or(LayoutError::MissingCollaborator("navigator"))?;
        Ok(Self {
            slot,
            entries: Vec::new(),
            selected: None,
            mode: Mode::default(),
        })
    }

    /// Where the panel is mounted.
    pub fn slot(&self) -> PanelSlot {
        self.slot
    }

    /// Remembers the panel width the user dragged to.
    pub fn set_width(&mut self, width: f32) {
        self.slot.width = width;
    }

    /// Listed instances, in spawn order.
    pub fn entries(&self) -> &[InstanceSummary] {
        &self.entries
    }

    /// Highlighted entry.
    pub fn selected(&self) -> Option<InstanceId> {
        self.selected
    }

    /// Highlighted mode button.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Updates the projection from a surface notification.
    pub fn apply(&mut self, update: &PanelUpdate) {
        match update {
            PanelUpdate::Registry(snapshot) => {
                self.entries = snapshot.clone();
                if self
                    .selected
                    .is_some_and(|id| !self.entries.iter().any(|e| e.id == id))
                {
                    self.selected = None;
                }
            }
            PanelUpdate::Selection(selected) => self.selected = *selected,
            PanelUpdate::Mode(mode) => self.mode = *mode,
        }
    }

    /// Draws the panel and returns what the user asked for.
    pub fn ui(&mut self, ui: &mut egui::Ui, catalog: &WidgetCatalog) -> Vec<NavigatorAction> {
        let mut actions = Vec::new();

        ui.heading("Project");
        ui.horizontal(|ui| {
            for mode in [Mode::Edit, Mode::Play] {
                if ui.selectable_label(self.mode == mode, mode.label()).clicked() {
                    actions.push(NavigatorAction::SetMode(mode));
                }
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("navigator_entries")
            .max_height(ui.available_height() * 0.6)
            .show(ui, |ui| {
                if self.entries.is_empty() {
                    ui.weak("No components placed");
                }
                for entry in &self.entries {
                    ui.horizontal(|ui| {
                        let is_selected = self.selected == Some(entry.id);
                        if ui.selectable_label(is_selected, entry_label(entry)).clicked() {
                            actions.push(NavigatorAction::Select(entry.id));
                        }
                        if ui.small_button("✕").on_hover_text("Delete").clicked() {
                            actions.push(NavigatorAction::Delete(entry.id));
                        }
                    });
                }
            });

        ui.separator();
        for group in catalog.groups() {
            ui.label(egui::RichText::new(&group).strong());
            ui.horizontal_wrapped(|ui| {
                for entry in catalog.entries_in(&group) {
                    if ui.button(&entry.label).clicked() {
                        actions.push(NavigatorAction::Spawn(entry.kind.clone()));
                    }
                }
            });
        }

        actions
    }
}

/// `kind (short id)`, enough to tell two instances of one type apart.
fn entry_label(entry: &InstanceSummary) -> String {
    let id = entry.id.simple().to_string();
    format!("{} ({})", entry.kind, &id[..8])
}
