//! Property inspector for the selected instance.

use super::state::PanelUpdate;
use crate::config::PanelSlot;
use crate::constants::MIN_SIZE;
use crate::error::LayoutError;
use crate::types::*;
use eframe::egui;

/// One editable geometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryField {
    /// Left edge
    X,
    /// Top edge
    Y,
    /// Width
    Width,
    /// Height
    Height,
}

impl GeometryField {
    /// Fields in display order.
    pub const ALL: [GeometryField; 4] = [
        GeometryField::X,
        GeometryField::Y,
        GeometryField::Width,
        GeometryField::Height,
    ];

    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            GeometryField::X => "X",
            GeometryField::Y => "Y",
            GeometryField::Width => "Width",
            GeometryField::Height => "Height",
        }
    }

    /// Current value of the field in `geometry`.
    pub fn get(self, geometry: &Geometry) -> f32 {
        match self {
            GeometryField::X => geometry.x,
            GeometryField::Y => geometry.y,
            GeometryField::Width => geometry.width,
            GeometryField::Height => geometry.height,
        }
    }

    /// Patch writing `value` to this field only.
    pub fn patch(self, value: f32) -> GeometryPatch {
        match self {
            GeometryField::X => GeometryPatch::x(value),
            GeometryField::Y => GeometryPatch::y(value),
            GeometryField::Width => GeometryPatch::width(value),
            GeometryField::Height => GeometryPatch::height(value),
        }
    }

    fn is_size(self) -> bool {
        matches!(self, GeometryField::Width | GeometryField::Height)
    }
}

/// Shows and edits the geometry of the selected instance.
#[derive(Debug, Clone)]
pub struct Inspector {
    slot: PanelSlot,
    snapshot: Vec<InstanceSummary>,
    selected: Option<InstanceId>,
    mode: Mode,
}

impl Inspector {
    /// Mounts the inspector at `slot`.
    pub fn mount(slot: Option<PanelSlot>) -> Result<Self, LayoutError> {
        let slot = slot.ok_or(LayoutError::MissingCollaborator("inspector"))?;
        Ok(Self {
            slot,
            snapshot: Vec::new(),
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

    /// Mode the fields are shown for.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The instance being inspected, as last reported.
    pub fn target(&self) -> Option<&InstanceSummary> {
        let id = self.selected?;
        self.snapshot.iter().find(|s| s.id == id)
    }

    /// Updates the projection from a surface notification.
    pub fn apply(&mut self, update: &PanelUpdate) {
        match update {
            PanelUpdate::Registry(snapshot) => self.snapshot = snapshot.clone(),
            PanelUpdate::Selection(selected) => self.selected = *selected,
            PanelUpdate::Mode(mode) => self.mode = *mode,
        }
    }

    /// Draws the panel. Returns the edit to commit, if the user changed a field.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<(InstanceId, GeometryPatch)> {
        ui.heading("Inspector");
        ui.separator();

        let Some(target) = self.target().cloned() else {
            ui.weak("Nothing selected");
            return None;
        };

        ui.label(format!("Type: {}", target.kind));
        ui.label(egui::RichText::new(target.id.to_string()).small().weak());
        ui.add_space(4.0);

        let editable = self.mode == Mode::Edit;
        let mut edit = None;
        egui::Grid::new("inspector_geometry")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                for field in GeometryField::ALL {
                    ui.label(field.label());
                    let mut value = field.get(&target.geometry);
                    let mut drag = egui::DragValue::new(&mut value).speed(1.0);
                    if field.is_size() {
                        drag = drag.range(MIN_SIZE..=f32::MAX);
                    }
                    if ui.add_enabled(editable, drag).changed() {
                        edit = Some((target.id, field.patch(value)));
                    }
                    ui.end_row();
                }
            });

        if !editable {
            ui.add_space(4.0);
            ui.weak("Layout is frozen in play mode");
        }
        edit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSide;
    use uuid::Uuid;

    fn inspector() -> Inspector {
        Inspector::mount(Some(PanelSlot {
            side: PanelSide::Right,
            width: 250.0,
        }))
        .unwrap()
    }

    #[test]
    fn test_mount_without_slot_fails() {
        assert_eq!(
            Inspector::mount(None).unwrap_err(),
            LayoutError::MissingCollaborator("inspector")
        );
    }

    #[test]
    fn test_target_tracks_latest_geometry() {
        let mut inspector = inspector();
        let id = Uuid::new_v4();
        let summary = |x: f32| InstanceSummary {
            id,
            kind: "meters".to_string(),
            geometry: Geometry::new(x, 50.0, 300.0, 200.0),
        };
        inspector.apply(&PanelUpdate::Registry(vec![summary(50.0)]));
        inspector.apply(&PanelUpdate::Selection(Some(id)));

        inspector.apply(&PanelUpdate::Registry(vec![summary(75.0)]));

        assert_eq!(inspector.target().map(|t| t.geometry.x), Some(75.0));
    }

    #[test]
    fn test_target_gone_after_removal() {
        let mut inspector = inspector();
        let id = Uuid::new_v4();
        inspector.apply(&PanelUpdate::Registry(vec![InstanceSummary {
            id,
            kind: "infopane".to_string(),
            geometry: Geometry::new(0.0, 0.0, 100.0, 100.0),
        }]));
        inspector.apply(&PanelUpdate::Selection(Some(id)));

        inspector.apply(&PanelUpdate::Registry(Vec::new()));

        assert!(inspector.target().is_none());
    }

    #[test]
    fn test_field_patches_touch_one_value() {
        let geometry = Geometry::new(1.0, 2.0, 300.0, 200.0);

        for field in GeometryField::ALL {
            let patched = field.patch(500.0).apply_to(geometry);
            assert_eq!(field.get(&patched), 500.0);
            let untouched = GeometryField::ALL.into_iter().filter(|f| *f != field);
            for other in untouched {
                assert_eq!(other.get(&patched), other.get(&geometry));
            }
        }
    }
}
