//! Placement registry: the single source of truth for placed instances.
//!
//! The registry owns every widget handle. Removing an entry drops its handle,
//! so nothing outside the registry can keep a widget alive past `delete`.

use crate::constants::{MIN_SIZE, SPAWN_HEIGHT, SPAWN_WIDTH, SPAWN_X, SPAWN_Y};
use crate::error::LayoutError;
use crate::types::*;
use crate::widgets::Widget;
use eframe::egui;
use uuid::Uuid;

/// One widget placed on the surface.
pub struct PlacedInstance {
    /// Unique identifier
    pub id: InstanceId,
    /// Widget type name
    pub kind: String,
    /// Surface-local geometry
    pub geometry: Geometry,
    /// Interactivity derived from the current mode
    pub flags: InstanceFlags,
    handle: Box<dyn Widget>,
}

impl std::fmt::Debug for PlacedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedInstance")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("geometry", &self.geometry)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl PlacedInstance {
    /// The owned widget.
    pub fn widget(&self) -> &dyn Widget {
        &*self.handle
    }

    /// The owned widget, mutably.
    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.handle.as_mut()
    }

    /// Tells the widget its size changed, if it cares.
    pub fn notify_resized(&mut self) {
        let size = egui::vec2(self.geometry.width, self.geometry.height);
        if let Some(resizable) = self.handle.as_resizable() {
            resizable.resize(size);
        }
    }

    /// Read-only view for observers.
    pub fn summary(&self) -> InstanceSummary {
        InstanceSummary {
            id: self.id,
            kind: self.kind.clone(),
            geometry: self.geometry,
        }
    }
}

/// What `delete` removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    /// Id of the removed instance
    pub id: InstanceId,
    /// Its type name
    pub kind: String,
    /// Whether the selection pointed at it (and was cleared)
    pub was_selected: bool,
}

/// All placed instances in spawn order, plus the selection.
#[derive(Debug, Default)]
pub struct PlacementRegistry {
    instances: Vec<PlacedInstance>,
    selected: Option<InstanceId>,
}

impl PlacementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new widget built by `constructor`.
    ///
    /// The default position compensates for `pan_offset` so new instances
    /// always appear at the same spot on screen.
    pub fn spawn(
        &mut self,
        kind: &str,
        constructor: &dyn Fn() -> Box<dyn Widget>,
        pan_offset: egui::Vec2,
    ) -> InstanceId {
        let id = Uuid::new_v4();
        let mut instance = PlacedInstance {
            id,
            kind: kind.to_string(),
            geometry: Geometry::new(
                SPAWN_X - pan_offset.x,
                SPAWN_Y - pan_offset.y,
                SPAWN_WIDTH,
                SPAWN_HEIGHT,
            ),
            flags: InstanceFlags::default(),
            handle: constructor(),
        };
        instance.notify_resized();
        self.instances.push(instance);
        id
    }

    /// Removes an instance and drops its widget.
    ///
    /// The selection is cleared before the entry goes away. Returns `None`
    /// if `id` is unknown.
    pub fn delete(&mut self, id: InstanceId) -> Option<Removed> {
        let index = self.index_of(id)?;
        let was_selected = self.selected == Some(id);
        if was_selected {
            self.selected = None;
        }
        let instance = self.instances.remove(index);
        let removed = Removed {
            id,
            kind: instance.kind.clone(),
            was_selected,
        };
        drop(instance);
        Some(removed)
    }

    /// Shifts every instance by `(dx, dy)` so they stay pinned to the grid while panning.
    pub fn apply_pan_delta(&mut self, dx: f32, dy: f32) {
        for instance in &mut self.instances {
            instance.geometry.x += dx;
            instance.geometry.y += dy;
        }
    }

    /// Selects `id`. Unknown ids are ignored.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: InstanceId) -> bool {
        if !self.contains(id) || self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clears the selection. Returns `true` if something was selected.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Currently selected instance, if any.
    pub fn selected(&self) -> Option<InstanceId> {
        self.selected
    }

    /// Returns `true` if `id` is placed.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.index_of(id).is_some()
    }

    /// Looks up an instance.
    pub fn get(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    /// Looks up an instance mutably.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut PlacedInstance> {
        self.instances.iter_mut().find(|i| i.id == id)
    }

    /// Geometry of `id`.
    pub fn geometry(&self, id: InstanceId) -> Option<Geometry> {
        self.get(id).map(|i| i.geometry)
    }

    /// Applies `patch` to `id`, flooring width and height at the minimum size.
    ///
    /// When the size changes the widget's resize hook runs. Returns the
    /// committed geometry.
    pub fn set_geometry(
        &mut self,
        id: InstanceId,
        patch: GeometryPatch,
    ) -> Result<Geometry, LayoutError> {
        let instance = self.get_mut(id).ok_or(LayoutError::UnknownInstance(id))?;
        let before = instance.geometry;
        instance.geometry = patch.apply_to(before).clamped_size(MIN_SIZE);
        if instance.geometry.width != before.width || instance.geometry.height != before.height {
            instance.notify_resized();
        }
        Ok(instance.geometry)
    }

    /// Moves `id` by `delta` without touching its size.
    pub fn translate(&mut self, id: InstanceId, delta: egui::Vec2) -> bool {
        match self.get_mut(id) {
            Some(instance) => {
                instance.geometry.x += delta.x;
                instance.geometry.y += delta.y;
                true
            }
            None => false,
        }
    }

    /// Instances in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.iter()
    }

    /// Instances in spawn order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedInstance> {
        self.instances.iter_mut()
    }

    /// Number of placed instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Snapshot handed to "registry changed" observers.
    pub fn snapshot(&self) -> Vec<InstanceSummary> {
        self.instances.iter().map(PlacedInstance::summary).collect()
    }

    /// Ids in paint order: spawn order, with the selected instance last (on top).
    pub fn paint_order(&self) -> Vec<InstanceId> {
        let mut order: Vec<InstanceId> = self
            .instances
            .iter()
            .map(|i| i.id)
            .filter(|id| Some(*id) != self.selected)
            .collect();
        if let Some(selected) = self.selected {
            order.push(selected);
        }
        order
    }

    /// Topmost instance containing the surface-local `point`.
    pub fn hit_test(&self, point: egui::Pos2) -> Option<InstanceId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|id| self.get(*id).is_some_and(|i| i.geometry.contains(point)))
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|i| i.id == id)
    }
}
