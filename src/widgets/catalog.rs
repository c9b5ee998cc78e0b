//! Type catalog mapping widget type names to constructors.

use super::builtin::{ButtonGrid, InfoPane, Meters, Sliders, Waveform};
use super::modular::PresetLibrary;
use super::Widget;
use crate::constants::CORE_GROUP;
use crate::error::LayoutError;
use std::rc::Rc;

/// Builds a fresh widget handle.
pub type Constructor = Rc<dyn Fn() -> Box<dyn Widget>>;

/// One registered widget type.
#[derive(Clone)]
pub struct CatalogEntry {
    /// Type name used by `spawn`
    pub kind: String,
    /// Group the spawner lists it under
    pub group: String,
    /// Human readable name for buttons
    pub label: String,
    constructor: Constructor,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("kind", &self.kind)
            .field("group", &self.group)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Registry of spawnable widget types, in registration order.
#[derive(Default, Clone, Debug)]
pub struct WidgetCatalog {
    entries: Vec<CatalogEntry>,
}

impl WidgetCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with all built-in widgets in the `core` group. Modular widgets
    /// are built from `modular_preset` in `presets`.
    pub fn builtin(presets: PresetLibrary, modular_preset: &str) -> Self {
        let mut catalog = Self::new();
        catalog.register("waveform", CORE_GROUP, "Waveform", || {
            Box::new(Waveform::new())
        });
        catalog.register("meters", CORE_GROUP, "Meters", || Box::new(Meters::new()));
        catalog.register("buttongrid", CORE_GROUP, "ButtonGrid", || {
            Box::new(ButtonGrid::new())
        });
        catalog.register("sliders", CORE_GROUP, "Sliders", || {
            Box::new(Sliders::new())
        });
        catalog.register("infopane", CORE_GROUP, "InfoPane", || {
            Box::new(InfoPane::new())
        });

        catalog.register_modular(presets, modular_preset);
        catalog
    }

    /// (Re)registers the `modular` type so new instances are built from `preset`.
    pub fn register_modular(&mut self, presets: PresetLibrary, preset: &str) {
        let preset = preset.to_string();
        self.register("modular", CORE_GROUP, "ModularComponent", move || {
            Box::new(presets.build(&preset))
        });
    }

    /// Registers `constructor` under `kind`, replacing any earlier entry of the same kind.
    pub fn register<F>(&mut self, kind: &str, group: &str, label: &str, constructor: F)
    where
        F: Fn() -> Box<dyn Widget> + 'static,
    {
        let entry = CatalogEntry {
            kind: kind.to_string(),
            group: group.to_string(),
            label: label.to_string(),
            constructor: Rc::new(constructor),
        };
        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == kind) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        log::debug!("Registered component: {kind}");
    }

    /// Type names registered in `group`, in registration order.
    pub fn list_spawnable(&self, group: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.group == group)
            .map(|e| e.kind.clone())
            .collect()
    }

    /// Entries registered in `group`, for building spawner buttons.
    pub fn entries_in<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| e.group == group)
    }

    /// Distinct group names in first-registration order.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !groups.contains(&entry.group) {
                groups.push(entry.group.clone());
            }
        }
        groups
    }

    /// Constructor for `kind`.
    pub fn lookup(&self, kind: &str) -> Result<Constructor, LayoutError> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.constructor))
            .ok_or_else(|| LayoutError::UnknownType(kind.to_string()))
    }
}
