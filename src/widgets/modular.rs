//! Parameter-driven widget assembled from a named preset.

use super::{Interactivity, Widget};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// A single adjustable value exposed by a modular widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Display name, unique within a preset
    pub name: String,
    /// Starting value
    pub default_value: f32,
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl Parameter {
    /// Creates a parameter, swapping `min`/`max` if given in the wrong order.
    pub fn new(name: &str, default_value: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            name: name.to_string(),
            default_value: default_value.clamp(min, max),
            min,
            max,
        }
    }
}

/// A named template for a modular widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Human readable name
    pub name: String,
    /// Parameters in display order
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// Registered presets, keyed by id in registration order.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    presets: Vec<(String, Preset)>,
}

impl PresetLibrary {
    /// Id of the preset every unknown id falls back to.
    pub const EMPTY: &'static str = "empty";

    /// Library with the built-in presets.
    pub fn builtin() -> Self {
        let mut library = Self::default();
        library.register(
            Self::EMPTY,
            Preset {
                name: "Empty Component".to_string(),
                parameters: Vec::new(),
            },
        );
        library.register(
            "mixer",
            Preset {
                name: "Mixer Strip".to_string(),
                parameters: vec![
                    Parameter::new("Gain", 0.0, -60.0, 12.0),
                    Parameter::new("Pan", 0.0, -1.0, 1.0),
                    Parameter::new("Send", 0.0, 0.0, 1.0),
                ],
            },
        );
        library
    }

    /// Adds or replaces the preset stored under `id`.
    pub fn register(&mut self, id: &str, preset: Preset) {
        if let Some(slot) = self.presets.iter_mut().find(|(k, _)| k == id) {
            slot.1 = preset;
        } else {
            self.presets.push((id.to_string(), preset));
        }
    }

    /// `(id, name)` pairs of all presets.
    pub fn available(&self) -> Vec<(String, String)> {
        self.presets
            .iter()
            .map(|(id, p)| (id.clone(), p.name.clone()))
            .collect()
    }

    /// Looks up a preset by id.
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|(k, _)| k == id).map(|(_, p)| p)
    }

    /// Builds a widget from preset `id`, falling back to the empty preset.
    pub fn build(&self, id: &str) -> ModularWidget {
        match self.get(id) {
            Some(preset) => ModularWidget::from_preset(preset),
            None => {
                log::warn!("Unknown preset '{id}', using '{}'", Self::EMPTY);
                self.get(Self::EMPTY)
                    .map(ModularWidget::from_preset)
                    .unwrap_or_default()
            }
        }
    }
}

/// Widget showing one slider per preset parameter.
#[derive(Debug, Clone, Default)]
pub struct ModularWidget {
    title: String,
    parameters: Vec<Parameter>,
    values: Vec<f32>,
    enabled: bool,
}

impl ModularWidget {
    /// Creates a widget with the preset's parameters at their defaults.
    pub fn from_preset(preset: &Preset) -> Self {
        Self {
            title: preset.name.clone(),
            parameters: preset.parameters.clone(),
            values: preset.parameters.iter().map(|p| p.default_value).collect(),
            enabled: true,
        }
    }

    /// Current value of parameter `name`.
    pub fn parameter(&self, name: &str) -> Option<f32> {
        self.index_of(name).map(|i| self.values[i])
    }

    /// Sets parameter `name`, clamped to its range. Returns `false` for unknown names.
    pub fn set_parameter(&mut self, name: &str, value: f32) -> bool {
        match self.index_of(name) {
            Some(i) => {
                let p = &self.parameters[i];
                self.values[i] = value.clamp(p.min, p.max);
                true
            }
            None => false,
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }
}

impl Widget for ModularWidget {
    fn kind(&self) -> &str {
        "modular"
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        if self.parameters.is_empty() {
            ui.weak("No parameters");
            return;
        }
        ui.add_enabled_ui(self.enabled, |ui| {
            for (param, value) in self.parameters.iter().zip(self.values.iter_mut()) {
                ui.add(egui::Slider::new(value, param.min..=param.max).text(&param.name));
            }
        });
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn as_interactivity(&mut self) -> Option<&mut dyn Interactivity> {
        Some(self)
    }
}

impl Interactivity for ModularWidget {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_known_preset() {
        let library = PresetLibrary::builtin();

        let widget = library.build("mixer");

        assert_eq!(widget.parameter("Gain"), Some(0.0));
        assert_eq!(widget.parameter("Pan"), Some(0.0));
        assert_eq!(widget.parameter("Missing"), None);
    }

    #[test]
    fn test_unknown_preset_falls_back_to_empty() {
        let library = PresetLibrary::builtin();

        let widget = library.build("does-not-exist");

        assert_eq!(widget.title, "Empty Component");
        assert!(widget.parameters.is_empty());
    }

    #[test]
    fn test_set_parameter_clamps_to_range() {
        let mut widget = PresetLibrary::builtin().build("mixer");

        assert!(widget.set_parameter("Pan", 3.0));
        assert_eq!(widget.parameter("Pan"), Some(1.0));
        assert!(!widget.set_parameter("Missing", 0.5));
    }

    #[test]
    fn test_parameter_bounds_are_ordered() {
        let param = Parameter::new("Level", 5.0, 1.0, -1.0);

        assert_eq!((param.min, param.max), (-1.0, 1.0));
        assert_eq!(param.default_value, 1.0);
    }

    #[test]
    fn test_available_lists_registration_order() {
        let ids: Vec<String> = PresetLibrary::builtin()
            .available()
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        assert_eq!(ids, vec!["empty", "mixer"]);
    }
}
