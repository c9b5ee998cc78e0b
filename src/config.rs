//! Editor settings persisted between sessions.
//!
//! Only UI preferences live here. Placed layouts are never saved.

use crate::constants::{MAX_REFRESH_HZ, SIDE_PANEL_WIDTH};
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Storage key under which the config is kept in `eframe::Storage`.
pub const CONFIG_STORAGE_KEY: &str = "editor_config";

/// Modifier that turns a primary-button press into a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanModifier {
    /// Alt/Option
    Alt,
    /// Cmd on macOS, Ctrl elsewhere
    Command,
}

impl PanModifier {
    /// Returns `true` if `modifiers` holds this modifier.
    pub fn is_held(self, modifiers: egui::Modifiers) -> bool {
        match self {
            PanModifier::Alt => modifiers.alt,
            PanModifier::Command => modifiers.command,
        }
    }
}

/// Which side of the window a side panel is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelSide {
    /// Left edge
    Left,
    /// Right edge
    Right,
}

/// Mount point for a side panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSlot {
    /// Window edge
    pub side: PanelSide,
    /// Remembered width
    pub width: f32,
}

/// Mount points for the navigator and inspector. A `None` slot means the panel
/// cannot be initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Project navigator and spawner
    pub navigator: Option<PanelSlot>,
    /// Property inspector
    pub inspector: Option<PanelSlot>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            navigator: Some(PanelSlot {
                side: PanelSide::Left,
                width: SIDE_PANEL_WIDTH,
            }),
            inspector: Some(PanelSlot {
                side: PanelSide::Right,
                width: SIDE_PANEL_WIDTH,
            }),
        }
    }
}

/// All persisted editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Modifier that, combined with the primary button, starts a pan
    pub pan_modifier: PanModifier,
    /// Whether the background grid is drawn
    pub show_grid: bool,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Side panel mounts
    pub panels: PanelConfig,
    /// Upper bound on redraws per second
    pub max_refresh_hz: f64,
    /// Preset used when spawning a `modular` widget
    pub modular_preset: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pan_modifier: PanModifier::Alt,
            show_grid: true,
            dark_mode: true,
            panels: PanelConfig::default(),
            max_refresh_hz: MAX_REFRESH_HZ,
            modular_preset: "empty".to_string(),
        }
    }
}

impl EditorConfig {
    /// Serialize the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads the config from eframe storage, falling back to defaults when the
    /// entry is missing or unreadable.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(json) = storage.and_then(|s| s.get_string(CONFIG_STORAGE_KEY)) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Ignoring unreadable editor config: {err}");
                Self::default()
            }
        }
    }
}
