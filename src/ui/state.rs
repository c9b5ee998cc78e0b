//! Application state.
//!
//! The app owns the layout surface and the two side panels. Panels never read
//! the surface directly: the surface's notifications are forwarded through a
//! channel and drained once per frame, so each panel is a projection of what
//! it has been told.

use super::inspector::Inspector;
use super::navigator::Navigator;
use crate::config::EditorConfig;
use crate::surface::LayoutSurface;
use crate::types::*;
use crate::widgets::{PresetLibrary, WidgetCatalog};
use std::sync::mpsc::{channel, Receiver};

/// Surface notification forwarded to the side panels.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    /// Instances were added, removed or moved
    Registry(Vec<InstanceSummary>),
    /// The selection changed
    Selection(Option<InstanceId>),
    /// The mode was set
    Mode(Mode),
}

/// The main application structure.
///
/// Implements `eframe::App`; see `ui/mod.rs` for the frame loop.
pub struct EditorApp {
    /// Layout engine and placed widgets
    pub surface: LayoutSurface,
    /// Persisted UI preferences
    pub config: EditorConfig,
    /// Project navigator, absent if it has no mount point
    pub navigator: Option<Navigator>,
    /// Property inspector, absent if it has no mount point
    pub inspector: Option<Inspector>,
    /// Notifications waiting for the panels
    pub panel_updates: Receiver<PanelUpdate>,
    /// Presets offered for new modular widgets
    pub presets: PresetLibrary,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorApp {
    /// Builds the app from `config`, wiring surface notifications to the panels.
    pub fn new(config: EditorConfig) -> Self {
        let presets = PresetLibrary::builtin();
        let catalog = WidgetCatalog::builtin(presets.clone(), &config.modular_preset);
        let mut surface = LayoutSurface::new(catalog, &config);
        let (sender, receiver) = channel();

        let tx = sender.clone();
        let registry = surface.on_registry_changed(move |snapshot| {
            let _ = tx.send(PanelUpdate::Registry(snapshot.to_vec()));
        });
        let tx = sender.clone();
        let selection = surface.on_selection_changed(move |selected| {
            let _ = tx.send(PanelUpdate::Selection(*selected));
        });
        let mode = surface.on_mode_changed(move |mode| {
            let _ = sender.send(PanelUpdate::Mode(*mode));
        });

        let navigator = Navigator::mount(config.panels.navigator)
            .map_err(|err| log::error!("Navigator disabled: {err}"))
            .ok();
        let inspector = Inspector::mount(config.panels.inspector)
            .map_err(|err| log::error!("Inspector disabled: {err}"))
            .ok();

        if navigator.is_none() && inspector.is_none() {
            log::info!("No side panels mounted, dropping panel forwarding");
            for subscription in [registry, selection, mode] {
                surface.unsubscribe(subscription);
            }
        }

        Self {
            surface,
            config,
            navigator,
            inspector,
            panel_updates: receiver,
            presets,
        }
    }

    /// Builds the app with the config stored by a previous session.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>) -> Self {
        Self::new(EditorConfig::load(cc.storage))
    }

    /// Hands every pending notification to the mounted panels.
    pub fn drain_panel_updates(&mut self) {
        while let Ok(update) = self.panel_updates.try_recv() {
            if let Some(navigator) = self.navigator.as_mut() {
                navigator.apply(&update);
            }
            if let Some(inspector) = self.inspector.as_mut() {
                inspector.apply(&update);
            }
        }
    }

    /// Builds new modular widgets from preset `id`. Unknown ids are ignored.
    pub fn set_modular_preset(&mut self, id: &str) -> bool {
        if self.presets.get(id).is_none() {
            log::warn!("Ignoring unknown preset '{id}'");
            return false;
        }
        self.config.modular_preset = id.to_string();
        self.surface
            .catalog_mut()
            .register_modular(self.presets.clone(), id);
        true
    }

    /// Copies panel widths back into the config before it is saved.
    pub fn sync_config(&mut self) {
        if let Some(navigator) = &self.navigator {
            self.config.panels.navigator = Some(navigator.slot());
        }
        if let Some(inspector) = &self.inspector {
            self.config.panels.inspector = Some(inspector.slot());
        }
    }
}
