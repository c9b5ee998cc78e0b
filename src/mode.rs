//! Edit/play mode switching.
//!
//! Flags are recomputed from the mode every time rather than toggled, so
//! entering a mode twice leaves the same state as entering it once.

use crate::registry::{PlacedInstance, PlacementRegistry};
use crate::types::{InstanceFlags, Mode};

/// Interactivity flags every instance carries in `mode`.
pub fn flags_for(mode: Mode) -> InstanceFlags {
    match mode {
        Mode::Edit => InstanceFlags {
            draggable: true,
            resizable: true,
            widget_enabled: false,
        },
        Mode::Play => InstanceFlags {
            draggable: false,
            resizable: false,
            widget_enabled: true,
        },
    }
}

/// Brings one instance in line with `mode`, including its widget's
/// interactivity capability when it has one.
pub fn apply_to_instance(instance: &mut PlacedInstance, mode: Mode) {
    let flags = flags_for(mode);
    instance.flags = flags;
    if let Some(interactivity) = instance.widget_mut().as_interactivity() {
        interactivity.set_enabled(flags.widget_enabled);
    }
}

/// Brings every placed instance in line with `mode`.
pub fn apply_mode(registry: &mut PlacementRegistry, mode: Mode) {
    for instance in registry.iter_mut() {
        apply_to_instance(instance, mode);
    }
}
