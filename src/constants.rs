//! Shared application-wide constants.
//! Centralizes tweakable values used by the layout engine and the editor UI.

// Geometry
/// Smallest width or height any placed instance may have, in pixels.
pub const MIN_SIZE: f32 = 100.0;
/// Surface-local x coordinate at which new instances appear, before pan compensation.
pub const SPAWN_X: f32 = 50.0;
/// Surface-local y coordinate at which new instances appear, before pan compensation.
pub const SPAWN_Y: f32 = 50.0;
/// Default width of a newly spawned instance.
pub const SPAWN_WIDTH: f32 = 300.0;
/// Default height of a newly spawned instance.
pub const SPAWN_HEIGHT: f32 = 200.0;

// Grid/drawing
/// Grid cell size in pixels.
pub const GRID_SIZE: f32 = 20.0;
/// Stroke width of grid lines.
pub const GRID_STROKE_WIDTH: f32 = 0.5;
/// Stroke width of the selection outline drawn around the selected instance.
pub const SELECTION_STROKE_WIDTH: f32 = 2.0;

// Resize handles
/// Edge length of the square resize handles (hot zone and drawn marker).
pub const HANDLE_SIZE: f32 = 8.0;

// Redraw
/// Upper bound on redraws per second requested by the surface.
pub const MAX_REFRESH_HZ: f64 = 60.0;

// Panels
/// Default width of the navigator and inspector side panels.
pub const SIDE_PANEL_WIDTH: f32 = 250.0;
/// Name of the catalog group listed in the spawner.
pub const CORE_GROUP: &str = "core";
