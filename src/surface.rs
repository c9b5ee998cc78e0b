//! The layout surface: viewport, registry, gestures and mode behind one
//! command/subscription API.
//!
//! Every command mutates state first and notifies observers afterwards, so a
//! listener always sees the post-mutation registry and selection. Pointer
//! positions come in as screen coordinates; the surface origin (top-left of
//! the canvas on screen) converts them to surface-local ones.

use crate::config::{EditorConfig, PanModifier};
use crate::constants::MIN_SIZE;
use crate::error::LayoutError;
use crate::events::{ListenerId, Notifier};
use crate::input::{Capture, InputDispatch, PointerPress};
use crate::interaction::{handle_at, DragSession, ResizeSession};
use crate::mode;
use crate::redraw::{Redraw, RedrawScheduler};
use crate::registry::PlacementRegistry;
use crate::types::*;
use crate::viewport::Viewport;
use crate::widgets::WidgetCatalog;
use eframe::egui;

/// Handle returned by the `on_*` subscriptions, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    /// From [`LayoutSurface::on_registry_changed`]
    RegistryChanged(ListenerId),
    /// From [`LayoutSurface::on_selection_changed`]
    SelectionChanged(ListenerId),
    /// From [`LayoutSurface::on_panned`]
    Panned(ListenerId),
    /// From [`LayoutSurface::on_mode_changed`]
    ModeChanged(ListenerId),
}

/// What a press at some position lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PressTarget {
    Handle(InstanceId, ResizeHandle),
    Body(InstanceId),
}

/// The editing surface.
#[derive(Debug)]
pub struct LayoutSurface {
    catalog: WidgetCatalog,
    viewport: Viewport,
    registry: PlacementRegistry,
    input: InputDispatch,
    mode: Mode,
    min_size: f32,
    pan_modifier: PanModifier,
    origin: egui::Pos2,
    redraw: RedrawScheduler,
    registry_changed: Notifier<[InstanceSummary]>,
    selection_changed: Notifier<Option<InstanceId>>,
    panned: Notifier<PanEvent>,
    mode_changed: Notifier<Mode>,
}

impl LayoutSurface {
    /// Creates an empty surface in edit mode.
    pub fn new(catalog: WidgetCatalog, config: &EditorConfig) -> Self {
        Self {
            catalog,
            viewport: Viewport::new(),
            registry: PlacementRegistry::new(),
            input: InputDispatch::new(),
            mode: Mode::Edit,
            min_size: MIN_SIZE,
            pan_modifier: config.pan_modifier,
            origin: egui::Pos2::ZERO,
            redraw: RedrawScheduler::new(config.max_refresh_hz),
            registry_changed: Notifier::default(),
            selection_changed: Notifier::default(),
            panned: Notifier::default(),
            mode_changed: Notifier::default(),
        }
    }

    // Accessors

    /// Widget types that can be spawned.
    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    /// Widget types, mutably, for registering or replacing constructors.
    pub fn catalog_mut(&mut self) -> &mut WidgetCatalog {
        &mut self.catalog
    }

    /// Pan offset and drawable size.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Placed instances and selection.
    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    /// Placed instances, mutably, for painting widgets.
    pub fn registry_mut(&mut self) -> &mut PlacementRegistry {
        &mut self.registry
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gesture currently following the pointer.
    pub fn capture(&self) -> Capture {
        self.input.capture()
    }

    /// Currently selected instance.
    pub fn selected(&self) -> Option<InstanceId> {
        self.registry.selected()
    }

    /// Screen position of the surface's top-left corner.
    pub fn origin(&self) -> egui::Pos2 {
        self.origin
    }

    /// Changes which modifier turns a primary press into a pan.
    pub fn set_pan_modifier(&mut self, modifier: PanModifier) {
        self.pan_modifier = modifier;
    }

    /// Screen-space rectangle of an instance.
    pub fn screen_rect(&self, id: InstanceId) -> Option<egui::Rect> {
        self.registry
            .geometry(id)
            .map(|g| g.translated(self.origin.to_vec2()).to_rect())
    }

    // Subscriptions

    /// Called with a snapshot whenever instances are added, removed or moved.
    pub fn on_registry_changed(
        &mut self,
        listener: impl FnMut(&[InstanceSummary]) + 'static,
    ) -> Subscription {
        Subscription::RegistryChanged(self.registry_changed.subscribe(listener))
    }

    /// Called with the new selection whenever it changes.
    pub fn on_selection_changed(
        &mut self,
        listener: impl FnMut(&Option<InstanceId>) + 'static,
    ) -> Subscription {
        Subscription::SelectionChanged(self.selection_changed.subscribe(listener))
    }

    /// Called for every pan step.
    pub fn on_panned(&mut self, listener: impl FnMut(&PanEvent) + 'static) -> Subscription {
        Subscription::Panned(self.panned.subscribe(listener))
    }

    /// Called after every `set_mode`.
    pub fn on_mode_changed(&mut self, listener: impl FnMut(&Mode) + 'static) -> Subscription {
        Subscription::ModeChanged(self.mode_changed.subscribe(listener))
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        match subscription {
            Subscription::RegistryChanged(id) => self.registry_changed.unsubscribe(id),
            Subscription::SelectionChanged(id) => self.selection_changed.unsubscribe(id),
            Subscription::Panned(id) => self.panned.unsubscribe(id),
            Subscription::ModeChanged(id) => self.mode_changed.unsubscribe(id),
        }
    }

    // Commands

    /// Places a new instance of `kind` at the default spot.
    ///
    /// Unknown types are logged and nothing is placed.
    pub fn spawn(&mut self, kind: &str) -> Option<InstanceId> {
        let constructor = match self.catalog.lookup(kind) {
            Ok(constructor) => constructor,
            Err(err) => {
                log::error!("Spawn failed: {err}");
                return None;
            }
        };
        let id = self
            .registry
            .spawn(kind, &*constructor, self.viewport.pan_offset());
        if let Some(instance) = self.registry.get_mut(id) {
            mode::apply_to_instance(instance, self.mode);
        }
        log::info!("Spawned {kind} as {id}");
        self.redraw.request();
        self.notify_registry_changed();
        Some(id)
    }

    /// Removes an instance. Returns `false` if `id` is unknown.
    pub fn delete(&mut self, id: InstanceId) -> bool {
        let Some(removed) = self.registry.delete(id) else {
            log::debug!("Ignoring delete of unknown instance {id}");
            return false;
        };
        if self.input.capture().target() == Some(id) {
            self.input.release();
        }
        log::info!("Deleted {} {}", removed.kind, removed.id);
        self.redraw.request();
        self.notify_registry_changed();
        if removed.was_selected {
            self.selection_changed.notify(&None);
        }
        true
    }

    /// Selects an instance. Unknown ids are ignored.
    pub fn select(&mut self, id: InstanceId) -> bool {
        if !self.registry.contains(id) {
            log::debug!("Ignoring selection of unknown instance {id}");
            return false;
        }
        if self.registry.select(id) {
            self.redraw.request();
            self.selection_changed.notify(&Some(id));
        }
        true
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if self.registry.clear_selection() {
            self.redraw.request();
            self.selection_changed.notify(&None);
        }
    }

    /// Switches mode and recomputes every instance's flags.
    ///
    /// Entering play mode releases an in-flight drag or resize; a pan keeps going.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Play && self.input.capture().target().is_some() {
            let released = self.input.release();
            log::debug!("Released {} gesture on mode switch", released.name());
        }
        if self.mode != mode {
            log::info!("Switching to {} mode", mode.label());
        }
        self.mode = mode;
        mode::apply_mode(&mut self.registry, mode);
        self.redraw.request();
        self.mode_changed.notify(&mode);
    }

    /// Geometry of `id`.
    pub fn geometry(&self, id: InstanceId) -> Option<Geometry> {
        self.registry.geometry(id)
    }

    /// Writes part of an instance's geometry, flooring the size at the minimum.
    pub fn set_geometry(
        &mut self,
        id: InstanceId,
        patch: GeometryPatch,
    ) -> Result<Geometry, LayoutError> {
        if self.mode == Mode::Play {
            return Err(LayoutError::LayoutFrozen);
        }
        let geometry = self.registry.set_geometry(id, patch)?;
        self.redraw.request();
        self.notify_registry_changed();
        Ok(geometry)
    }

    /// Sets the drawable area. The pan offset is kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.viewport.resize(width, height) {
            self.redraw.request();
        }
    }

    /// Places the surface on screen: its origin and drawable size.
    pub fn layout(&mut self, rect: egui::Rect) {
        if rect.min != self.origin {
            self.origin = rect.min;
            self.redraw.request();
        }
        self.resize(rect.width(), rect.height());
    }

    /// Asks for a repaint.
    pub fn request_redraw(&mut self) {
        self.redraw.request();
    }

    /// Whether and when to repaint, given the current time in seconds.
    pub fn poll_redraw(&mut self, now: f64) -> Redraw {
        self.redraw.poll(now)
    }

    // Pointer input

    /// Handles a button press at a screen position.
    ///
    /// Presses outside the surface are ignored. Returns `true` if the press
    /// started a gesture or changed the selection.
    pub fn pointer_pressed(&mut self, press: PointerPress) -> bool {
        if !self.contains_screen(press.pos) {
            return false;
        }

        let is_pan_trigger = press.button == egui::PointerButton::Middle
            || (press.button == egui::PointerButton::Primary
                && self.pan_modifier.is_held(press.modifiers));
        if is_pan_trigger {
            self.begin(Capture::Panning, press.button);
            self.viewport.begin_pan(press.pos);
            return true;
        }

        if press.button != egui::PointerButton::Primary {
            return false;
        }

        let target = self.target_under(press.pos);
        if self.mode == Mode::Play {
            // The widget keeps the pointer; a click only selects.
            return match target {
                Some(PressTarget::Body(id)) if self.selected() != Some(id) => self.select(id),
                _ => false,
            };
        }

        match target {
            Some(PressTarget::Handle(id, handle)) => {
                let Some(start_rect) = self.screen_rect(id).map(Geometry::from_rect) else {
                    return false;
                };
                self.begin(
                    Capture::Resizing(ResizeSession {
                        id,
                        handle,
                        start_pointer: press.pos,
                        start_rect,
                    }),
                    press.button,
                );
                self.select(id);
                true
            }
            Some(PressTarget::Body(id))
                if self.registry.get(id).is_some_and(|i| i.flags.draggable) =>
            {
                self.begin(
                    Capture::Dragging(DragSession::new(id, press.pos)),
                    press.button,
                );
                self.select(id);
                true
            }
            Some(PressTarget::Body(_)) => false,
            None => {
                self.end_stale_gesture();
                let had_selection = self.selected().is_some();
                self.clear_selection();
                had_selection
            }
        }
    }

    /// Handles a pointer move anywhere in the window.
    pub fn pointer_moved(&mut self, pos: egui::Pos2) {
        match self.input.capture() {
            Capture::Idle => {}
            Capture::Panning => {
                if let Some(event) = self.viewport.pan_to(pos) {
                    self.registry.apply_pan_delta(event.dx, event.dy);
                    self.redraw.request();
                    self.panned.notify(&event);
                    self.notify_registry_changed();
                }
            }
            Capture::Dragging(mut session) => {
                let delta = session.step(pos);
                if !self.registry.contains(session.id) {
                    self.input.release();
                    return;
                }
                self.input.update(Capture::Dragging(session));
                if delta != egui::Vec2::ZERO {
                    self.registry.translate(session.id, delta);
                    self.redraw.request();
                    self.notify_registry_changed();
                }
            }
            Capture::Resizing(session) => {
                let local = session
                    .rect_at(pos, self.min_size)
                    .translated(-self.origin.to_vec2());
                let before = self.registry.geometry(session.id);
                if before.is_none() {
                    self.input.release();
                    return;
                }
                if before == Some(local) {
                    return;
                }
                let patch = GeometryPatch {
                    x: Some(local.x),
                    y: Some(local.y),
                    width: Some(local.width),
                    height: Some(local.height),
                };
                match self.registry.set_geometry(session.id, patch) {
                    Ok(_) => {
                        self.redraw.request();
                        self.notify_registry_changed();
                    }
                    Err(err) => {
                        log::warn!("Resize aborted: {err}");
                        self.input.release();
                    }
                }
            }
        }
    }

    /// Handles a button release anywhere in the window.
    ///
    /// Only the button that started the active gesture ends it.
    pub fn pointer_released(&mut self, _pos: egui::Pos2, button: egui::PointerButton) {
        match self.input.release_button(button) {
            None | Some(Capture::Idle) => {}
            Some(Capture::Panning) => self.viewport.end_pan(),
            Some(finished) => log::debug!("Finished {} gesture", finished.name()),
        }
    }

    /// Cursor to show for the pointer at a screen position.
    pub fn cursor_at(&self, pos: egui::Pos2) -> Option<egui::CursorIcon> {
        match self.input.capture() {
            Capture::Panning => return Some(egui::CursorIcon::Grabbing),
            Capture::Dragging(_) => return Some(egui::CursorIcon::Move),
            Capture::Resizing(session) => return Some(session.handle.cursor()),
            Capture::Idle => {}
        }
        if self.mode != Mode::Edit || !self.contains_screen(pos) {
            return None;
        }
        match self.target_under(pos)? {
            PressTarget::Handle(_, handle) => Some(handle.cursor()),
            PressTarget::Body(_) => Some(egui::CursorIcon::Move),
        }
    }

    // Internals

    fn to_local(&self, pos: egui::Pos2) -> egui::Pos2 {
        pos - self.origin.to_vec2()
    }

    fn contains_screen(&self, pos: egui::Pos2) -> bool {
        egui::Rect::from_min_size(self.origin, self.viewport.size()).contains(pos)
    }

    /// Topmost instance under `pos`. Within one instance its resize handles
    /// win over its body; an instance further down never wins over one above.
    fn target_under(&self, pos: egui::Pos2) -> Option<PressTarget> {
        let body = self.registry.hit_test(self.to_local(pos));
        for id in self.registry.paint_order().into_iter().rev() {
            if let Some(instance) = self.registry.get(id).filter(|i| i.flags.resizable) {
                let rect = instance.geometry.translated(self.origin.to_vec2()).to_rect();
                if let Some(handle) = handle_at(rect, pos) {
                    return Some(PressTarget::Handle(id, handle));
                }
            }
            if body == Some(id) {
                return Some(PressTarget::Body(id));
            }
        }
        None
    }

    fn begin(&mut self, capture: Capture, button: egui::PointerButton) {
        self.end_stale_gesture();
        self.input.begin(capture, button);
    }

    /// Ends a gesture whose release never arrived.
    fn end_stale_gesture(&mut self) {
        let stale = self.input.release();
        if stale != Capture::Idle {
            log::debug!("Ending stale {} gesture", stale.name());
            if stale == Capture::Panning {
                self.viewport.end_pan();
            }
        }
    }

    fn notify_registry_changed(&mut self) {
        let snapshot = self.registry.snapshot();
        self.registry_changed.notify(&snapshot);
    }
}
