use super::*;
use crate::config::EditorConfig;
use eframe::egui;

fn screen() -> egui::Rect {
    egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 800.0))
}

/// Run one headless frame of the whole app on `ctx` with the given events.
fn run_frame(ctx: &egui::Context, app: &mut EditorApp, events: Vec<egui::Event>) {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(screen());
    raw.events = events;
    let _ = ctx.run(raw, |ctx| app.show(ctx));
}

fn press(pos: egui::Pos2, button: egui::PointerButton, modifiers: egui::Modifiers) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button,
            pressed: true,
            modifiers,
        },
    ]
}

fn release(pos: egui::Pos2, button: egui::PointerButton) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

/// Screen position of a surface-local point, after the first frame has laid out the canvas.
fn on_surface(app: &EditorApp, local: egui::Pos2) -> egui::Pos2 {
    local + app.surface.origin().to_vec2()
}

#[test]
fn canvas_sits_between_side_panels() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();

    run_frame(&ctx, &mut app, vec![]);

    let origin = app.surface.origin();
    let size = app.surface.viewport().size();
    assert!(origin.x > 0.0, "navigator should push the canvas right");
    assert!(origin.y > 0.0, "toolbar should push the canvas down");
    assert!(origin.x + size.x < 1200.0, "inspector should take the right edge");
}

#[test]
fn clicking_instance_selects_it_and_panels_follow() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("infopane").unwrap();

    let click = on_surface(&app, egui::pos2(150.0, 150.0));
    run_frame(
        &ctx,
        &mut app,
        press(click, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );
    run_frame(&ctx, &mut app, release(click, egui::PointerButton::Primary));
    // Notifications are drained at the start of the next frame
    run_frame(&ctx, &mut app, vec![]);

    assert_eq!(app.surface.selected(), Some(id));
    assert_eq!(app.navigator.as_ref().and_then(|n| n.selected()), Some(id));
    assert_eq!(
        app.inspector.as_ref().and_then(|i| i.target()).map(|t| t.id),
        Some(id)
    );
}

#[test]
fn dragging_instance_moves_it_across_frames() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("meters").unwrap();

    let start = on_surface(&app, egui::pos2(150.0, 150.0));
    let end = start + egui::vec2(40.0, 25.0);
    run_frame(
        &ctx,
        &mut app,
        press(start, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start + egui::vec2(20.0, 5.0))]);
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(end)]);
    run_frame(&ctx, &mut app, release(end, egui::PointerButton::Primary));

    assert_eq!(
        app.surface.geometry(id),
        Some(Geometry::new(90.0, 75.0, 300.0, 200.0))
    );
}

#[test]
fn middle_button_pan_moves_instances_with_grid() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("waveform").unwrap();

    let start = on_surface(&app, egui::pos2(500.0, 400.0));
    run_frame(
        &ctx,
        &mut app,
        press(start, egui::PointerButton::Middle, egui::Modifiers::NONE),
    );
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start + egui::vec2(10.0, -5.0))]);
    run_frame(
        &ctx,
        &mut app,
        release(start + egui::vec2(10.0, -5.0), egui::PointerButton::Middle),
    );

    assert_eq!(app.surface.viewport().pan_offset(), egui::vec2(10.0, -5.0));
    assert_eq!(
        app.surface.geometry(id),
        Some(Geometry::new(60.0, 45.0, 300.0, 200.0))
    );
}

#[test]
fn release_outside_canvas_ends_resize() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("sliders").unwrap();

    // SE handle of the default rectangle (50, 50, 300, 200)
    let handle = on_surface(&app, egui::pos2(350.0, 250.0));
    let outside = egui::pos2(1190.0, 790.0);
    run_frame(
        &ctx,
        &mut app,
        press(handle, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );
    run_frame(&ctx, &mut app, release(outside, egui::PointerButton::Primary));
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(handle)]);

    assert!(app.surface.capture() == crate::input::Capture::Idle);
    let geometry = app.surface.geometry(id).unwrap();
    assert!(geometry.width > 300.0 && geometry.height > 200.0);
}

#[test]
fn press_in_side_panel_does_not_reach_surface() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("infopane").unwrap();
    app.surface.select(id);

    let in_navigator = egui::pos2(20.0, 700.0);
    run_frame(
        &ctx,
        &mut app,
        press(in_navigator, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );

    assert_eq!(app.surface.selected(), Some(id));
    assert!(app.surface.capture() == crate::input::Capture::Idle);
}

#[test]
fn navigator_actions_drive_surface() {
    let mut app = EditorApp::default();

    app.apply_navigator_action(NavigatorAction::Spawn("buttongrid".to_string()));
    let id = app.surface.registry().iter().next().map(|i| i.id).unwrap();
    app.apply_navigator_action(NavigatorAction::Select(id));
    app.apply_navigator_action(NavigatorAction::SetMode(Mode::Play));
    app.drain_panel_updates();

    assert_eq!(app.surface.selected(), Some(id));
    assert_eq!(app.navigator.as_ref().map(|n| n.mode()), Some(Mode::Play));

    app.apply_navigator_action(NavigatorAction::Delete(id));
    app.drain_panel_updates();

    assert!(app.surface.registry().is_empty());
    assert_eq!(app.surface.selected(), None);
    assert!(app.navigator.as_ref().is_some_and(|n| n.entries().is_empty()));
    assert!(app.inspector.as_ref().is_some_and(|i| i.target().is_none()));
}

#[test]
fn navigator_spawn_of_unknown_type_is_ignored() {
    let mut app = EditorApp::default();

    app.apply_navigator_action(NavigatorAction::Spawn("theremin".to_string()));

    assert!(app.surface.registry().is_empty());
}

#[test]
fn inspector_edit_commits_and_reaches_panels() {
    let mut app = EditorApp::default();
    let id = app.surface.spawn("waveform").unwrap();
    app.surface.select(id);

    app.apply_inspector_edit(id, GeometryField::Width.patch(20.0));
    app.drain_panel_updates();

    let width = app.inspector.as_ref().and_then(|i| i.target()).map(|t| t.geometry.width);
    assert_eq!(width, Some(crate::constants::MIN_SIZE));
    assert_eq!(app.surface.geometry(id).map(|g| g.width), Some(crate::constants::MIN_SIZE));
}

#[test]
fn inspector_edit_in_play_mode_is_dropped() {
    let mut app = EditorApp::default();
    let id = app.surface.spawn("waveform").unwrap();
    app.surface.set_mode(Mode::Play);

    app.apply_inspector_edit(id, GeometryField::X.patch(400.0));

    assert_eq!(app.surface.geometry(id).map(|g| g.x), Some(50.0));
}

#[test]
fn delete_key_removes_selected_in_edit_mode_only() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let first = app.surface.spawn("infopane").unwrap();
    let second = app.surface.spawn("infopane").unwrap();
    let delete = || {
        vec![egui::Event::Key {
            key: egui::Key::Delete,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }]
    };

    app.surface.select(first);
    run_frame(&ctx, &mut app, delete());
    assert!(!app.surface.registry().contains(first));

    app.surface.select(second);
    app.surface.set_mode(Mode::Play);
    run_frame(&ctx, &mut app, delete());
    assert!(app.surface.registry().contains(second));
}

#[test]
fn app_without_panels_still_runs() {
    let mut config = EditorConfig::default();
    config.panels.navigator = None;
    config.panels.inspector = None;
    let mut app = EditorApp::new(config);
    let ctx = egui::Context::default();

    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("modular").unwrap();
    run_frame(&ctx, &mut app, vec![]);

    assert!(app.navigator.is_none() && app.inspector.is_none());
    assert_eq!(app.surface.registry().get(id).map(|i| i.kind.as_str()), Some("modular"));
    assert!(app.surface.origin().x == 0.0);
}

#[test]
fn saved_config_round_trips_through_json() {
    let mut app = EditorApp::default();
    app.config.show_grid = false;
    if let Some(navigator) = app.navigator.as_mut() {
        navigator.set_width(310.0);
    }

    app.sync_config();
    let json = app.config.to_json().unwrap();
    let restored = EditorConfig::from_json(&json).unwrap();

    assert!(!restored.show_grid);
    assert_eq!(restored.panels.navigator.map(|s| s.width), Some(310.0));
}

#[test]
fn play_mode_click_selects_without_moving() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("infopane").unwrap();
    app.surface.set_mode(Mode::Play);

    let click = on_surface(&app, egui::pos2(150.0, 150.0));
    run_frame(
        &ctx,
        &mut app,
        press(click, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );
    run_frame(&ctx, &mut app, release(click + egui::vec2(30.0, 30.0), egui::PointerButton::Primary));
    run_frame(&ctx, &mut app, vec![]);

    assert_eq!(app.surface.selected(), Some(id));
    assert_eq!(app.navigator.as_ref().and_then(|n| n.selected()), Some(id));
    assert_eq!(app.surface.geometry(id).map(|g| (g.x, g.y)), Some((50.0, 50.0)));
}

#[test]
fn right_click_during_drag_keeps_dragging() {
    let mut app = EditorApp::default();
    let ctx = egui::Context::default();
    run_frame(&ctx, &mut app, vec![]);
    let id = app.surface.spawn("infopane").unwrap();

    let start = on_surface(&app, egui::pos2(150.0, 150.0));
    run_frame(
        &ctx,
        &mut app,
        press(start, egui::PointerButton::Primary, egui::Modifiers::NONE),
    );
    let mut events = press(start, egui::PointerButton::Secondary, egui::Modifiers::NONE);
    events.extend(release(start, egui::PointerButton::Secondary));
    run_frame(&ctx, &mut app, events);
    run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start + egui::vec2(20.0, 10.0))]);
    run_frame(&ctx, &mut app, release(start + egui::vec2(20.0, 10.0), egui::PointerButton::Primary));

    assert_eq!(app.surface.geometry(id).map(|g| (g.x, g.y)), Some((70.0, 60.0)));
    assert_eq!(app.surface.capture(), crate::input::Capture::Idle);
}
