//! Integration tests for the window manager server
//!
//! These tests drive `Server<MockBackend>` the way a compositor would:
//! - Window lifecycle (map, commit, unmap, destroy)
//! - Workspace switching and visibility
//! - Focus navigation and keybinds
//! - Pointer grabs
//! - Animated transitions against the mock clock
//! - Config loading and reload

use zos_wm::{
    Action, ButtonState, Config, Direction, LayoutMode, MapRequest, MockBackend, Modifiers, PointerButton,
    Rect, SceneGraph, Server, Size, Vec2, TICK_INTERVAL_MS,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn quiet_config() -> Config {
    let mut config = Config::default();
    config.animation.enabled = false;
    config
}

fn server_with(config: Config) -> Server<MockBackend> {
    init_tracing();
    let mut server = Server::with_config(MockBackend::new(), config);
    server.set_output_size(Size::new(1920.0, 1080.0));
    server
}

fn map(server: &mut Server<MockBackend>, app_id: &str) -> u64 {
    let (surface, content) = server.backend_mut().create_surface(Some(Size::new(640.0, 480.0)));
    server.map_window(MapRequest::native(surface, content).with_app_id(app_id))
}

/// Run ticks until the animations settle, advancing the clock one interval
/// per tick
fn settle(server: &mut Server<MockBackend>) {
    for _ in 0..1000 {
        server.backend_mut().advance(TICK_INTERVAL_MS);
        if !server.tick() {
            return;
        }
    }
    panic!("animations never settled");
}

// =============================================================================
// Window Lifecycle Tests
// =============================================================================

#[test]
fn test_window_lifecycle_full() {
    let mut server = server_with(quiet_config());

    let a = map(&mut server, "editor");
    let b = map(&mut server, "terminal");
    assert_eq!(server.windows().order(), &[b, a]);
    assert_eq!(server.focused(), Some(b));

    // Master on the left, stack on the right
    let master = server.window_box(b).unwrap();
    let stack = server.window_box(a).unwrap();
    assert!((master.x - 8.0).abs() < 0.001);
    assert!(stack.x > master.right());

    // Client resizes itself; the decoration follows
    let surface = server.window(a).unwrap().surface;
    server.backend_mut().commit_surface(surface, Size::new(500.0, 400.0));
    server.commit_window(a);
    let deco_width = server.window(a).unwrap().decoration.as_ref().unwrap().width();
    assert!((deco_width - 500.0).abs() < 0.001);

    // Unmap the focused window; a takes the whole usable area and focus
    server.unmap_window(b);
    assert!(server.window(b).is_none());
    assert_eq!(server.focused(), Some(a));
    assert_eq!(server.window_box(a), Some(Rect::new(8.0, 8.0, 1904.0, 1064.0)));

    server.destroy_window(a);
    assert!(server.windows().is_empty());
    assert_eq!(server.focused(), None);
}

#[test]
fn test_animated_open_and_close() {
    let mut config = Config::default();
    config.animation.duration_ms = 160.0;
    let mut server = server_with(config);

    let a = map(&mut server, "a");
    assert!(server.is_animating());
    assert_eq!(server.backend_mut().take_scheduled_ticks(), vec![TICK_INTERVAL_MS]);
    settle(&mut server);
    assert!(!server.is_animating());

    let root = server.window(a).unwrap().root_node();
    assert_eq!(server.backend().node(root).unwrap().opacity, 1.0);
    assert_eq!(server.window_box(a), Some(Rect::new(8.0, 8.0, 1904.0, 1064.0)));

    server.unmap_window(a);
    assert!(server.window(a).unwrap().closing);
    assert!(server.windows().order().is_empty());
    settle(&mut server);
    assert!(server.window(a).is_none());
    assert!(server.backend().node(root).is_none());
}

#[test]
fn test_completion_fires_once_at_exact_duration() {
    let mut config = Config::default();
    config.animation.open = false;
    config.animation.layout = false;
    config.animation.duration_ms = 200.0;
    let mut server = server_with(config);
    let a = map(&mut server, "a");
    let root = server.window(a).unwrap().root_node();

    server.set_minimized(a, true);
    server.backend_mut().advance(200.0);
    assert!(!server.tick());
    assert!(!server.backend().node(root).unwrap().enabled);
    assert!(server.window(a).unwrap().animation.is_none());

    // Restoring re-enables; a late tick must not re-run the completion
    server.set_minimized(a, false);
    settle(&mut server);
    assert!(server.backend().node(root).unwrap().enabled);
}

// =============================================================================
// Workspace Tests
// =============================================================================

#[test]
fn test_workspace_visibility_invariant() {
    let mut server = server_with(quiet_config());
    let mut windows = Vec::new();
    for n in 1..=3u8 {
        server.switch_workspace(n);
        windows.push(map(&mut server, "a"));
        windows.push(map(&mut server, "b"));
    }

    for n in [2, 3, 1, 3] {
        server.switch_workspace(n);
        for &id in &windows {
            let window = server.window(id).unwrap();
            let visible = server.backend().is_visible(window.root_node());
            assert_eq!(visible, window.workspace == n);
        }
        let focused = server.focused().unwrap();
        assert_eq!(server.window(focused).unwrap().workspace, n);
    }
}

#[test]
fn test_move_to_workspace_via_keybind() {
    let mut server = server_with(quiet_config());
    let a = map(&mut server, "a");
    let b = map(&mut server, "b");

    assert!(server.handle_key(Modifiers::LOGO_SHIFT, "4"));
    assert_eq!(server.window(b).unwrap().workspace, 4);
    assert_eq!(server.focused(), Some(a));

    assert!(server.handle_key(Modifiers::LOGO, "4"));
    assert_eq!(server.current_workspace(), 4);
    assert_eq!(server.focused(), Some(b));
}

// =============================================================================
// Focus Tests
// =============================================================================

#[test]
fn test_directional_focus_prefers_axis() {
    let mut config = quiet_config();
    config.decoration.enabled = false;
    let mut server = server_with(config);
    server.set_mode(LayoutMode::Floating);

    let origin = map(&mut server, "origin");
    let right = map(&mut server, "right");
    let below = map(&mut server, "below");
    for (id, pos) in [
        (origin, Vec2::new(0.0, 0.0)),
        (right, Vec2::new(100.0, 0.0)),
        (below, Vec2::new(0.0, 100.0)),
    ] {
        let root = server.window(id).unwrap().root_node();
        server.backend_mut().set_node_position(root, pos);
    }

    server.focus_window(origin);
    server.dispatch(Action::Focus(Direction::Right));
    assert_eq!(server.focused(), Some(right));
    server.dispatch(Action::Focus(Direction::Right));
    assert_eq!(server.focused(), Some(right));
}

// =============================================================================
// Grab Tests
// =============================================================================

#[test]
fn test_move_grab_follows_pointer() {
    let mut config = quiet_config();
    config.decoration.enabled = false;
    let mut server = server_with(config);
    server.set_mode(LayoutMode::Floating);
    let id = map(&mut server, "a");
    let root = server.window(id).unwrap().root_node();
    server.backend_mut().set_node_position(root, Vec2::new(10.0, 10.0));

    server.backend_mut().set_modifier(true);
    server.pointer_button(Vec2::new(50.0, 50.0), PointerButton::Left, ButtonState::Pressed);
    server.pointer_motion(Vec2::new(80.0, 80.0));
    assert_eq!(server.backend().node_position(root), Some(Vec2::new(40.0, 40.0)));

    server.pointer_button(Vec2::new(80.0, 80.0), PointerButton::Left, ButtonState::Released);
    assert!(server.grab().is_normal());
    server.pointer_motion(Vec2::new(200.0, 200.0));
    assert_eq!(server.backend().node_position(root), Some(Vec2::new(40.0, 40.0)));
}

#[test]
fn test_border_resize_on_floating_window() {
    let mut server = server_with(quiet_config());
    server.set_mode(LayoutMode::Floating);
    let id = map(&mut server, "a");
    let root = server.window(id).unwrap().root_node();
    server.backend_mut().set_node_position(root, Vec2::new(100.0, 100.0));
    let surface = server.window(id).unwrap().surface;

    // Bottom-right corner of the decorated box
    let corner = Vec2::new(100.0 + 638.0, 100.0 + 24.0 + 478.0);
    server.pointer_button(corner, PointerButton::Left, ButtonState::Pressed);
    assert!(server.grab().is_resize());
    server.pointer_motion(corner + Vec2::new(60.0, 20.0));
    assert_eq!(server.backend().surface(surface).unwrap().size, Some(Size::new(700.0, 500.0)));

    server.pointer_button(corner, PointerButton::Left, ButtonState::Released);
    assert!(!server.backend().surface(surface).unwrap().resizing);
}

// =============================================================================
// Mode Tests
// =============================================================================

#[test]
fn test_nested_maximize_fullscreen_restore() {
    let mut server = server_with(quiet_config());
    let id = map(&mut server, "video");
    server.set_floating(id, true);
    let root = server.window(id).unwrap().root_node();
    server.backend_mut().set_node_position(root, Vec2::new(200.0, 150.0));
    let original = server.window_box(id).unwrap();

    server.dispatch(Action::ToggleMaximize);
    let maximized = server.window_box(id).unwrap();
    assert_eq!(maximized, Rect::new(8.0, 8.0, 1904.0, 1064.0));

    server.dispatch(Action::ToggleFullscreen);
    assert_eq!(server.window_box(id), Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)));

    server.dispatch(Action::ToggleFullscreen);
    assert_eq!(server.window_box(id), Some(maximized));

    server.dispatch(Action::ToggleMaximize);
    assert_eq!(server.window_box(id), Some(original));
}

#[test]
fn test_mode_toggle_keeps_floating_positions() {
    let mut server = server_with(quiet_config());
    let a = map(&mut server, "a");
    server.dispatch(Action::ModeFloating);
    let root = server.window(a).unwrap().root_node();
    server.backend_mut().set_node_position(root, Vec2::new(300.0, 300.0));
    server.dispatch(Action::MasterRatioInc);
    assert_eq!(server.window_box(a).unwrap().position(), Vec2::new(300.0, 300.0));

    server.dispatch(Action::ModeTiling);
    assert_eq!(server.window_box(a).unwrap().position(), Vec2::new(8.0, 8.0));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_toml_config_rules_and_keybinds() {
    let source = r#"
        inner_gap = 4
        outer_gap = 0
        master_ratio = 0.95

        [decoration]
        enabled = false

        [animation]
        enabled = false

        [keybinds]
        "alt+return" = "toggle-fullscreen"
        "alt+q" = "close"

        [[rules]]
        app_id = "^pavucontrol$"
        floating = true
        size = [400, 300]
    "#;
    let config = Config::from_toml_str(source).unwrap();
    assert!((config.master_ratio - 0.9).abs() < 0.001);

    let mut server = server_with(config);
    let tiled = map(&mut server, "terminal");
    let floating = map(&mut server, "pavucontrol");

    assert!(server.window(floating).unwrap().floating);
    assert_eq!(server.window_box(floating).unwrap().size(), Size::new(400.0, 300.0));
    assert_eq!(server.window_box(tiled), Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)));

    assert!(server.handle_key(Modifiers { alt: true, ..Modifiers::NONE }, "return"));
    assert!(server.window(floating).unwrap().fullscreen);
    assert!(!server.handle_key(Modifiers::LOGO, "f"));
}

#[test]
fn test_reload_toggles_decorations() {
    let mut server = server_with(quiet_config());
    let a = map(&mut server, "a");
    let content = server.window(a).unwrap().content;
    assert!(server.window(a).unwrap().is_decorated());

    let mut next = quiet_config();
    next.decoration.enabled = false;
    server.backend_mut().set_config(next);
    server.dispatch(Action::Reload);

    let window = server.window(a).unwrap();
    assert!(!window.is_decorated());
    assert_eq!(window.root_node(), content);
    assert_eq!(server.window_box(a), Some(Rect::new(8.0, 8.0, 1904.0, 1064.0)));

    server.backend_mut().fail_loads("gone");
    server.dispatch(Action::Reload);
    assert!(!server.config().decoration.enabled);
}
