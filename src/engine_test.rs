#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

const MOUSE: PointerId = 1;
const FINGER: PointerId = 2;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// A core measuring a 400×300 image at the wrapper origin, holding `value`.
fn core_with(value: &str) -> PickerCore {
    let mut core = PickerCore::default();
    core.set_image(Rect::new(0.0, 0.0, 400.0, 300.0));
    core.load_value(value);
    core
}

fn commits(actions: &[Action]) -> Vec<&str> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Commit(v) => Some(v.as_str()),
            _ => None,
        })
        .collect()
}

fn last_frame(actions: &[Action]) -> Option<RenderFrame> {
    actions.iter().rev().find_map(|a| match a {
        Action::Render(frame) => Some(*frame),
        _ => None,
    })
}

/// Press on the handle centre, move by `(dx, dy)`, release.
fn drag_by(core: &mut PickerCore, dx: f64, dy: f64) -> Vec<Action> {
    let start = core.handle;
    let mut actions = core.on_pointer_down(MOUSE, start, Button::Primary);
    actions.extend(core.on_pointer_move(MOUSE, pt(start.x + dx, start.y + dy)));
    actions.extend(core.on_pointer_up(MOUSE));
    actions
}

fn run_animation(core: &mut PickerCore) -> Vec<Action> {
    let mut all = Vec::new();
    let mut now = 0.0;
    for _ in 0..100 {
        let actions = core.on_frame(now);
        let more = actions.contains(&Action::RequestFrame);
        all.extend(actions);
        if !more {
            break;
        }
        now += 16.0;
    }
    all
}

// =============================================================
// Loading values
// =============================================================

#[test]
fn default_core_is_neutral_and_idle() {
    let core = PickerCore::default();
    assert_eq!(core.focal, NEUTRAL);
    assert!(core.input.is_idle());
    assert_eq!(core.click_animation_ms, 200.0);
}

#[test]
fn load_value_positions_handle() {
    let core = core_with("0.25 0.5");
    assert_eq!(core.focal, FocalPoint::new(0.25, 0.5));
    assert_eq!(core.handle, pt(100.0, 150.0));
}

#[test]
fn load_canonical_value_does_not_rewrite_input() {
    let mut core = core_with("0.5 0.5");
    let actions = core.load_value("0.25 0.5");
    assert!(!actions.iter().any(|a| matches!(a, Action::WriteValue(_))));
    assert!(commits(&actions).is_empty());
}

#[test]
fn load_legacy_value_rewrites_input_without_commit() {
    let mut core = core_with("0.5 0.5");
    let actions = core.load_value("75 25");
    assert!(actions.contains(&Action::WriteValue("0.75 0.25".to_owned())));
    assert!(commits(&actions).is_empty());
    assert_eq!(core.focal, FocalPoint::new(0.75, 0.25));
}

#[test]
fn load_malformed_value_falls_back_to_neutral() {
    let mut core = core_with("0.1 0.1");
    let actions = core.load_value("1 2 3");
    assert_eq!(core.focal, NEUTRAL);
    assert!(actions.contains(&Action::WriteValue("0.5 0.5".to_owned())));
    let frame = last_frame(&actions).expect("render");
    assert!(!frame.reset_enabled);
}

#[test]
fn load_value_renders_reset_state() {
    let mut core = core_with("0.5 0.5");
    let frame = last_frame(&core.load_value("0.2 0.2")).expect("render");
    assert!(frame.reset_enabled);
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_end_to_end_commits_once() {
    let mut core = core_with("0.5 0.5");
    assert_eq!(core.handle, pt(200.0, 150.0));

    let actions = drag_by(&mut core, -100.0, 0.0);

    assert_eq!(core.focal, FocalPoint::new(0.25, 0.5));
    assert_eq!(commits(&actions), vec!["0.25 0.5"]);
    let frame = last_frame(&actions).expect("render");
    assert_eq!(frame.handle, pt(100.0, 150.0));
    assert!(frame.reset_enabled);
    assert!(core.input.is_idle());
}

#[test]
fn drag_moves_write_value_without_commit() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    let first = core.on_pointer_move(MOUSE, pt(240.0, 150.0));
    let second = core.on_pointer_move(MOUSE, pt(280.0, 150.0));

    assert!(first.contains(&Action::WriteValue("0.6 0.5".to_owned())));
    assert!(second.contains(&Action::WriteValue("0.7 0.5".to_owned())));
    assert!(commits(&first).is_empty());
    assert!(commits(&second).is_empty());
}

#[test]
fn preview_shows_on_first_move_and_hides_on_release() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    let first = core.on_pointer_move(MOUSE, pt(210.0, 150.0));
    let second = core.on_pointer_move(MOUSE, pt(220.0, 150.0));
    let up = core.on_pointer_up(MOUSE);

    assert_eq!(first.first(), Some(&Action::ShowPreview(true)));
    assert!(!second.contains(&Action::ShowPreview(true)));
    assert_eq!(up.first(), Some(&Action::ShowPreview(false)));
}

#[test]
fn drag_keeps_grab_offset() {
    let mut core = core_with("0.5 0.5");
    // Grab 6px right of the handle centre.
    core.on_pointer_down(MOUSE, pt(206.0, 150.0), Button::Primary);
    core.on_pointer_move(MOUSE, pt(106.0, 150.0));
    assert_eq!(core.handle, pt(100.0, 150.0));
    assert_eq!(core.focal, FocalPoint::new(0.25, 0.5));
}

#[test]
fn drag_beyond_right_bottom_caps_at_one() {
    let mut core = core_with("0.5 0.5");
    let actions = drag_by(&mut core, 1_000.0, 1_000.0);
    assert_eq!(core.focal, FocalPoint::new(1.0, 1.0));
    assert_eq!(core.handle, pt(400.0, 300.0));
    assert_eq!(commits(&actions), vec!["1 1"]);
}

#[test]
fn drag_beyond_top_left_caps_at_zero() {
    let mut core = core_with("0.5 0.5");
    let actions = drag_by(&mut core, -1_000.0, -1_000.0);
    assert_eq!(core.focal, FocalPoint::new(0.0, 0.0));
    assert_eq!(core.handle, pt(0.0, 0.0));
    assert_eq!(commits(&actions), vec!["0 0"]);
}

#[test]
fn drag_is_contained_to_offset_image() {
    let mut core = PickerCore::default();
    core.set_image(Rect::new(20.0, 10.0, 200.0, 100.0));
    core.load_value("0.5 0.5");
    drag_by(&mut core, 500.0, -500.0);
    assert_eq!(core.handle, pt(220.0, 10.0));
    assert_eq!(core.focal, FocalPoint::new(1.0, 0.0));
}

#[test]
fn press_without_move_commits_nothing() {
    let mut core = core_with("0.3 0.3");
    let mut actions = core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    actions.extend(core.on_pointer_up(MOUSE));
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn secondary_button_does_not_start_drag() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Secondary);
    assert!(core.input.is_idle());
    assert!(core.on_pointer_move(MOUSE, pt(0.0, 0.0)).is_empty());
}

#[test]
fn move_and_up_without_press_are_ignored() {
    let mut core = core_with("0.5 0.5");
    assert!(core.on_pointer_move(MOUSE, pt(10.0, 10.0)).is_empty());
    assert!(core.on_pointer_up(MOUSE).is_empty());
    assert_eq!(core.focal, NEUTRAL);
}

#[test]
fn second_pointer_cannot_steer_or_end_a_drag() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    core.on_pointer_move(MOUSE, pt(100.0, 150.0));

    assert!(core.on_pointer_down(FINGER, pt(0.0, 0.0), Button::Primary).is_empty());
    assert!(core.on_pointer_move(FINGER, pt(400.0, 0.0)).is_empty());
    assert!(core.on_pointer_up(FINGER).is_empty());
    assert_eq!(core.handle, pt(100.0, 150.0));
    assert!(core.input.is_dragging());

    assert_eq!(commits(&core.on_pointer_up(MOUSE)), vec!["0.25 0.5"]);
}

#[test]
fn drag_on_zero_area_image_keeps_value() {
    let mut core = PickerCore::default();
    core.load_value("0.3 0.7");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    core.on_pointer_move(MOUSE, pt(50.0, 50.0));
    assert_eq!(core.focal, FocalPoint::new(0.3, 0.7));
}

// =============================================================
// Click animation
// =============================================================

#[test]
fn click_requests_frame_without_changing_value() {
    let mut core = core_with("0.5 0.5");
    let actions = core.on_click(pt(100.0, 75.0));
    assert_eq!(actions, vec![Action::RequestFrame]);
    assert!(core.input.is_animating());
    assert_eq!(core.focal, NEUTRAL);
}

#[test]
fn click_animation_commits_once_at_target() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(100.0, 75.0));
    let actions = run_animation(&mut core);

    assert_eq!(commits(&actions), vec!["0.25 0.25"]);
    assert_eq!(core.handle, pt(100.0, 75.0));
    assert_eq!(core.focal, FocalPoint::new(0.25, 0.25));
    assert!(core.input.is_idle());
}

#[test]
fn click_animation_intermediate_frames_move_handle_only() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(0.0, 0.0));
    core.on_frame(0.0);
    let mid = core.on_frame(100.0);

    assert!(commits(&mid).is_empty());
    assert!(mid.contains(&Action::RequestFrame));
    let frame = last_frame(&mid).expect("render");
    assert!(frame.handle.x < 200.0 && frame.handle.x > 0.0);
    assert_eq!(frame.focal, NEUTRAL);
}

#[test]
fn click_animation_respects_configured_duration() {
    let mut core = PickerCore::new(150.0);
    core.set_image(Rect::new(0.0, 0.0, 400.0, 300.0));
    core.load_value("0.5 0.5");
    core.on_click(pt(0.0, 0.0));
    core.on_frame(1_000.0);
    assert!(core.on_frame(1_140.0).contains(&Action::RequestFrame));
    assert!(!commits(&core.on_frame(1_150.0)).is_empty());
}

#[test]
fn click_outside_image_is_contained() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(-20.0, 900.0));
    run_animation(&mut core);
    assert_eq!(core.focal, FocalPoint::new(0.0, 1.0));
}

#[test]
fn pointer_down_during_animation_takes_over() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(0.0, 0.0));
    core.on_frame(0.0);
    core.on_frame(100.0);
    let held = core.handle;

    core.on_pointer_down(MOUSE, held, Button::Primary);
    assert!(core.input.is_dragging());
    assert!(core.on_frame(400.0).is_empty());
    assert_eq!(core.handle, held);
}

#[test]
fn click_during_drag_is_ignored() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    assert!(core.on_click(pt(0.0, 0.0)).is_empty());
    assert!(core.input.is_dragging());
}

#[test]
fn frame_while_idle_does_nothing() {
    let mut core = core_with("0.5 0.5");
    assert!(core.on_frame(16.0).is_empty());
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_returns_to_neutral_and_commits() {
    let mut core = core_with("0.25 0.5");
    let actions = core.reset();
    assert_eq!(core.focal, NEUTRAL);
    assert_eq!(core.handle, pt(200.0, 150.0));
    assert_eq!(commits(&actions), vec!["0.5 0.5"]);
    assert!(!last_frame(&actions).expect("render").reset_enabled);
}

#[test]
fn reset_twice_matches_reset_once() {
    let mut core = core_with("0.1 0.9");
    let first = core.reset();
    let after_first = (core.focal, core.handle);
    let second = core.reset();

    assert_eq!((core.focal, core.handle), after_first);
    assert_eq!(last_frame(&first), last_frame(&second));
    assert!(!last_frame(&first).expect("render").reset_enabled);
}

#[test]
fn drag_then_dblclick_scenario() {
    let mut core = core_with("0.5 0.5");
    let drag = drag_by(&mut core, -100.0, 0.0);
    assert!(last_frame(&drag).expect("render").reset_enabled);

    let reset = core.reset();
    assert_eq!(core.focal, NEUTRAL);
    assert!(!last_frame(&reset).expect("render").reset_enabled);
}

#[test]
fn reset_mid_drag_hides_preview() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    core.on_pointer_move(MOUSE, pt(10.0, 10.0));
    let actions = core.reset();
    assert_eq!(actions.first(), Some(&Action::ShowPreview(false)));
    assert!(core.input.is_idle());
    assert!(core.on_pointer_up(MOUSE).is_empty());
}

#[test]
fn reset_cancels_animation() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(0.0, 0.0));
    core.reset();
    assert!(core.on_frame(1_000.0).is_empty());
    assert_eq!(core.focal, NEUTRAL);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_recomputes_handle_and_keeps_value() {
    let mut core = core_with("0.25 0.5");
    let actions = core.set_image(Rect::new(0.0, 0.0, 800.0, 600.0));
    let frame = last_frame(&actions).expect("render");

    assert_eq!(frame.handle, pt(200.0, 300.0));
    assert_eq!(frame.focal, FocalPoint::new(0.25, 0.5));
    assert_eq!(frame.preview_left(), "25%");
    assert!(commits(&actions).is_empty());
}

#[test]
fn resize_during_click_animation_commits_clicked_point() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(100.0, 150.0));
    core.on_frame(0.0);
    core.on_frame(32.0);
    core.set_image(Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut actions = Vec::new();
    let mut now = 48.0;
    while core.input.is_animating() {
        actions.extend(core.on_frame(now));
        now += 16.0;
    }
    assert_eq!(commits(&actions), vec!["0.25 0.5"]);
    assert_eq!(core.handle, pt(200.0, 300.0));
}

#[test]
fn resize_during_click_animation_keeps_handle_on_its_path() {
    let mut core = core_with("0.5 0.5");
    core.on_click(pt(0.0, 0.0));
    core.on_frame(0.0);
    core.on_frame(100.0);
    let before = core.handle;
    let frame = last_frame(&core.set_image(Rect::new(0.0, 0.0, 800.0, 600.0))).expect("render");
    assert!((frame.handle.x - before.x * 2.0).abs() < 1e-9);
    assert!((frame.handle.y - before.y * 2.0).abs() < 1e-9);
    assert!(core.input.is_animating());
}

#[test]
fn resize_during_drag_contains_handle() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    core.on_pointer_move(MOUSE, pt(380.0, 280.0));
    core.set_image(Rect::new(0.0, 0.0, 200.0, 150.0));
    assert_eq!(core.handle, pt(200.0, 150.0));
    assert!(core.input.is_dragging());
}

// =============================================================
// Queries / cancel
// =============================================================

#[test]
fn value_is_serialized_focal_point() {
    let core = core_with("30 60");
    assert_eq!(core.value(), "0.3 0.6");
}

#[test]
fn cancel_gesture_without_drag_is_silent() {
    let mut core = core_with("0.5 0.5");
    assert!(core.cancel_gesture().is_empty());
}

#[test]
fn cancel_gesture_mid_drag_hides_preview_without_commit() {
    let mut core = core_with("0.5 0.5");
    core.on_pointer_down(MOUSE, core.handle, Button::Primary);
    core.on_pointer_move(MOUSE, pt(100.0, 100.0));
    let actions = core.cancel_gesture();
    assert_eq!(actions, vec![Action::ShowPreview(false)]);
}
