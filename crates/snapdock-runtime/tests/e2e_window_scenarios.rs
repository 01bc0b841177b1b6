//! End-to-end window scenarios driven through the public controller API.

use std::time::Duration;

use snapdock_core::{Anchor, AnchorSet, Placement, Vector2, anchor_to_position};
use snapdock_runtime::{
    FixedTickLoop, MotionEffect, MotionEvent, MotionPhase, ResizeConfig, WindowConfig,
    WindowMotionController,
};

const VIEWPORT: Vector2 = Vector2::new(1000.0, 800.0);

fn window(anchors: &[Anchor]) -> WindowMotionController {
    let config = WindowConfig::new(AnchorSet::new(anchors.iter().copied()).unwrap())
        .with_margin(15.0)
        .with_element_size(Vector2::new(100.0, 100.0));
    WindowMotionController::new(config, VIEWPORT).unwrap()
}

fn placement(c: &WindowMotionController) -> Placement {
    Placement::new(c.config().margin, c.size(), c.viewport())
}

/// Drag by `total` split into `steps` equal pointer moves.
fn drag_by(c: &mut WindowMotionController, total: Vector2, steps: u32) {
    let origin = Vector2::new(50.0, 50.0);
    c.drag_start(origin);
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        c.drag_move(origin + total * t);
        c.tick(Duration::from_millis(16));
    }
}

#[test]
fn slow_drag_snaps_to_nearest_anchor() {
    let mut c = window(&[Anchor::NW, Anchor::NE]);
    assert_eq!(c.geometry().position, Vector2::new(15.0, 15.0));

    drag_by(&mut c, Vector2::new(500.0, 0.0), 200);
    let effect = c.drag_end();
    assert_eq!(
        effect,
        MotionEffect::Released {
            anchor: Anchor::NE,
            target: Vector2::new(885.0, 15.0),
            flick: false,
        }
    );

    let report = FixedTickLoop::default().run_until_settled(&mut c, 10_000);
    assert!(report.settled);
    assert_eq!(c.geometry().position, Vector2::new(885.0, 15.0));
    assert_eq!(c.phase(), MotionPhase::Idle);
}

#[test]
fn slow_short_drag_returns_home() {
    let mut c = window(&[Anchor::NW, Anchor::NE]);
    drag_by(&mut c, Vector2::new(300.0, 0.0), 100);
    assert!(matches!(
        c.drag_end(),
        MotionEffect::Released {
            anchor: Anchor::NW,
            ..
        }
    ));
    FixedTickLoop::default().run_until_settled(&mut c, 10_000);
    assert_eq!(c.geometry().position, Vector2::new(15.0, 15.0));
    assert!(c.drain_events().iter().all(|e| !matches!(e, MotionEvent::AnchorChanged { .. })));
}

#[test]
fn flick_right_beats_nearer_anchor() {
    let mut c = window(&[Anchor::NW, Anchor::SW, Anchor::E]);
    // Move near SW first.
    drag_by(&mut c, Vector2::new(25.0, 485.0), 200);
    c.drag_end();
    FixedTickLoop::default().run_until_settled(&mut c, 10_000);
    assert_eq!(c.anchor(), Anchor::SW);

    // Short fast throw to the right: SW is still nearest, E is where it's going.
    drag_by(&mut c, Vector2::new(60.0, 0.0), 3);
    let effect = c.drag_end();
    assert!(matches!(
        effect,
        MotionEffect::Released {
            anchor: Anchor::E,
            flick: true,
            ..
        }
    ));
    FixedTickLoop::default().run_until_settled(&mut c, 10_000);
    assert_eq!(
        c.geometry().position,
        anchor_to_position(Anchor::E, &placement(&c))
    );
}

#[test]
fn viewport_shrink_keeps_se_anchor() {
    let mut c = window(&[Anchor::SE, Anchor::NW]);
    assert_eq!(c.geometry().position, Vector2::new(885.0, 685.0));

    c.viewport_resized(Vector2::new(640.0, 480.0));
    assert_eq!(c.anchor(), Anchor::SE);
    assert_eq!(c.geometry().position, Vector2::new(525.0, 365.0));
    assert!(!c.needs_frame());
}

#[test]
fn resize_past_range_clamps_to_max() {
    let config = WindowConfig::new(AnchorSet::new([Anchor::NW]).unwrap())
        .with_resize(ResizeConfig::default());
    let mut c = WindowMotionController::new(config, Vector2::new(1920.0, 1080.0)).unwrap();
    let resize = c.config().resize.unwrap();
    assert_eq!(c.resize_handle(), Some(Anchor::SE));

    let grab = Vector2::new(15.0 + 480.0, 15.0 + 270.0);
    c.resize_start(grab);
    let overshoot = resize.max_width - resize.min_width + 50.0;
    c.resize_move(grab + Vector2::new(overshoot, 0.0));
    c.resize_end();

    let size = c.size();
    assert_eq!(size.x, resize.max_width);
    assert_eq!(size.y, resize.max_width / resize.aspect_ratio);
    // Pinned at NW: position does not move.
    assert_eq!(c.geometry().position, Vector2::new(15.0, 15.0));
    assert_eq!(
        c.drain_events(),
        vec![MotionEvent::Resized { size }]
    );
}

#[test]
fn grabbing_a_gliding_window_holds_it_in_place() {
    let mut c = window(&[Anchor::NW, Anchor::NE]);
    drag_by(&mut c, Vector2::new(600.0, 0.0), 100);
    c.drag_end();
    for _ in 0..10 {
        c.step();
    }
    let drawn = c.state().current_pos;
    c.drag_start(Vector2::new(400.0, 60.0));
    assert_eq!(c.state().target_pos, drawn);
    c.step();
    assert_eq!(c.state().current_pos, drawn);
}
