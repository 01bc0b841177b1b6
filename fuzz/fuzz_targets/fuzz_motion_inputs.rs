#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snapdock_core::{AnchorSet, Placement, Vector2, anchor_to_position};
use snapdock_runtime::{FixedTickLoop, ResizeConfig, WindowConfig, WindowMotionController};

#[derive(Debug, Arbitrary)]
enum Op {
    DragStart(i16, i16),
    DragMove(i16, i16),
    DragEnd,
    DragCancel,
    ResizeStart(i16, i16),
    ResizeMove(i16, i16),
    ResizeEnd,
    Viewport(u16, u16),
    Tick(u8),
}

#[derive(Debug, Arbitrary)]
struct MotionInput {
    resizable: bool,
    ops: Vec<Op>,
}

fn point(x: i16, y: i16) -> Vector2 {
    Vector2::new(f64::from(x), f64::from(y))
}

fuzz_target!(|input: MotionInput| {
    let mut config = WindowConfig::new(AnchorSet::all());
    if input.resizable {
        config = config.with_resize(ResizeConfig::default());
    }
    let Ok(mut controller) = WindowMotionController::new(config, Vector2::new(1280.0, 720.0))
    else {
        return;
    };

    for op in input.ops.iter().take(512) {
        let _effect = match *op {
            Op::DragStart(x, y) => controller.drag_start(point(x, y)),
            Op::DragMove(x, y) => controller.drag_move(point(x, y)),
            Op::DragEnd => controller.drag_end(),
            Op::DragCancel => controller.drag_cancel(),
            Op::ResizeStart(x, y) => controller.resize_start(point(x, y)),
            Op::ResizeMove(x, y) => controller.resize_move(point(x, y)),
            Op::ResizeEnd => controller.resize_end(),
            Op::Viewport(w, h) => {
                controller.viewport_resized(Vector2::new(f64::from(w), f64::from(h)))
            }
            Op::Tick(ms) => controller.tick(Duration::from_millis(u64::from(ms))),
        };
        let state = controller.state();
        assert!(!(state.is_dragging && state.is_resizing), "drag and resize overlap");
        assert!(state.current_pos.is_finite(), "position went non-finite");
        assert!(controller.config().anchors.contains(state.current_anchor));
    }

    // Once released, the window always comes to rest.
    let _ = controller.drag_end();
    let _ = controller.resize_end();
    let report = FixedTickLoop::default().run_until_settled(&mut controller, 100_000);
    // Zero ticks means the window was already at rest.
    assert!(report.settled || report.ticks == 0, "window never settled");
    assert!(!controller.needs_frame());
    let placement = Placement::new(
        controller.config().margin,
        controller.size(),
        controller.viewport(),
    );
    assert_eq!(
        controller.geometry().position,
        anchor_to_position(controller.anchor(), &placement),
        "resting window is off its anchor"
    );
});
