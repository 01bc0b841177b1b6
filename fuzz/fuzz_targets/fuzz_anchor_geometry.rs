#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use snapdock_core::{
    ANCHOR_EVALUATION_ORDER, AnchorSet, Placement, Vector2, closest_by_angle,
    closest_by_distance, position_to_anchor,
};

#[derive(Debug, Arbitrary)]
struct PickerInput {
    anchor_mask: u8,
    margin: f64,
    element: (f64, f64),
    viewport: (f64, f64),
    position: (f64, f64),
    direction: (f64, f64),
    tie_epsilon: f64,
}

fuzz_target!(|input: PickerInput| {
    let anchors = ANCHOR_EVALUATION_ORDER
        .iter()
        .enumerate()
        .filter(|(i, _)| input.anchor_mask & (1 << i) != 0)
        .map(|(_, a)| *a);
    let Ok(set) = AnchorSet::new(anchors) else {
        // Empty mask.
        assert_eq!(input.anchor_mask, 0);
        return;
    };

    let placement = Placement::new(
        input.margin,
        Vector2::new(input.element.0, input.element.1),
        Vector2::new(input.viewport.0, input.viewport.1),
    );
    let position = Vector2::new(input.position.0, input.position.1);
    let direction = Vector2::new(input.direction.0, input.direction.1);

    // Pickers never leave the candidate set, whatever the floats.
    let by_distance = closest_by_distance(position, &set, &placement);
    assert!(set.contains(by_distance.anchor));
    let by_angle = closest_by_angle(position, direction, &set, &placement, input.tie_epsilon);
    assert!(set.contains(by_angle.anchor));

    let _ = position_to_anchor(position, &placement);
});
