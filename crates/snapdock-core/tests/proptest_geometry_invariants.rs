//! Property tests for vector math, anchor placement and resize geometry.

use proptest::prelude::*;
use snapdock_core::{
    Anchor, AnchorSet, Placement, ResizeLimits, Vector2, anchor_to_position, closest_by_angle,
    closest_by_distance, position_to_anchor, resized_size, width_from_target,
};

fn vector(range: f64) -> impl Strategy<Value = Vector2> {
    (-range..range, -range..range).prop_map(|(x, y)| Vector2::new(x, y))
}

fn anchor() -> impl Strategy<Value = Anchor> {
    prop::sample::select(Anchor::ALL.to_vec())
}

fn anchor_set() -> impl Strategy<Value = AnchorSet> {
    prop::collection::vec(anchor(), 1..8)
        .prop_map(|anchors| AnchorSet::new(anchors).expect("non-empty by construction"))
}

/// Placements where all eight anchor positions are distinct.
fn placement() -> impl Strategy<Value = Placement> {
    (
        0.0f64..60.0,
        10.0f64..400.0,
        10.0f64..400.0,
        20.0f64..2000.0,
        20.0f64..2000.0,
    )
        .prop_map(|(margin, ew, eh, extra_w, extra_h)| {
            Placement::new(
                margin,
                Vector2::new(ew, eh),
                Vector2::new(ew + 2.0 * margin + extra_w, eh + 2.0 * margin + extra_h),
            )
        })
}

fn limits() -> impl Strategy<Value = ResizeLimits> {
    (50.0f64..500.0, 0.0f64..1500.0, 0.5f64..3.0).prop_map(|(min, span, aspect)| {
        ResizeLimits::new(min, min + span, aspect)
    })
}

proptest! {
    #[test]
    fn anchor_round_trips_through_position(anchor in anchor(), placement in placement()) {
        let position = anchor_to_position(anchor, &placement);
        prop_assert_eq!(position_to_anchor(position, &placement), anchor);
    }

    #[test]
    fn normalize_is_unit_or_zero(v in vector(1e6)) {
        let n = v.normalize();
        if v.magnitude() == 0.0 {
            prop_assert_eq!(n, Vector2::ZERO);
        } else {
            prop_assert!((n.magnitude() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn angle_to_is_symmetric(a in vector(1e4), b in vector(1e4)) {
        let ab = a.angle_to(b);
        let ba = b.angle_to(a);
        prop_assert!(!ab.is_nan());
        prop_assert_eq!(ab, ba);
        prop_assert!((0.0..=std::f64::consts::PI).contains(&ab));
    }

    #[test]
    fn angle_to_self_is_zero(v in vector(1e4)) {
        prop_assert!(v.angle_to(v).abs() < 1e-6);
    }

    #[test]
    fn lerp_hits_endpoints(a in vector(1e4), b in vector(1e4)) {
        prop_assert_eq!(a.lerp(b, 0.0), a);
        prop_assert!(a.lerp(b, 1.0).distance(b) < 1e-6);
    }

    #[test]
    fn resized_width_stays_in_bounds(
        direction in anchor(),
        limits in limits(),
        start_width in 0.0f64..2000.0,
        delta in vector(1e7),
    ) {
        let start = Vector2::new(start_width, start_width / limits.aspect_ratio);
        let size = resized_size(direction, start, delta, &limits);
        prop_assert!(size.x >= limits.min_width && size.x <= limits.max_width);
        prop_assert!((size.y - size.x / limits.aspect_ratio).abs() < 1e-9);
    }

    #[test]
    fn width_from_target_stays_in_bounds(limits in limits(), width in -1e9f64..1e9) {
        let size = width_from_target(width, &limits);
        prop_assert!(size.x >= limits.min_width && size.x <= limits.max_width);
    }

    #[test]
    fn pickers_return_members(
        set in anchor_set(),
        placement in placement(),
        from in vector(3000.0),
        direction in vector(10.0),
    ) {
        let by_distance = closest_by_distance(from, &set, &placement);
        prop_assert!(set.contains(by_distance.anchor));
        prop_assert_eq!(by_distance.position, anchor_to_position(by_distance.anchor, &placement));

        let by_angle = closest_by_angle(from, direction, &set, &placement, 0.1);
        prop_assert!(set.contains(by_angle.anchor));
        prop_assert!(by_angle.position.is_finite());
    }

    #[test]
    fn closest_by_angle_is_order_independent(
        set in anchor_set(),
        placement in placement(),
        from in vector(3000.0),
        direction in vector(10.0),
        rotate in 0usize..8,
    ) {
        let mut reordered = set.as_slice().to_vec();
        reordered.reverse();
        let len = reordered.len();
        reordered.rotate_left(rotate % len);
        let other = AnchorSet::new(reordered).expect("same anchors");

        let a = closest_by_angle(from, direction, &set, &placement, 0.1);
        let b = closest_by_angle(from, direction, &other, &placement, 0.1);
        if a.anchor != b.anchor {
            // Only an exact distance tie inside the near-tie band may differ.
            prop_assert_eq!(from.distance(a.position), from.distance(b.position));
        }
    }

    #[test]
    fn closest_by_distance_is_minimal(set in anchor_set(), placement in placement(), from in vector(3000.0)) {
        let pick = closest_by_distance(from, &set, &placement);
        let best = from.distance(pick.position);
        for anchor in set.iter() {
            prop_assert!(best <= from.distance(anchor_to_position(anchor, &placement)));
        }
    }
}

#[test]
fn scenario_release_near_ne_snaps_to_ne() {
    let placement = Placement::new(15.0, Vector2::new(100.0, 100.0), Vector2::new(1000.0, 800.0));
    let set = AnchorSet::new([Anchor::NW, Anchor::NE]).unwrap();
    let start = anchor_to_position(Anchor::NW, &placement);
    assert_eq!(start, Vector2::new(15.0, 15.0));
    // (515, 15) is 370 from NE and 500 from NW.
    let released = start + Vector2::new(500.0, 0.0);
    assert_eq!(closest_by_distance(released, &set, &placement).anchor, Anchor::NE);
}

#[test]
fn scenario_flick_right_beats_nearer_anchor() {
    let placement = Placement::new(15.0, Vector2::new(100.0, 100.0), Vector2::new(1000.0, 800.0));
    let set = AnchorSet::new([Anchor::NW, Anchor::SW, Anchor::E]).unwrap();
    let from = Vector2::new(40.0, 500.0);
    assert_eq!(closest_by_distance(from, &set, &placement).anchor, Anchor::SW);
    let pick = closest_by_angle(from, Vector2::new(1.0, 0.0), &set, &placement, 0.1);
    assert_eq!(pick.anchor, Anchor::E);
}

#[test]
fn scenario_resize_past_range_clamps_to_max() {
    let limits = ResizeLimits::new(240.0, 960.0, 16.0 / 9.0);
    let start = width_from_target(480.0, &limits);
    let overshoot = (limits.max_width - limits.min_width) + 50.0;
    let size = resized_size(Anchor::NW, start, Vector2::new(overshoot, 0.0), &limits);
    assert_eq!(size.x, limits.max_width);
    assert_eq!(size.y, limits.max_width / limits.aspect_ratio);
}
