//! Property tests for geometry and animation invariants.

use std::time::Duration;

use flowdeck_core::animation::{Animation, Fade, Pulse, stagger_offsets};
use flowdeck_core::geometry::{Point, Rect};
use proptest::prelude::*;

proptest! {
    // --- Geometry ---

    #[test]
    fn distance_is_symmetric(
        ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
        bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let d1 = a.distance_to(b);
        let d2 = b.distance_to(a);
        prop_assert!((d1 - d2).abs() < 1e-3);
        prop_assert!(d1 >= 0.0);
    }

    #[test]
    fn intersection_never_exceeds_either_rect(
        ax in 0.0f32..500.0, ay in 0.0f32..500.0,
        aw in 0.0f32..500.0, ah in 0.0f32..500.0,
        bx in 0.0f32..500.0, by in 0.0f32..500.0,
        bw in 0.0f32..500.0, bh in 0.0f32..500.0,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        let i = a.intersection(&b);
        prop_assert!(i.area() <= a.area() + 1e-3);
        prop_assert!(i.area() <= b.area() + 1e-3);
    }

    #[test]
    fn visible_fraction_in_unit_range(
        sx in 0.0f32..500.0, sy in 0.0f32..500.0,
        sw in 0.0f32..500.0, sh in 0.0f32..500.0,
        vh in 0.0f32..2000.0,
    ) {
        let section = Rect::new(sx, sy, sw, sh);
        let viewport = Rect::new(0.0, 0.0, 1000.0, vh);
        let f = section.visible_fraction(&viewport);
        prop_assert!((0.0..=1.0).contains(&f));
    }

    // --- Animation ---

    #[test]
    fn fade_value_in_unit_range_under_any_ticks(ticks in prop::collection::vec(0u64..200, 0..32)) {
        let mut fade = Fade::new(Duration::from_millis(300));
        for t in ticks {
            fade.tick(Duration::from_millis(t));
            let v = fade.value();
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn pulse_value_in_unit_range(ticks in prop::collection::vec(0u64..5000, 0..32)) {
        let mut pulse = Pulse::new(Duration::from_millis(3000));
        for t in ticks {
            pulse.tick(Duration::from_millis(t));
            let v = pulse.value();
            prop_assert!((-1e-3..=1.0 + 1e-3).contains(&v));
        }
    }

    #[test]
    fn stagger_offsets_monotonic(count in 0usize..64, base in 0u64..500, step in 0u64..500) {
        let offsets = stagger_offsets(
            count,
            Duration::from_millis(base),
            Duration::from_millis(step),
        );
        prop_assert_eq!(offsets.len(), count);
        for pair in offsets.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}
