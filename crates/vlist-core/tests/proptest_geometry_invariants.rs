//! Property-based invariant tests for content-space geometry.
//!
//! 1. Intersection is commutative.
//! 2. `intersects` agrees with `intersection_opt`.
//! 3. Intersection result fits within both inputs.
//! 4. Vertically adjacent rectangles never intersect.
//! 5. Height tweens stay within their endpoints.

use std::time::Duration;

use proptest::prelude::*;
use vlist_core::animation::{Animation, HeightTween};
use vlist_core::geometry::Rect;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        0.0f32..5000.0,
        0.0f32..5000.0,
        0.0f32..1000.0,
        0.0f32..1000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersects_agrees_with_intersection_opt(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(
            a.intersects(&b),
            a.intersection_opt(&b).is_some(),
            "a={:?} b={:?}",
            a,
            b
        );
    }

    #[test]
    fn intersection_fits_within_both(a in rect_strategy(), b in rect_strategy()) {
        if let Some(inter) = a.intersection_opt(&b) {
            prop_assert!(inter.left() >= a.left() && inter.left() >= b.left());
            prop_assert!(inter.top() >= a.top() && inter.top() >= b.top());
            prop_assert!(inter.right() <= a.right() + 1e-3 && inter.right() <= b.right() + 1e-3);
            prop_assert!(inter.bottom() <= a.bottom() + 1e-3 && inter.bottom() <= b.bottom() + 1e-3);
        }
    }

    #[test]
    fn stacked_rects_never_intersect(y in 0u16..5000, h1 in 1u16..500, h2 in 1u16..500) {
        let top = Rect::new(0.0, f32::from(y), 100.0, f32::from(h1));
        let below = Rect::new(0.0, top.bottom(), 100.0, f32::from(h2));
        prop_assert!(!top.intersects(&below));
    }

    #[test]
    fn tween_stays_within_endpoints(
        from in 1.0f32..2000.0,
        to in 1.0f32..2000.0,
        steps in proptest::collection::vec(0u64..100, 1..40),
    ) {
        let mut tween = HeightTween::new(from, to, Duration::from_millis(350));
        let lo = from.min(to) - 1e-3;
        let hi = from.max(to) + 1e-3;
        for ms in steps {
            tween.tick(Duration::from_millis(ms));
            let h = tween.height();
            prop_assert!(h >= lo && h <= hi, "h={} outside [{}, {}]", h, lo, hi);
        }
    }
}
