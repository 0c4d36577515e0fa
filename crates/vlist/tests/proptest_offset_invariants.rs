//! Property-based invariant tests for the offset table and virtualizer.
//!
//! 1. Offsets follow the prefix-sum recurrence and strictly increase.
//! 2. Content height is the last item's bottom plus end padding.
//! 3. `find_first_visible` agrees with a linear scan.
//! 4. A height change never moves offsets at or before the changed index.
//! 5. After any event sequence the pool binds exactly the window
//!    `first..min(first + pool_size, N)`, each index in at most one slot.
//! 6. Visibility events alternate per slot.

use std::collections::HashSet;

use proptest::prelude::*;
use vlist::{ItemRenderer, OffsetTable, ScrollVirtualizer, VirtualListConfig};
use vlist_core::geometry::Viewport;

// ── Helpers ─────────────────────────────────────────────────────────────

fn heights_strategy() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(1.0f32..500.0, 1..200)
}

fn table(heights: &[f32], spacing: f32, padding: f32) -> OffsetTable {
    let mut table = OffsetTable::new();
    table.initialize(heights, spacing, padding).unwrap();
    table
}

#[derive(Debug, Clone)]
enum Event {
    Scroll(f32),
    Height(usize, f32),
    Relayout,
}

fn event_strategy(n: usize) -> impl Strategy<Value = Event> {
    prop_oneof![
        (-100.0f32..60_000.0).prop_map(Event::Scroll),
        (0..n, 0.0f32..900.0).prop_map(|(i, h)| Event::Height(i, h)),
        Just(Event::Relayout),
    ]
}

struct Null;

impl ItemRenderer for Null {
    type Payload = u16;
    fn bind(&mut self, _index: usize, _payload: &u16) {}
    fn position(&mut self, _top: f32, _height: f32, _width: f32) {}
}

proptest! {
    #[test]
    fn offsets_follow_recurrence(
        heights in heights_strategy(),
        spacing in 0.0f32..64.0,
        padding in 0.0f32..400.0,
    ) {
        let t = table(&heights, spacing, padding);
        prop_assert_eq!(t.offsets()[0], 0.0);
        for i in 1..t.len() {
            let expected = t.offsets()[i - 1] + t.heights()[i - 1] + spacing;
            prop_assert_eq!(t.offsets()[i], expected);
            prop_assert!(t.offsets()[i] > t.offsets()[i - 1]);
        }
        let last = t.len() - 1;
        prop_assert_eq!(
            t.total_content_height(),
            t.offsets()[last] + t.heights()[last] + padding
        );
    }

    #[test]
    fn first_visible_matches_linear_scan(
        heights in heights_strategy(),
        spacing in 0.0f32..64.0,
        frac in 0.0f32..1.2,
    ) {
        let t = table(&heights, spacing, 0.0);
        let scroll = t.total_content_height() * frac;
        let expected = (0..t.len())
            .find(|&i| t.offsets()[i] + t.heights()[i] >= scroll)
            .unwrap_or(t.len() - 1);
        prop_assert_eq!(t.find_first_visible(scroll), expected);
    }

    #[test]
    fn height_change_is_forward_only(
        heights in heights_strategy(),
        pick in any::<prop::sample::Index>(),
        new_height in -50.0f32..900.0,
    ) {
        let mut t = table(&heights, 8.0, 100.0);
        let k = pick.index(t.len());
        let before: Vec<f32> = t.offsets().to_vec();
        t.set_height(k, new_height).unwrap();
        prop_assert_eq!(&t.offsets()[..=k], &before[..=k]);
        prop_assert!(t.height(k).unwrap() >= 1.0);
    }

    #[test]
    fn pool_binds_exactly_the_window(
        n in 0usize..300,
        viewport_height in 50.0f32..1500.0,
        seed_events in prop::collection::vec(event_strategy(300), 0..40),
    ) {
        let config = VirtualListConfig::default().spacing(8.0).end_padding(50.0);
        let mut list: ScrollVirtualizer<Vec<u16>, Null> = ScrollVirtualizer::new(config, |_| Null).unwrap();
        list.set_source((0..n as u16).collect()).unwrap();
        list.set_viewport(Viewport::new(0.0, viewport_height, 320.0)).unwrap();
        let pool = list.pool_size();

        for event in seed_events {
            match event {
                Event::Scroll(offset) => list.on_scroll(offset).unwrap(),
                Event::Height(i, h) if i < n => list.on_height_change(i, h).unwrap(),
                Event::Height(..) => {}
                Event::Relayout => list.relayout().unwrap(),
            }

            prop_assert_eq!(list.pool_size(), pool);
            let window = list.bound_range();
            prop_assert!(window.len() <= pool);
            prop_assert_eq!(window.len(), n.min(pool));

            let mut seen = HashSet::new();
            for slot in 0..pool {
                if let Some(index) = list.pool().bound_index(slot).unwrap() {
                    prop_assert!(window.contains(&index));
                    prop_assert!(seen.insert(index), "index {} bound twice", index);
                }
            }
            prop_assert_eq!(seen.len(), window.len());
        }
    }

    #[test]
    fn visibility_events_alternate_without_force(
        scrolls in prop::collection::vec(0.0f32..20_000.0, 1..60),
    ) {
        let mut list: ScrollVirtualizer<Vec<u16>, Null> = ScrollVirtualizer::new(VirtualListConfig::default(), |_| Null).unwrap();
        list.set_source((0..120u16).collect()).unwrap();
        list.set_viewport(Viewport::new(0.0, 700.0, 300.0)).unwrap();

        let mut last: Vec<Option<bool>> = vec![None; list.pool_size()];
        for event in list.drain_visibility_events() {
            last[event.slot] = Some(event.visible);
        }
        for offset in scrolls {
            list.on_scroll(offset).unwrap();
            for event in list.drain_visibility_events() {
                prop_assert_ne!(last[event.slot], Some(event.visible));
                last[event.slot] = Some(event.visible);
            }
        }
    }
}
