//! Benchmarks for offset maintenance and scroll handling.
//!
//! Run with: cargo bench -p vlist

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vlist::{ItemRenderer, OffsetTable, ScrollVirtualizer, VirtualListConfig};
use vlist_core::geometry::Viewport;

struct Row;

impl ItemRenderer for Row {
    type Payload = u32;
    fn bind(&mut self, index: usize, payload: &u32) {
        black_box((index, payload));
    }
    fn position(&mut self, top: f32, height: f32, width: f32) {
        black_box((top, height, width));
    }
}

fn heights(n: usize) -> Vec<f32> {
    (0..n).map(|i| 80.0 + (i % 7) as f32 * 40.0).collect()
}

// ============================================================================
// Offset table
// ============================================================================

fn bench_offset_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset_table");

    for n in [1_000usize, 10_000, 100_000] {
        let hs = heights(n);

        group.bench_with_input(BenchmarkId::new("initialize", n), &hs, |b, hs| {
            b.iter(|| {
                let mut table = OffsetTable::new();
                table.initialize(black_box(hs), 8.0, 200.0).unwrap();
                black_box(table.total_content_height());
            })
        });

        let mut table = OffsetTable::new();
        table.initialize(&hs, 8.0, 200.0).unwrap();
        let total = table.total_content_height();

        group.bench_with_input(BenchmarkId::new("find_first_visible", n), &total, |b, &total| {
            let mut scroll = 0.0f32;
            b.iter(|| {
                scroll = (scroll + 997.0) % total;
                black_box(table.find_first_visible(black_box(scroll)));
            })
        });

        // Worst case: the change shifts every later offset.
        group.bench_with_input(BenchmarkId::new("set_height_head", n), &(), |b, _| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let h = if flip { 600.0 } else { 150.0 };
                black_box(table.set_height(0, h).unwrap());
            })
        });

        group.bench_with_input(BenchmarkId::new("set_height_tail", n), &(), |b, _| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let h = if flip { 600.0 } else { 150.0 };
                black_box(table.set_height(n - 1, h).unwrap());
            })
        });
    }

    group.finish();
}

// ============================================================================
// Virtualizer
// ============================================================================

fn ready(n: usize) -> ScrollVirtualizer<Vec<u32>, Row> {
    let mut list = ScrollVirtualizer::new(VirtualListConfig::default(), |_| Row).unwrap();
    list.set_source((0..n as u32).collect()).unwrap();
    list.set_viewport(Viewport::new(0.0, 900.0, 400.0)).unwrap();
    list
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtualizer/scroll");

    for n in [1_000usize, 100_000] {
        let mut list = ready(n);
        let total = list.total_content_height();

        group.bench_with_input(BenchmarkId::new("small_delta", n), &(), |b, _| {
            let mut offset = 0.0f32;
            b.iter(|| {
                offset = (offset + 3.0) % total;
                list.on_scroll(black_box(offset)).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("jump", n), &(), |b, _| {
            let mut offset = 0.0f32;
            b.iter(|| {
                offset = (offset + 7_919.0) % total;
                list.on_scroll(black_box(offset)).unwrap();
                black_box(list.drain_visibility_events());
            })
        });
    }

    group.finish();
}

fn bench_height_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtualizer/height_change");

    for n in [1_000usize, 100_000] {
        let mut list = ready(n);

        group.bench_with_input(BenchmarkId::new("bound_item", n), &(), |b, _| {
            let mut step = 0u32;
            b.iter(|| {
                step = (step + 1) % 10;
                list.on_height_change(2, 150.0 + 45.0 * step as f32).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_offset_table, bench_scroll, bench_height_change);
criterion_main!(benches);
