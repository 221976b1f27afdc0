//! Criterion benchmarks for [`NavigationPlanner`] and [`transliterate`].
//!
//! Planning runs before every text-send, so it should stay far below the
//! per-keystroke pacing delay (150 ms by default).
//!
//! Run with:
//! ```bash
//! cargo bench --package bravia-core --bench planner_bench
//! ```

use bravia_core::{transliterate, GridPos, LayoutKind, NavigationPlanner};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ── Benchmarks: single route ──────────────────────────────────────────────────

/// Benchmarks the longest routes on each built-in keyboard.
fn bench_route_corner_to_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");

    let latin = NavigationPlanner::new(LayoutKind::Latin.layout());
    group.bench_function("latin_0_to_G", |b| {
        b.iter(|| latin.route(black_box(GridPos::new(0, 5)), black_box(GridPos::new(6, 0))))
    });

    let japanese = NavigationPlanner::new(LayoutKind::Japanese.layout());
    group.bench_function("japanese_o_to_long_vowel", |b| {
        b.iter(|| {
            japanese.route(black_box(GridPos::new(0, 4)), black_box(GridPos::new(10, 3)))
        })
    });

    group.finish();
}

// ── Benchmarks: whole text ────────────────────────────────────────────────────

/// Benchmarks transliteration plus planning for texts of increasing length.
fn bench_plan_text_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_text_scaling");

    for &len in &[8usize, 64, 256] {
        let latin_text: String = "HELLO WORLD 2024 ".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::new("latin", len), &latin_text, |b, text| {
            b.iter(|| {
                let t = transliterate(black_box(text));
                NavigationPlanner::new(t.layout.layout()).plan_text(t.chars)
            })
        });

        let kana_text: String = "きゃっとがぱんだ".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::new("japanese", len), &kana_text, |b, text| {
            b.iter(|| {
                let t = transliterate(black_box(text));
                NavigationPlanner::new(t.layout.layout()).plan_text(t.chars)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_route_corner_to_corner, bench_plan_text_scaling);
criterion_main!(benches);
