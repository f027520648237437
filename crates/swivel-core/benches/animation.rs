//! Benchmark tests for animation primitives.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use swivel_core::{AnimationController, AnimationSpec, Color, Interpolation, SpringConfig};

fn bench_spring_response(c: &mut Criterion) {
    c.bench_function("spring_response", |b| {
        b.iter(|| SpringConfig::WOBBLY.response(black_box(0.37)))
    });
}

fn bench_color_interpolation(c: &mut Criterion) {
    let map = Interpolation::new((-55.0, 55.0), (Color::WHITE, Color::BLACK));
    c.bench_function("color_interpolation", |b| b.iter(|| map.map(black_box(12.5))));
}

fn bench_batch_tick(c: &mut Criterion) {
    c.bench_function("batch_tick_to_completion", |b| {
        b.iter(|| {
            let mut ctrl = AnimationController::new();
            let duration = Duration::from_millis(200);
            ctrl.start_batch([
                (0u8, 0.0, AnimationSpec::spring(duration, SpringConfig::WOBBLY)),
                (1u8, 55.0, AnimationSpec::timing(duration)),
                (2u8, 55.0, AnimationSpec::timing(duration)),
            ]);
            while ctrl.is_animating() {
                black_box(ctrl.tick(Duration::from_millis(16)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_spring_response,
    bench_color_interpolation,
    bench_batch_tick
);
criterion_main!(benches);
