//! Benchmark tests for the toggle switch.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use swivel_core::{Constraints, RecordingCanvas, Rect, Widget};
use swivel_widgets::ToggleSwitch;

fn bench_switch_transition(c: &mut Criterion) {
    c.bench_function("switch_tap_to_settle", |b| {
        b.iter(|| {
            let mut switch = ToggleSwitch::default();
            switch.tap();
            while switch.is_animating() {
                black_box(switch.tick(Duration::from_millis(16)));
            }
            switch.is_on()
        })
    });
}

fn bench_switch_measure(c: &mut Criterion) {
    let switch = ToggleSwitch::default();
    let constraints = Constraints::new(0.0, 200.0, 0.0, 50.0);

    c.bench_function("switch_measure", |b| {
        b.iter(|| switch.measure(black_box(constraints)))
    });
}

fn bench_switch_paint(c: &mut Criterion) {
    let mut switch = ToggleSwitch::default().active_text("ON").inactive_text("OFF");
    switch.layout(Rect::new(0.0, 0.0, 55.0, 25.0));
    switch.tap();
    switch.tick(Duration::from_millis(80));

    c.bench_function("switch_paint_mid_transition", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            switch.paint(&mut canvas);
            black_box(canvas.command_count())
        })
    });
}

criterion_group!(
    benches,
    bench_switch_transition,
    bench_switch_measure,
    bench_switch_paint
);
criterion_main!(benches);
