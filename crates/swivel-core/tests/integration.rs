//! Integration tests for swivel-core.
//!
//! These tests verify the public API works correctly end-to-end.

use std::time::Duration;
use swivel_core::{
    AnimationController, AnimationSpec, Canvas, Color, DrawCommand, Interpolation, Point,
    RecordingCanvas, Rect, SpringConfig, Transform2D,
};

// =============================================================================
// Color Integration Tests
// =============================================================================

#[test]
fn test_color_hex_with_alpha() {
    let parsed = Color::parse("#8FFFA080").expect("valid hex");
    assert_eq!(parsed.with_alpha(1.0), Color::from_rgb8(143, 255, 160));
    assert!((parsed.a - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_color_notations_agree() {
    let functional = Color::parse("rgb(143, 255, 160)").expect("valid rgb()");
    let hex = Color::parse("#8fffa0").expect("valid hex");
    assert_eq!(functional, hex);
}

// =============================================================================
// Animation Integration Tests
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Channel {
    Offset,
    Mix,
}

#[test]
fn test_parallel_batch_drives_color_interpolation() {
    let inactive = Color::from_rgb8(204, 205, 210);
    let active = Color::from_rgb8(143, 255, 160);
    let colors = Interpolation::new((-55.0, 55.0), (inactive, active));

    let mut ctrl = AnimationController::new();
    ctrl.insert(Channel::Offset, -28.0);
    ctrl.insert(Channel::Mix, -55.0);

    let duration = Duration::from_millis(200);
    let batch = ctrl.start_batch([
        (
            Channel::Offset,
            0.0,
            AnimationSpec::spring(duration, SpringConfig::WOBBLY),
        ),
        (Channel::Mix, 55.0, AnimationSpec::timing(duration)),
    ]);

    let mut completed = Vec::new();
    let mut saw_blend = false;
    for _ in 0..20 {
        completed.extend(ctrl.tick(Duration::from_millis(16)));
        let color = colors.map(ctrl.get(Channel::Mix).expect("registered"));
        if color != inactive && color != active {
            saw_blend = true;
        }
    }

    assert!(saw_blend, "color should pass through blended values");
    assert_eq!(completed, vec![batch]);
    assert_eq!(ctrl.get(Channel::Offset), Some(0.0));
    assert_eq!(colors.map(ctrl.get(Channel::Mix).expect("registered")), active);
}

#[test]
fn test_batch_survives_oversized_frame() {
    let mut ctrl = AnimationController::new();
    ctrl.insert(0u8, -28.0);
    let batch = ctrl.start_batch([(
        0u8,
        0.0,
        AnimationSpec::spring(Duration::from_millis(200), SpringConfig::WOBBLY),
    )]);

    assert!(ctrl.tick(Duration::from_millis(16)).is_empty());
    assert_eq!(ctrl.tick(Duration::MAX), vec![batch]);
    assert_eq!(ctrl.get(0u8), Some(0.0));
}

// =============================================================================
// Canvas Integration Tests
// =============================================================================

#[test]
fn test_recording_canvas_translated_clip() {
    let mut canvas = RecordingCanvas::new();
    let track = Rect::new(0.0, 0.0, 55.0, 25.0);
    canvas.push_clip(track);
    canvas.push_transform(Transform2D::translate(-28.0, 0.0));
    canvas.fill_circle(Point::new(41.25, 12.5), 11.5, Color::WHITE);
    canvas.pop_transform();
    canvas.pop_clip();

    match &canvas.commands()[0] {
        DrawCommand::Clip { bounds, child } => {
            assert_eq!(*bounds, track);
            assert!(matches!(
                child.as_ref(),
                DrawCommand::Circle { center, .. } if *center == Point::new(13.25, 12.5)
            ));
        }
        other => panic!("expected clip, got {other:?}"),
    }
}
