//! Tap recognition from press/release events.
//!
//! A tap is a press inside the target bounds followed by a release inside the
//! bounds that has not strayed further than the slop distance. Mouse (left
//! button) and touch input are treated alike; a host-recognized
//! [`Event::GestureTap`] inside the bounds counts directly.

use crate::event::{Event, MouseButton, TouchId};
use crate::geometry::{Point, Rect};

/// Configuration for tap recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapConfig {
    /// Maximum movement between press and release for a tap to still be valid.
    pub tap_slop: f32,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self { tap_slop: 10.0 }
    }
}

/// Which input armed the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Mouse,
    Touch(TouchId),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    pointer: Pointer,
    start: Point,
}

/// Recognizes single taps against a target rectangle.
#[derive(Debug, Clone, Default)]
pub struct TapRecognizer {
    config: TapConfig,
    press: Option<Press>,
}

impl TapRecognizer {
    /// Create a recognizer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with custom configuration.
    #[must_use]
    pub fn with_config(config: TapConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Whether a press is currently being tracked.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Feed an event; returns the tap position when a tap completes.
    pub fn process(&mut self, event: &Event, target: Rect) -> Option<Point> {
        match event {
            Event::GestureTap { position, .. } => {
                self.press = None;
                target.contains_point(position).then_some(*position)
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.arm(Pointer::Mouse, *position, target);
                None
            }
            Event::TouchStart { id, position } => {
                self.arm(Pointer::Touch(*id), *position, target);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => self.release(Pointer::Mouse, *position, target),
            Event::TouchEnd { id, position } => self.release(Pointer::Touch(*id), *position, target),
            Event::TouchCancel { id } => {
                if self.press.is_some_and(|p| p.pointer == Pointer::Touch(*id)) {
                    self.press = None;
                }
                None
            }
            _ => None,
        }
    }

    /// Forget any tracked press.
    pub fn reset(&mut self) {
        self.press = None;
    }

    fn arm(&mut self, pointer: Pointer, position: Point, target: Rect) {
        self.press = target
            .contains_point(&position)
            .then_some(Press {
                pointer,
                start: position,
            });
    }

    fn release(&mut self, pointer: Pointer, position: Point, target: Rect) -> Option<Point> {
        let press = self.press.filter(|p| p.pointer == pointer)?;
        self.press = None;

        let within_slop = press.start.distance(&position) <= self.config.tap_slop;
        (within_slop && target.contains_point(&position)).then_some(position)
    }
}
