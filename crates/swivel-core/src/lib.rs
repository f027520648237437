//! Core types and traits for the swivel toggle switch.
//!
//! This crate provides foundational types used by the widget crates:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation and parsing: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Events and tap recognition: [`Event`], [`TapRecognizer`]
//! - Rendering: [`Canvas`], [`DrawCommand`], [`RecordingCanvas`]
//! - Animation: [`AnimatedValue`], [`Interpolation`], [`AnimationController`]

pub mod animation;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod gesture;
pub mod widget;

pub use animation::{
    AnimatedValue, AnimationController, AnimationSpec, BatchId, Curve, Interpolate,
    Interpolation, SpringConfig, Tween,
};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, Shadow, StrokeStyle, Transform2D};
pub use event::{Event, Key, MouseButton, TouchId};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use gesture::{TapConfig, TapRecognizer};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, Message, TextStyle, TypeId, Widget,
};
