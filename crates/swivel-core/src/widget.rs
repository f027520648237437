//! Widget trait and related types.
//!
//! This module defines the core `Widget` trait and supporting types for building
//! UI components.
//!
//! # Widget Lifecycle
//!
//! Widgets follow a measure-layout-paint cycle, with events and frame ticks
//! interleaved by the host:
//!
//! 1. **Measure**: Compute intrinsic size given constraints
//! 2. **Layout**: Position self and children within allocated bounds
//! 3. **Paint**: Generate draw commands for rendering
//! 4. **Event**: React to input, optionally returning a message
//! 5. **Tick**: Advance animations by the frame delta, optionally returning a message
//!
//! # Examples
//!
//! ```
//! use swivel_core::TypeId;
//!
//! let string_type = TypeId::of::<String>();
//! let i32_type = TypeId::of::<i32>();
//! assert_ne!(string_type, i32_type);
//! ```

use crate::constraints::Constraints;
use crate::draw::{BoxStyle, Transform2D};
use crate::event::Event;
use crate::geometry::{CornerRadius, Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

/// Type identifier for widget types (used for diffing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Message type returned from `event` and `tick`.
pub type Message = Box<dyn Any + Send>;

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position children within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events.
    fn event(&mut self, event: &Event) -> Option<Message>;

    /// Advance animations by one frame.
    fn tick(&mut self, _dt: Duration) -> Option<Message> {
        None
    }

    /// Whether the widget has animations in flight.
    fn is_animating(&self) -> bool {
        false
    }

    /// Get child widgets for tree traversal.
    fn children(&self) -> &[Box<dyn Widget>];

    /// Get mutable child widgets.
    fn children_mut(&mut self) -> &mut [Box<dyn Widget>];

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a styled rectangle with rounded corners.
    fn draw_box(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle);

    /// Draw a styled circle.
    fn draw_circle(&mut self, center: Point, radius: f32, style: &BoxStyle);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.draw_circle(center, radius, &BoxStyle::fill(color));
    }

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Push a clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);

    /// Push a transform.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);
}

/// Text style for rendering.
///
/// # Examples
///
/// ```
/// use swivel_core::{Color, FontWeight, TextStyle};
///
/// let default_style = TextStyle::default();
/// assert_eq!(default_style.size, 14.0);
/// assert_eq!(default_style.weight, FontWeight::Normal);
///
/// let label = TextStyle {
///     color: Color::WHITE,
///     ..TextStyle::default()
/// };
/// assert_eq!(label.color, Color::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

impl TextStyle {
    /// Rough advance-width estimate for layout without a font backend.
    #[must_use]
    pub fn measure(&self, text: &str) -> Size {
        let chars = text.chars().count() as f32;
        Size::new(chars * self.size * 0.5, self.size * 1.2)
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    Normal,
    /// Medium (500)
    Medium,
    /// Bold (700)
    Bold,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Checkbox
    Checkbox,
    /// On/off switch
    Switch,
}
