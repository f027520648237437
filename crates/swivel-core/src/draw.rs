//! Draw commands for rendering.
//!
//! All rendering reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
    /// Shadow (None = no shadow)
    pub shadow: Option<Shadow>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
            shadow: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            shadow: None,
        }
    }

    /// Add a shadow to the box.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Shadow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color
    pub color: Color,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self::elevation(2.0)
    }
}

impl Shadow {
    /// Material-style drop shadow for an elevation level.
    #[must_use]
    pub fn elevation(level: f32) -> Self {
        Self {
            color: Color::new(0.0, 0.0, 0.0, 0.3),
            offset_x: 0.0,
            offset_y: level / 2.0,
            blur: level,
        }
    }
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f] for:
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Transform2D {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Compose: apply `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.matrix;
        let [a2, b2, c2, d2, e2, f2] = other.matrix;
        Self {
            matrix: [
                a2 * a1 + c2 * b1,
                b2 * a1 + d2 * b1,
                a2 * c1 + c2 * d1,
                b2 * c1 + d2 * d1,
                a2 * e1 + c2 * f1 + e2,
                b2 * e1 + d2 * f1 + f2,
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.matrix;
        Point::new(
            a * point.x + c * point.y + e,
            b * point.x + d * point.y + f,
        )
    }

    /// Transform an axis-aligned rectangle (rotation is not supported).
    #[must_use]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let origin = self.apply(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.matrix[0],
            rect.height * self.matrix[3],
        )
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Clip to bounds
    Clip {
        /// Clip bounds
        bounds: Rect,
        /// Child command
        child: Box<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub const fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Wrap with clip bounds.
    #[must_use]
    pub fn with_clip(self, bounds: Rect) -> Self {
        Self::Clip {
            bounds,
            child: Box::new(self),
        }
    }

    /// Strip any clip wrappers.
    #[must_use]
    pub fn unclipped(&self) -> &Self {
        match self {
            Self::Clip { child, .. } => child.unclipped(),
            other => other,
        }
    }

    /// Fill color of a rect or circle, if any.
    #[must_use]
    pub fn fill(&self) -> Option<Color> {
        match self.unclipped() {
            Self::Rect { style, .. } | Self::Circle { style, .. } => style.fill,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_elevation() {
        let s = Shadow::elevation(3.0);
        assert_eq!(s.offset_y, 1.5);
        assert_eq!(s.blur, 3.0);
        assert!(s.color.a > 0.0);
    }

    #[test]
    fn test_transform_translate_apply() {
        let t = Transform2D::translate(-28.0, 4.0);
        assert_eq!(t.apply(Point::new(10.0, 10.0)), Point::new(-18.0, 14.0));
    }

    #[test]
    fn test_transform_then() {
        let t = Transform2D::translate(10.0, 0.0).then(&Transform2D::translate(5.0, 2.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(15.0, 2.0));

        let back = t.then(&Transform2D::translate(-15.0, -2.0));
        assert!(back.is_identity());
    }

    #[test]
    fn test_transform_apply_rect() {
        let r = Transform2D::translate(3.0, 0.0).apply_rect(Rect::new(1.0, 1.0, 10.0, 5.0));
        assert_eq!(r, Rect::new(4.0, 1.0, 10.0, 5.0));
        assert!(Transform2D::default().is_identity());
    }

    #[test]
    fn test_draw_command_fill_through_clip() {
        let cmd = DrawCommand::filled_circle(Point::ORIGIN, 4.0, Color::WHITE)
            .with_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(cmd.fill(), Some(Color::WHITE));
        assert!(matches!(cmd.unclipped(), DrawCommand::Circle { .. }));

        let text = DrawCommand::Text {
            content: "on".into(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        assert_eq!(text.fill(), None);
    }
}
