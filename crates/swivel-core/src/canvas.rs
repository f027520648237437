//! Canvas implementations for rendering.

use crate::draw::{BoxStyle, DrawCommand, Transform2D};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, CornerRadius, Point, Rect};

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Pushed transforms are resolved at record time, so recorded geometry is in
/// canvas space. Commands issued under a clip are wrapped in
/// [`DrawCommand::Clip`] with the innermost clip rectangle.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (send commands to a backend)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    transform_stack: Vec<Transform2D>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the current transform (identity if no transforms pushed).
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Transform2D::IDENTITY)
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Get the clip stack depth.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Get the transform stack depth.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// All recorded text runs, in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd.unclipped() {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DrawCommand) {
        let command = match self.current_clip() {
            Some(clip) => command.with_clip(clip),
            None => command,
        };
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let bounds = self.current_transform().apply_rect(rect);
        self.record(DrawCommand::filled_rect(bounds, color));
    }

    fn draw_box(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle) {
        let bounds = self.current_transform().apply_rect(rect);
        self.record(DrawCommand::Rect {
            bounds,
            radius,
            style: style.clone(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, style: &BoxStyle) {
        let center = self.current_transform().apply(center);
        self.record(DrawCommand::Circle {
            center,
            radius,
            style: style.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        let position = self.current_transform().apply(position);
        self.record(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        let rect = self.current_transform().apply_rect(rect);
        self.clip_stack.push(rect);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let combined = transform.then(&self.current_transform());
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_new() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        assert_eq!(canvas.command_count(), 0);
        assert!(canvas.current_transform().is_identity());
        assert_eq!(canvas.current_clip(), None);
    }

    #[test]
    fn test_fill_rect_records_command() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(canvas.command_count(), 1);
        assert_eq!(canvas.commands()[0].fill(), Some(Color::WHITE));
    }

    #[test]
    fn test_transform_is_resolved() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_transform(Transform2D::translate(-28.0, 0.0));
        canvas.fill_circle(Point::new(40.0, 12.5), 11.5, Color::WHITE);
        canvas.pop_transform();
        canvas.fill_circle(Point::new(40.0, 12.5), 11.5, Color::WHITE);

        match &canvas.commands()[0] {
            DrawCommand::Circle { center, .. } => assert_eq!(*center, Point::new(12.0, 12.5)),
            other => panic!("unexpected {other:?}"),
        }
        match &canvas.commands()[1] {
            DrawCommand::Circle { center, .. } => assert_eq!(*center, Point::new(40.0, 12.5)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nested_transforms_compose() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_transform(Transform2D::translate(10.0, 0.0));
        canvas.push_transform(Transform2D::translate(5.0, 1.0));
        assert_eq!(canvas.transform_depth(), 2);
        assert_eq!(canvas.current_transform().apply(Point::ORIGIN), Point::new(15.0, 1.0));
        canvas.pop_transform();
        assert_eq!(canvas.current_transform().apply(Point::ORIGIN), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_clip_wraps_commands() {
        let mut canvas = RecordingCanvas::new();
        let clip = Rect::new(0.0, 0.0, 55.0, 25.0);
        canvas.push_clip(clip);
        canvas.draw_text("ON", Point::new(2.0, 2.0), &TextStyle::default());
        canvas.pop_clip();
        canvas.draw_text("OFF", Point::new(2.0, 2.0), &TextStyle::default());

        assert_eq!(canvas.clip_depth(), 0);
        assert!(matches!(
            &canvas.commands()[0],
            DrawCommand::Clip { bounds, .. } if *bounds == clip
        ));
        assert!(matches!(&canvas.commands()[1], DrawCommand::Text { .. }));
        assert_eq!(canvas.texts(), vec!["ON", "OFF"]);
    }

    #[test]
    fn test_take_commands_clears() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(canvas.is_empty());
    }
}
