//! Test harness for swivel widgets.

use std::any::Any;
use std::collections::VecDeque;
use std::time::Duration;
use swivel_core::{
    Constraints, Event, Key, Message, MouseButton, Point, Rect, RecordingCanvas, TouchId, Widget,
};

use crate::selector::Selector;

/// Default frame length for [`Harness::settle`].
const FRAME: Duration = Duration::from_millis(16);
/// Upper bound on frames [`Harness::settle`] will run.
const MAX_FRAMES: usize = 1_000;
/// Area the root is laid out in.
const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

/// Test harness for interacting with swivel widgets.
///
/// The root is measured and laid out against the viewport on creation.
/// Events go to the root; frame ticks go to every widget in the tree.
/// Messages returned from either are kept for inspection.
pub struct Harness {
    /// Root widget being tested
    root: Box<dyn Widget>,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Messages emitted by events and ticks
    messages: Vec<Message>,
    /// Simulated time advanced so far
    elapsed: Duration,
}

impl Harness {
    /// Create a new harness with a root widget.
    pub fn new(root: impl Widget + 'static) -> Self {
        let mut harness = Self {
            root: Box::new(root),
            event_queue: VecDeque::new(),
            messages: Vec::new(),
            elapsed: Duration::ZERO,
        };
        harness.relayout();
        harness
    }

    // === Event Simulation ===

    /// Simulate a mouse click at the center of a widget matching the selector.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        if let Some(center) = self.query_center(selector) {
            self.event_queue
                .push_back(Event::MouseMove { position: center });
            self.event_queue.push_back(Event::MouseDown {
                position: center,
                button: MouseButton::Left,
            });
            self.event_queue.push_back(Event::MouseUp {
                position: center,
                button: MouseButton::Left,
            });
            self.process_events();
        }
        self
    }

    /// Simulate a touch tap at the center of a widget matching the selector.
    pub fn tap(&mut self, selector: &str) -> &mut Self {
        if let Some(center) = self.query_center(selector) {
            let id = TouchId(0);
            self.event_queue.push_back(Event::TouchStart {
                id,
                position: center,
            });
            self.event_queue.push_back(Event::TouchEnd {
                id,
                position: center,
            });
            self.process_events();
        }
        self
    }

    /// Give the root keyboard focus.
    pub fn focus(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::FocusIn);
        self.process_events();
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Send an arbitrary event to the root.
    pub fn dispatch(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    // === Time ===

    /// Advance simulated time by one frame of `dt`.
    pub fn tick(&mut self, dt: Duration) -> &mut Self {
        self.elapsed = self.elapsed.saturating_add(dt);
        tick_widget(self.root.as_mut(), dt, &mut self.messages);
        self
    }

    /// Advance simulated time by `ms` milliseconds in one frame.
    pub fn tick_ms(&mut self, ms: u64) -> &mut Self {
        self.tick(Duration::from_millis(ms))
    }

    /// Run 16 ms frames until nothing in the tree is animating.
    ///
    /// Returns the number of frames run.
    ///
    /// # Panics
    ///
    /// Panics if the tree is still animating after 1000 frames.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.is_animating() {
            assert!(
                frames < MAX_FRAMES,
                "Widget tree still animating after {MAX_FRAMES} frames"
            );
            self.tick(FRAME);
            frames += 1;
        }
        tracing::trace!(frames, "harness settled");
        frames
    }

    /// Simulated time advanced so far.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether any widget in the tree is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        any_animating(self.root.as_ref())
    }

    // === Messages ===

    /// Messages of type `T` emitted so far, in order.
    #[must_use]
    pub fn messages<T: Any>(&self) -> Vec<&T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .collect()
    }

    /// Drain every emitted message.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    // === Rendering ===

    /// Paint the tree into a recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    // === Queries ===

    /// The root widget.
    #[must_use]
    pub fn root(&self) -> &dyn Widget {
        self.root.as_ref()
    }

    /// Query for a widget matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let sel = Selector::parse(selector).ok()?;
        find_widget(self.root.as_ref(), &sel)
    }

    /// Query for all widgets matching the selector.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        find_all_widgets(self.root.as_ref(), &sel, &mut results);
        results
    }

    /// Accessible name of a widget.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(Widget::accessible_name)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Check if a widget exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that a widget's accessible name matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert how many messages of type `T` have been emitted.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_message_count<T: Any>(&self, expected: usize) -> &Self {
        let actual = self.messages::<T>().len();
        assert_eq!(
            actual,
            expected,
            "Expected {expected} messages of type {} but found {actual}",
            std::any::type_name::<T>()
        );
        self
    }

    // === Internal ===

    fn relayout(&mut self) {
        let size = self.root.measure(Constraints::loose(VIEWPORT.size()));
        self.root
            .layout(Rect::from_origin_size(VIEWPORT.origin(), size));
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
        }
    }

    fn query_center(&self, selector: &str) -> Option<Point> {
        self.query(selector).map(|w| w.bounds().center())
    }
}

fn tick_widget(widget: &mut dyn Widget, dt: Duration, messages: &mut Vec<Message>) {
    if let Some(message) = widget.tick(dt) {
        messages.push(message);
    }
    for child in widget.children_mut() {
        tick_widget(child.as_mut(), dt, messages);
    }
}

fn any_animating(widget: &dyn Widget) -> bool {
    widget.is_animating() || widget.children().iter().any(|c| any_animating(c.as_ref()))
}

fn find_widget<'a>(widget: &'a dyn Widget, selector: &Selector) -> Option<&'a dyn Widget> {
    if selector.matches(widget) {
        return Some(widget);
    }
    widget
        .children()
        .iter()
        .find_map(|child| find_widget(child.as_ref(), selector))
}

fn find_all_widgets<'a>(
    widget: &'a dyn Widget,
    selector: &Selector,
    results: &mut Vec<&'a dyn Widget>,
) {
    if selector.matches(widget) {
        results.push(widget);
    }
    for child in widget.children() {
        find_all_widgets(child.as_ref(), selector, results);
    }
}
