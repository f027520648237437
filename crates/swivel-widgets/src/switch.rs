//! Animated toggle switch widget.
//!
//! The switch draws a pill-shaped track holding a row that slides sideways:
//! the active label, the knob, then the inactive label. Flipping the switch
//! animates three values together as one batch (the row offset and two color
//! mixes) and only commits the new value once the whole batch has settled.
//!
//! ```
//! use std::time::Duration;
//! use swivel_core::Widget;
//! use swivel_widgets::{SwitchProps, ToggleSwitch, TRAVEL_OFFSET};
//!
//! let mut switch = ToggleSwitch::new(SwitchProps::default());
//! assert_eq!(switch.knob_offset(), -TRAVEL_OFFSET);
//!
//! switch.tap();
//! while switch.is_animating() {
//!     switch.tick(Duration::from_millis(16));
//! }
//! assert!(switch.is_on());
//! assert_eq!(switch.knob_offset(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use swivel_core::{
    widget::{AccessibleRole, LayoutResult},
    AnimationController, AnimationSpec, BatchId, BoxStyle, Canvas, Color, Constraints,
    CornerRadius, Event, Interpolation, Key, Message, Point, Rect, Shadow, Size, SpringConfig,
    TapRecognizer, TextStyle, Transform2D, TypeId, Widget,
};
use swivel_yaml::{ColorField, ConfigError, SwitchConfig};

/// Width of the track.
pub const TRACK_WIDTH: f32 = 55.0;
/// Height and corner radius of the track.
pub const KNOB_RADIUS: f32 = 25.0;
/// Distance the row slides between on and off.
pub const TRAVEL_OFFSET: f32 = TRACK_WIDTH - KNOB_RADIUS - 2.0;
/// Diameter of the knob.
pub const KNOB_DIAMETER: f32 = KNOB_RADIUS - 2.0;
/// Length of a transition.
pub const TRANSITION: Duration = Duration::from_millis(200);

const ROW_WIDTH: f32 = 1.5 * TRACK_WIDTH;
const ROW_PADDING: f32 = 5.0;
const ROW_CONTENT: f32 = ROW_WIDTH - 2.0 * ROW_PADDING;
const LABEL_GAP: f32 = 5.0;
const ELEVATION: f32 = 3.0;
const MIX_EXTENT: f64 = TRACK_WIDTH as f64;

/// Message emitted when a tap-driven transition commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChanged {
    /// The committed value
    pub value: bool,
}

/// Style of the outer container around the track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    /// Background color (None = transparent)
    pub background: Option<Color>,
    /// Padding around the track
    pub padding: f32,
    /// Corner radius of the background
    pub corner_radius: f32,
}

/// Configuration of a [`ToggleSwitch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchProps {
    /// Controlled value
    pub value: bool,
    /// Suppresses taps and value updates while set
    pub disabled: bool,
    /// Label revealed while on
    pub active_text: String,
    /// Label revealed while off
    pub inactive_text: String,
    /// Track color while on
    pub track_color_active: Color,
    /// Track color while off
    pub track_color_inactive: Color,
    /// Knob color while on
    pub knob_color_active: Color,
    /// Knob color while off
    pub knob_color_inactive: Color,
    /// Outer container style
    pub style: ContainerStyle,
}

impl Default for SwitchProps {
    fn default() -> Self {
        Self {
            value: false,
            disabled: false,
            active_text: String::new(),
            inactive_text: String::new(),
            track_color_active: Color::from_rgb8(143, 255, 160),
            track_color_inactive: Color::from_rgb8(204, 205, 210),
            knob_color_active: Color::WHITE,
            knob_color_inactive: Color::WHITE,
            style: ContainerStyle::default(),
        }
    }
}

impl SwitchProps {
    /// Build props from a YAML configuration, filling gaps with defaults.
    pub fn from_config(config: &SwitchConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            value: config.value,
            disabled: config.disabled,
            active_text: config.active_text.clone(),
            inactive_text: config.inactive_text.clone(),
            track_color_active: config
                .color(ColorField::TrackActive)?
                .unwrap_or(defaults.track_color_active),
            track_color_inactive: config
                .color(ColorField::TrackInactive)?
                .unwrap_or(defaults.track_color_inactive),
            knob_color_active: config
                .color(ColorField::KnobActive)?
                .unwrap_or(defaults.knob_color_active),
            knob_color_inactive: config
                .color(ColorField::KnobInactive)?
                .unwrap_or(defaults.knob_color_inactive),
            style: ContainerStyle {
                background: config.color(ColorField::Background)?,
                padding: config.style.padding.unwrap_or(defaults.style.padding),
                corner_radius: config
                    .style
                    .corner_radius
                    .unwrap_or(defaults.style.corner_radius),
            },
        })
    }
}

/// A label placed inside the sliding row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrame {
    /// Label text
    pub text: String,
    /// Top-left corner, in row coordinates at rest
    pub position: Point,
}

/// Resolved geometry and colors for one paint.
///
/// Row contents are given at their rest position; `offset` is the
/// horizontal translation applied to the whole row.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchFrame {
    /// Outer container
    pub container: Rect,
    /// Container background
    pub background: Option<Color>,
    /// Container corner radius
    pub corner_radius: f32,
    /// Pill-shaped track, also the clip and tap region
    pub track: Rect,
    /// Interpolated track color
    pub track_color: Color,
    /// Sliding row before translation
    pub row: Rect,
    /// Row translation
    pub offset: f32,
    /// Knob center before translation
    pub knob_center: Point,
    /// Interpolated knob color
    pub knob_color: Color,
    /// Active label, if any
    pub active_label: Option<LabelFrame>,
    /// Inactive label, if any
    pub inactive_label: Option<LabelFrame>,
}

impl SwitchFrame {
    /// Knob center after the row translation.
    #[must_use]
    pub fn knob_position(&self) -> Point {
        self.knob_center.translate_x(self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Channel {
    KnobOffset,
    TrackMix,
    KnobMix,
}

#[derive(Debug, Clone, Copy)]
struct PendingCommit {
    batch: BatchId,
    value: bool,
    notify: bool,
}

type ValueChangeHandler = Box<dyn FnMut(bool) + Send + Sync>;

/// Animated on/off switch.
pub struct ToggleSwitch {
    props: SwitchProps,
    /// Last value a completed transition settled on
    committed: bool,
    /// Value the switch is heading towards
    target: bool,
    animations: AnimationController<Channel>,
    pending: Option<PendingCommit>,
    on_value_change: Option<ValueChangeHandler>,
    recognizer: TapRecognizer,
    focused: bool,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Default for ToggleSwitch {
    fn default() -> Self {
        Self::new(SwitchProps::default())
    }
}

impl fmt::Debug for ToggleSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleSwitch")
            .field("props", &self.props)
            .field("committed", &self.committed)
            .field("target", &self.target)
            .field("pending", &self.pending)
            .field("focused", &self.focused)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl ToggleSwitch {
    /// Create a switch resting at `props.value`.
    #[must_use]
    pub fn new(props: SwitchProps) -> Self {
        let mut switch = Self {
            committed: props.value,
            target: props.value,
            props,
            animations: AnimationController::new(),
            pending: None,
            on_value_change: None,
            recognizer: TapRecognizer::new(),
            focused: false,
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        };
        switch.place(switch.props.value);
        switch
    }

    /// Create a switch from a YAML configuration.
    pub fn from_config(config: &SwitchConfig) -> Result<Self, ConfigError> {
        let mut switch = Self::new(SwitchProps::from_config(config)?);
        switch.test_id_value.clone_from(&config.id);
        switch
            .accessible_name_value
            .clone_from(&config.accessible_name);
        Ok(switch)
    }

    /// Set the initial value.
    #[must_use]
    pub fn value(mut self, value: bool) -> Self {
        self.props.value = value;
        self.place(value);
        self
    }

    /// Set whether the switch is disabled.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.props.disabled = disabled;
        self
    }

    /// Set the label shown while on.
    #[must_use]
    pub fn active_text(mut self, text: impl Into<String>) -> Self {
        self.props.active_text = text.into();
        self
    }

    /// Set the label shown while off.
    #[must_use]
    pub fn inactive_text(mut self, text: impl Into<String>) -> Self {
        self.props.inactive_text = text.into();
        self
    }

    /// Set the track colors.
    #[must_use]
    pub const fn track_colors(mut self, active: Color, inactive: Color) -> Self {
        self.props.track_color_active = active;
        self.props.track_color_inactive = inactive;
        self
    }

    /// Set the knob colors.
    #[must_use]
    pub const fn knob_colors(mut self, active: Color, inactive: Color) -> Self {
        self.props.knob_color_active = active;
        self.props.knob_color_inactive = inactive;
        self
    }

    /// Set the container style.
    #[must_use]
    pub fn style(mut self, style: ContainerStyle) -> Self {
        self.props.style = style;
        self
    }

    /// Set the callback invoked after a tap-driven transition commits.
    #[must_use]
    pub fn on_value_change(mut self, handler: impl FnMut(bool) + Send + Sync + 'static) -> Self {
        self.on_value_change = Some(Box::new(handler));
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Committed value.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.committed
    }

    /// Get disabled state.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    /// Current props.
    #[must_use]
    pub const fn props(&self) -> &SwitchProps {
        &self.props
    }

    /// Horizontal offset of the sliding row: `0` when on, `-TRAVEL_OFFSET` when off.
    #[must_use]
    pub fn knob_offset(&self) -> f32 {
        self.channel(Channel::KnobOffset) as f32
    }

    /// Current track color.
    #[must_use]
    pub fn track_color(&self) -> Color {
        Interpolation::new(
            (-MIX_EXTENT, MIX_EXTENT),
            (self.props.track_color_inactive, self.props.track_color_active),
        )
        .map(self.channel(Channel::TrackMix))
    }

    /// Current knob color.
    #[must_use]
    pub fn knob_color(&self) -> Color {
        Interpolation::new(
            (-MIX_EXTENT, MIX_EXTENT),
            (self.props.knob_color_inactive, self.props.knob_color_active),
        )
        .map(self.channel(Channel::KnobMix))
    }

    /// Flip the switch as a user tap would.
    ///
    /// Returns `false` when disabled. The new value is committed, and the
    /// callback invoked, once the transition settles in [`Widget::tick`].
    pub fn tap(&mut self) -> bool {
        if self.props.disabled {
            tracing::debug!(value = self.committed, "tap ignored: switch disabled");
            return false;
        }
        self.start_transition(!self.committed, true);
        true
    }

    /// Apply updated props.
    ///
    /// A changed `value` animates toward the new value without invoking the
    /// callback. Updates arriving while disabled are recorded but never
    /// animate; the update that re-enables the switch re-syncs it to the
    /// incoming value.
    pub fn set_props(&mut self, props: SwitchProps) {
        let previous = std::mem::replace(&mut self.props, props);
        if self.props.disabled {
            if previous.value != self.props.value {
                tracing::debug!(
                    value = self.props.value,
                    "value update ignored: switch disabled"
                );
            }
            return;
        }

        let changed = previous.value != self.props.value;
        let resync = previous.disabled && self.props.value != self.target;
        if changed || resync {
            self.start_transition(self.props.value, false);
        }
    }

    /// Compute the geometry and colors of the current frame.
    #[must_use]
    pub fn frame(&self) -> SwitchFrame {
        let style = &self.props.style;
        let container = Rect::from_origin_size(
            self.bounds.origin(),
            Size::new(TRACK_WIDTH, KNOB_RADIUS).inflate(style.padding),
        );
        let track = Rect::new(
            container.x + style.padding,
            container.y + style.padding,
            TRACK_WIDTH,
            KNOB_RADIUS,
        );

        let text_style = label_style();
        let active = text_style.measure(&self.props.active_text);
        let inactive = text_style.measure(&self.props.inactive_text);
        let active_width = active.width + LABEL_GAP;
        let inactive_width = inactive.width + LABEL_GAP;
        let content = active_width + KNOB_DIAMETER + inactive_width;

        let start = track.x + ROW_PADDING + (ROW_CONTENT - content) / 2.0;
        let center_y = track.y + KNOB_RADIUS / 2.0;
        let knob_left = start + active_width;

        SwitchFrame {
            container,
            background: style.background,
            corner_radius: style.corner_radius,
            track,
            track_color: self.track_color(),
            row: Rect::new(track.x, track.y, ROW_WIDTH, KNOB_RADIUS),
            offset: self.knob_offset(),
            knob_center: Point::new(knob_left + KNOB_DIAMETER / 2.0, center_y),
            knob_color: self.knob_color(),
            active_label: label(
                &self.props.active_text,
                Point::new(start, center_y - active.height / 2.0),
            ),
            inactive_label: label(
                &self.props.inactive_text,
                Point::new(
                    knob_left + KNOB_DIAMETER + LABEL_GAP,
                    center_y - inactive.height / 2.0,
                ),
            ),
        }
    }

    fn channel(&self, channel: Channel) -> f64 {
        self.animations.get(channel).unwrap_or_default()
    }

    /// Jump every scalar to the endpoint for `value` and drop any pending commit.
    fn place(&mut self, value: bool) {
        self.animations
            .set_immediate(Channel::KnobOffset, knob_endpoint(value));
        self.animations
            .set_immediate(Channel::TrackMix, mix_endpoint(value));
        self.animations
            .set_immediate(Channel::KnobMix, mix_endpoint(value));
        self.pending = None;
        self.committed = value;
        self.target = value;
    }

    fn start_transition(&mut self, value: bool, notify: bool) {
        // A redirect toward the same value keeps the tap's notification.
        let notify = notify || self.pending.is_some_and(|p| p.value == value && p.notify);

        let batch = self.animations.start_batch([
            (
                Channel::KnobOffset,
                knob_endpoint(value),
                AnimationSpec::spring(TRANSITION, SpringConfig::WOBBLY),
            ),
            (
                Channel::TrackMix,
                mix_endpoint(value),
                AnimationSpec::timing(TRANSITION),
            ),
            (
                Channel::KnobMix,
                mix_endpoint(value),
                AnimationSpec::timing(TRANSITION),
            ),
        ]);

        if let Some(previous) = self.pending.replace(PendingCommit {
            batch,
            value,
            notify,
        }) {
            tracing::debug!(batch = ?previous.batch, "switch transition redirected");
        }
        self.target = value;
        tracing::debug!(value, notify, ?batch, "switch transition started");
    }

    fn commit(&mut self, dt: Duration) -> Option<SwitchChanged> {
        let completed = self.animations.tick(dt);
        let pending = self.pending?;
        if !completed.contains(&pending.batch) {
            return None;
        }

        self.pending = None;
        self.committed = pending.value;
        tracing::debug!(value = pending.value, "switch value committed");

        if !pending.notify {
            return None;
        }
        if let Some(handler) = self.on_value_change.as_mut() {
            handler(pending.value);
        }
        Some(SwitchChanged {
            value: pending.value,
        })
    }
}

fn knob_endpoint(value: bool) -> f64 {
    if value {
        0.0
    } else {
        -f64::from(TRAVEL_OFFSET)
    }
}

fn mix_endpoint(value: bool) -> f64 {
    if value {
        MIX_EXTENT
    } else {
        -MIX_EXTENT
    }
}

fn label_style() -> TextStyle {
    TextStyle {
        color: Color::WHITE,
        ..TextStyle::default()
    }
}

fn label(text: &str, position: Point) -> Option<LabelFrame> {
    (!text.is_empty()).then(|| LabelFrame {
        text: text.to_string(),
        position,
    })
}

impl Widget for ToggleSwitch {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(TRACK_WIDTH, KNOB_RADIUS).inflate(self.props.style.padding))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let frame = self.frame();

        if let Some(background) = frame.background {
            canvas.draw_box(
                frame.container,
                CornerRadius::uniform(frame.corner_radius),
                &BoxStyle::fill(background),
            );
        }

        canvas.draw_box(
            frame.track,
            CornerRadius::uniform(KNOB_RADIUS),
            &BoxStyle::fill(frame.track_color).with_shadow(Shadow::elevation(ELEVATION)),
        );

        canvas.push_clip(frame.track);
        canvas.push_transform(Transform2D::translate(frame.offset, 0.0));

        let text_style = label_style();
        for label in [&frame.active_label, &frame.inactive_label]
            .into_iter()
            .flatten()
        {
            canvas.draw_text(&label.text, label.position, &text_style);
        }

        // Knob goes last so it sits above both labels.
        canvas.draw_circle(
            frame.knob_center,
            KNOB_DIAMETER / 2.0,
            &BoxStyle::fill(frame.knob_color).with_shadow(Shadow::elevation(ELEVATION)),
        );

        canvas.pop_transform();
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        match event {
            Event::FocusIn => self.focused = true,
            Event::FocusOut => {
                self.focused = false;
                self.recognizer.reset();
            }
            Event::KeyDown {
                key: Key::Space | Key::Enter,
            } if self.focused => {
                self.tap();
            }
            _ => {
                let track = self.frame().track;
                if self.recognizer.process(event, track).is_some() {
                    self.tap();
                }
            }
        }
        None
    }

    fn tick(&mut self, dt: Duration) -> Option<Message> {
        self.commit(dt).map(|changed| Box::new(changed) as Message)
    }

    fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        !self.props.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.props.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Switch
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
