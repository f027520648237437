//! Widget implementations for the swivel toggle switch.

pub mod switch;

pub use switch::{
    ContainerStyle, LabelFrame, SwitchChanged, SwitchFrame, SwitchProps, ToggleSwitch,
    KNOB_DIAMETER, KNOB_RADIUS, TRACK_WIDTH, TRANSITION, TRAVEL_OFFSET,
};
