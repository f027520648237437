//! Declarative switch configuration loaded from YAML.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use swivel_core::Color;

/// Switch configuration as written in YAML.
///
/// Every key is optional; absent keys fall back to the widget defaults.
/// Colors are kept as strings until [`SwitchConfig::color`] resolves them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitchConfig {
    /// Test ID used by harness selectors
    pub id: Option<String>,
    /// Initial / controlled value
    pub value: bool,
    /// Disabled flag
    pub disabled: bool,
    /// Label shown while on
    pub active_text: String,
    /// Label shown while off
    pub inactive_text: String,
    /// Track color while on
    pub track_color_active: Option<String>,
    /// Track color while off
    pub track_color_inactive: Option<String>,
    /// Knob color while on
    pub knob_color_active: Option<String>,
    /// Knob color while off
    pub knob_color_inactive: Option<String>,
    /// Accessible name
    pub accessible_name: Option<String>,
    /// Outer container style
    pub style: ContainerConfig,
}

/// Outer container style as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// Background color
    pub background: Option<String>,
    /// Padding around the track
    pub padding: Option<f32>,
    /// Corner radius of the background
    pub corner_radius: Option<f32>,
}

/// Color fields of a [`SwitchConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    /// `track_color_active`
    TrackActive,
    /// `track_color_inactive`
    TrackInactive,
    /// `knob_color_active`
    KnobActive,
    /// `knob_color_inactive`
    KnobInactive,
    /// `style.background`
    Background,
}

impl ColorField {
    /// YAML key of this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TrackActive => "track_color_active",
            Self::TrackInactive => "track_color_inactive",
            Self::KnobActive => "knob_color_active",
            Self::KnobInactive => "knob_color_inactive",
            Self::Background => "style.background",
        }
    }
}

impl SwitchConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every color and numeric field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in [
            ColorField::TrackActive,
            ColorField::TrackInactive,
            ColorField::KnobActive,
            ColorField::KnobInactive,
            ColorField::Background,
        ] {
            self.color(field)?;
        }

        for (field, value) in [
            ("style.padding", self.style.padding),
            ("style.corner_radius", self.style.corner_radius),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        message: format!("must be a non-negative number, got {v}"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a color field; `Ok(None)` when the key is absent.
    pub fn color(&self, field: ColorField) -> Result<Option<Color>, ConfigError> {
        let raw = match field {
            ColorField::TrackActive => &self.track_color_active,
            ColorField::TrackInactive => &self.track_color_inactive,
            ColorField::KnobActive => &self.knob_color_active,
            ColorField::KnobInactive => &self.knob_color_inactive,
            ColorField::Background => &self.style.background,
        };

        raw.as_deref()
            .map(|s| {
                Color::parse(s).map_err(|source| ConfigError::InvalidColor {
                    field: field.key().to_string(),
                    source,
                })
            })
            .transpose()
    }
}
