//! Color representation and parsing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// RGBA color with values in the range [0.0, 1.0].
///
/// Deserialized channels go through [`Color::new`], so they are clamped the
/// same way as constructed ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0]. NaN becomes 0.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats, with at most
    /// one leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidHex)
        };

        match hex.len() {
            6 => Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => {
                let base = Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                Ok(base.with_alpha(f32::from(channel(6..8)?) / 255.0))
            }
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Parse any supported color notation.
    ///
    /// Accepts hex (`#8fffa0`), functional (`rgb(143, 255, 160)`,
    /// `rgba(0, 0, 0, 0.5)`) and a small set of named colors.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        let lower = input.to_ascii_lowercase();

        if lower.starts_with('#') {
            return Self::from_hex(&lower);
        }
        if let Some(args) = functional_args(&lower, "rgba") {
            return Self::from_functional(input, args, true);
        }
        if let Some(args) = functional_args(&lower, "rgb") {
            return Self::from_functional(input, args, false);
        }

        Self::named(&lower).ok_or_else(|| ColorParseError::UnknownName(input.to_string()))
    }

    fn from_functional(input: &str, args: &str, with_alpha: bool) -> Result<Self, ColorParseError> {
        let malformed = || ColorParseError::Malformed(input.to_string());
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(malformed());
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| malformed())?;
        }
        let base = Self::from_rgb8(channels[0], channels[1], channels[2]);

        if with_alpha {
            let alpha = parts[3].parse::<f32>().map_err(|_| malformed())?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(malformed());
            }
            Ok(base.with_alpha(alpha))
        } else {
            Ok(base)
        }
    }

    fn named(name: &str) -> Option<Self> {
        match name {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "transparent" => Some(Self::TRANSPARENT),
            "red" => Some(Self::from_rgb8(255, 0, 0)),
            "green" => Some(Self::from_rgb8(0, 128, 0)),
            "blue" => Some(Self::from_rgb8(0, 0, 255)),
            "gray" | "grey" => Some(Self::from_rgb8(128, 128, 128)),
            _ => None,
        }
    }

    /// Copy of this color with a different alpha.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors.
    ///
    /// `t` is clamped to [0, 1]; the endpoints return `self` and `other`
    /// unchanged.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        Self::new(
            (other.r - self.r).mul_add(t, self.r),
            (other.g - self.g).mul_add(t, self.g),
            (other.b - self.b).mul_add(t, self.b),
            (other.a - self.a).mul_add(t, self.a),
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Wire form of [`Color`] before clamping.
#[derive(Deserialize)]
struct RawColor {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        Self::new(raw.r, raw.g, raw.b, raw.a)
    }
}

fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Strip `name(` ... `)` and return the argument list.
fn functional_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
    /// Invalid string length
    #[error("invalid hex string length (expected 6 or 8)")]
    InvalidLength,
    /// Not one of the known color names
    #[error("unknown color name '{0}'")]
    UnknownName(String),
    /// Broken `rgb()`/`rgba()` notation
    #[error("malformed color function '{0}'")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#ff0000").unwrap();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);

        let c2 = Color::from_hex("00ff00").unwrap();
        assert_eq!(c2.g, 1.0);

        let c3 = Color::from_hex("#ff000080").unwrap();
        assert!((c3.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(Color::from_hex("#gg0000"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("#ff"), Err(ColorParseError::InvalidLength));
        assert_eq!(Color::from_hex("#ffé000"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("##ffffff"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("#+f+f+f"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("#-1ffff"), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn test_color_new_maps_nan_to_zero() {
        let c = Color::new(f32::NAN, 0.5, 0.5, f32::NAN);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn test_deserialize_clamps_channels() {
        let c: Color = serde_json::from_str(r#"{"r": 2.5, "g": -1.0, "b": 0.25, "a": 7.0}"#).unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.25, 1.0));

        let json = serde_json::to_string(&Color::from_rgb8(143, 255, 160)).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_rgb8(143, 255, 160));
    }

    #[test]
    fn test_parse_rgb_function() {
        let c = Color::parse("rgb(143, 255, 160)").unwrap();
        assert_eq!(c, Color::from_rgb8(143, 255, 160));

        let c = Color::parse("RGB(204,205,210)").unwrap();
        assert_eq!(c, Color::parse("#cccdd2").unwrap());
    }

    #[test]
    fn test_parse_rgba_function() {
        let c = Color::parse("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c.a, 0.5);
        assert!(Color::parse("rgba(0, 0, 0, 1.5)").is_err());
        assert!(Color::parse("rgba(0, 0, 0)").is_err());
    }

    #[test]
    fn test_parse_malformed_function() {
        assert_eq!(
            Color::parse("rgb(300, 0, 0)"),
            Err(ColorParseError::Malformed("rgb(300, 0, 0)".to_string()))
        );
        assert!(Color::parse("rgb(1, 2)").is_err());
        assert!(Color::parse("rgb(1, 2, 3").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("white").unwrap(), Color::WHITE);
        assert_eq!(Color::parse(" White ").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
        assert_eq!("grey".parse::<Color>().unwrap(), Color::parse("gray").unwrap());
        assert_eq!(
            Color::parse("chartreuse"),
            Err(ColorParseError::UnknownName("chartreuse".to_string()))
        );
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.g - 0.5).abs() < 0.001);
        assert!((mid.b - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_lerp_endpoints_exact() {
        let a = Color::from_rgb8(204, 205, 210);
        let b = Color::from_rgb8(143, 255, 160);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, -3.0), a);
        assert_eq!(a.lerp(&b, 7.0), b);
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
        assert_eq!(
            ColorParseError::InvalidLength.to_string(),
            "invalid hex string length (expected 6 or 8)"
        );
        assert_eq!(
            ColorParseError::UnknownName("mauve".into()).to_string(),
            "unknown color name 'mauve'"
        );
    }

    proptest! {
        #[test]
        fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
            let c = Color::new(r, g, b, a);
            prop_assert!((0.0..=1.0).contains(&c.r));
            prop_assert!((0.0..=1.0).contains(&c.g));
            prop_assert!((0.0..=1.0).contains(&c.b));
            prop_assert!((0.0..=1.0).contains(&c.a));
        }

        #[test]
        fn prop_lerp_stays_between_endpoints(t in 0.0f32..1.0, r1 in 0.0f32..1.0, r2 in 0.0f32..1.0) {
            let c1 = Color::rgb(r1, 0.0, 0.0);
            let c2 = Color::rgb(r2, 0.0, 0.0);
            let mid = c1.lerp(&c2, t);
            prop_assert!(mid.r >= r1.min(r2) - 1e-6);
            prop_assert!(mid.r <= r1.max(r2) + 1e-6);
        }
    }
}
