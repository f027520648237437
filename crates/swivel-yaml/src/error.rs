//! Error types for YAML configuration.

use swivel_core::ColorParseError;
use thiserror::Error;

/// Error type for switch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A color field could not be parsed
    #[error("Invalid color for '{field}': {source}")]
    InvalidColor {
        /// Field name
        field: String,
        /// Underlying parse error
        #[source]
        source: ColorParseError,
    },
    /// A numeric field is out of range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidColor {
            field: "track_color_active".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert_eq!(
            err.to_string(),
            "Invalid color for 'track_color_active': invalid hex string length (expected 6 or 8)"
        );
        assert!(err.source().is_some());

        let err = ConfigError::InvalidValue {
            field: "style.padding".to_string(),
            message: "must be non-negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'style.padding': must be non-negative"
        );
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error:"));
    }
}
