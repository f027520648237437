//! YAML configuration for the swivel toggle switch.

mod config;
mod error;

pub use config::{ColorField, ContainerConfig, SwitchConfig};
pub use error::ConfigError;
