// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroviz Configuration System
//!
//! Settings for every diagram live in one TOML file. Values are layered:
//! file first, then `NEUROVIZ_*` environment variables, then command-line
//! flags passed in as a key/value map.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroviz_config::{load_config, NeurovizConfig};
//!
//! // discovers neuroviz_configuration.toml, then applies NEUROVIZ_* variables
//! let config: NeurovizConfig = load_config(None, None).expect("no configuration");
//!
//! println!("Canvas: {}x{}", config.canvas.width, config.canvas.height);
//! println!("Weight angle: {}", config.projection.w_angle);
//! ```
//!
//! Every section carries `#[serde(default)]`, so a file only needs the keys it
//! wants to change; `NeurovizConfig::default()` is a complete, valid setup.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_or_default, CONFIG_FILE_NAME,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

pub use serde;

/// Everything that can go wrong while loading or checking a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No neuroviz configuration found: {0}")]
    FileNotFound(String),

    #[error("Could not read configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed configuration TOML: {0}")]
    ParseError(String),

    #[error("Configuration rejected:\n{0}")]
    ValidationError(String),

    #[error("Unusable configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds() {
        let _config = NeurovizConfig::default();
    }

    #[test]
    fn test_parse_error_conversion() {
        let err = toml::from_str::<NeurovizConfig>("[canvas\nwidth = 3").unwrap_err();
        let config_err: ConfigError = err.into();
        assert!(matches!(config_err, ConfigError::ParseError(_)));
    }
}
