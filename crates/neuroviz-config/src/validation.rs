// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges. All violations are collected and
//! reported together.

use crate::{ConfigError, ConfigResult, NeurovizConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    NotPositive { field: String, value: f64 },
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{} = {} must be positive", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "{} = {} is outside valid range ({}-{})",
                    field, value, min, max
                )
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Positive canvas and plot dimensions
/// - Bounding circle fitting inside the canvas
/// - Angles, opacities and jitter within range
/// - Required colours and labels
/// - Known enumerated values (log format, layer variant)
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &NeurovizConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_dimensions(config, &mut errors);
    validate_value_ranges(config, &mut errors);
    validate_required_fields(config, &mut errors);
    validate_enumerations(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn require_positive(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    // NaN fails this comparison too
    if !(value > 0.0) {
        errors.push(ConfigValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
}

fn require_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
    errors: &mut Vec<ConfigValidationError>,
) {
    if !(min..=max).contains(&value) {
        errors.push(ConfigValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
}

fn validate_dimensions(config: &NeurovizConfig, errors: &mut Vec<ConfigValidationError>) {
    let canvas = &config.canvas;
    require_positive("canvas.width", canvas.width, errors);
    require_positive("canvas.height", canvas.height, errors);
    require_positive("canvas.radius", canvas.radius, errors);

    let max_radius = canvas.width.min(canvas.height) / 2.0;
    if canvas.radius > max_radius {
        errors.push(ConfigValidationError::InvalidValue {
            field: "canvas.radius".to_string(),
            reason: format!("{} does not fit a {}x{} canvas", canvas.radius, canvas.width, canvas.height),
        });
    }

    require_positive("scatter.width", config.scatter.width, errors);
    require_positive("scatter.height", config.scatter.height, errors);
    require_positive("scatter.point_radius", config.scatter.point_radius, errors);
}

fn validate_value_ranges(config: &NeurovizConfig, errors: &mut Vec<ConfigValidationError>) {
    require_range(
        "projection.cone_half_deg",
        config.projection.cone_half_deg,
        0.0,
        180.0,
        errors,
    );
    require_range("palette.cone_opacity", config.palette.cone_opacity, 0.0, 1.0, errors);
    require_range("scatter.point_opacity", config.scatter.point_opacity, 0.0, 1.0, errors);

    let jitter = config.scatter.jitter_scale;
    if !(jitter >= 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "scatter.jitter_scale".to_string(),
            reason: "must be zero or positive".to_string(),
        });
    }

    for (field, angle) in [
        ("projection.w_angle", config.projection.w_angle),
        ("projection.f1_angle", config.projection.f1_angle),
        ("projection.f2_angle", config.projection.f2_angle),
    ] {
        if !angle.is_finite() {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: "must be a finite number of degrees".to_string(),
            });
        }
    }

    if config.semantics.top_k == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "semantics.top_k".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if config.semantics.components == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "semantics.components".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
}

fn validate_required_fields(config: &NeurovizConfig, errors: &mut Vec<ConfigValidationError>) {
    let palette = &config.palette;
    let scatter = &config.scatter;
    let required = [
        ("palette.weight", palette.weight.as_str()),
        ("palette.feature_one", palette.feature_one.as_str()),
        ("palette.feature_two", palette.feature_two.as_str()),
        ("palette.sum", palette.sum.as_str()),
        ("palette.boundary", palette.boundary.as_str()),
        ("scatter.normal_color", scatter.normal_color.as_str()),
        ("scatter.top_color", scatter.top_color.as_str()),
        ("system.log_level", config.system.log_level.as_str()),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        }
    }
}

/// Case- and whitespace-insensitive match, the same normalisation the
/// log-format and layer-variant parsers apply
fn is_one_of(value: &str, choices: &[&str]) -> bool {
    let value = value.trim().to_lowercase();
    choices.contains(&value.as_str())
}

fn validate_enumerations(config: &NeurovizConfig, errors: &mut Vec<ConfigValidationError>) {
    if !is_one_of(&config.logging.format, &["text", "json"]) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: "must be 'text' or 'json'".to_string(),
        });
    }

    if !is_one_of(&config.layers.variant, &["primary", "alternate"]) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layers.variant".to_string(),
            reason: "must be 'primary' or 'alternate'".to_string(),
        });
    }
}
