// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroviz - Teaching Visualizations for Neural Projections
//!
//! neuroviz renders small, deterministic diagrams used in neural-network
//! teaching material. Every diagram is drawn through an abstract drawing
//! surface and serialised to SVG.
//!
//! ## Diagrams
//!
//! - **Projection visualizer**: a neuron's weight vector as an axis ("cone")
//!   that feature directions project onto, with ReLU filtering and the
//!   resulting interference
//! - **Layer sketch**: squares, circles and a triangle for a three-layer network
//! - **Score scatter**: ViT PC1 score against a neuron's response per image
//! - **PC semantics**: the most positive and negative class labels of each
//!   principal component (text report)
//!
//! ## Usage
//!
//! ```rust
//! use neuroviz::prelude::*;
//!
//! let mut viz = ProjectionVisualizer::new(ProjectionParams::default(), ProjectionStyle::default());
//! viz.apply(ParamUpdate::F2Angle(180.0));
//!
//! let svg = viz.frame().to_svg();
//! assert!(svg.starts_with("<svg"));
//! for line in &viz.frame().summary {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neuroviz-config, neuroviz-observability    │
//! │  (TOML + overrides, tracing setup)                      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Computation: neuroviz-math, neuroviz-data              │
//! │  (projection pipeline, score datasets, PCA semantics)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Output: neuroviz-render                                │
//! │  (DrawingSurface, SVG, the diagrams)                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

pub use neuroviz_config as config;
pub use neuroviz_data as data;
pub use neuroviz_math as math;
pub use neuroviz_observability as observability;
pub use neuroviz_render as render;

use neuroviz_config::{ConfigError, ConfigResult, NeurovizConfig};
use neuroviz_math::ParamUpdate;
use neuroviz_observability::{CrateDebugFlags, FileLoggingSettings, LogFormat, LoggingSettings};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, load_config_or_default, validate_config, NeurovizConfig};
    pub use crate::data::{
        load_labels, semantic_signature, HighlightRule, PcaResult, ScoreDataset, SemanticSignature,
    };
    pub use crate::math::{ParamUpdate, ProjectionParams, ProjectionState, Vec2, Viewport};
    pub use crate::render::{
        render_scatter, DrawCommands, DrawingSurface, LayerDiagram, LayerVariant, ProjectionFrame,
        ProjectionStyle, ProjectionVisualizer, ScatterStyle, SvgSurface,
    };
}

/// Translate the `[system]` and `[logging]` sections into logging settings
///
/// # Errors
///
/// `ConfigError::InvalidValue` for an unknown log format.
pub fn logging_settings(config: &NeurovizConfig) -> ConfigResult<LoggingSettings> {
    let format: LogFormat = config
        .logging
        .format
        .parse()
        .map_err(ConfigError::InvalidValue)?;

    let file = config.logging.file_logging.then(|| FileLoggingSettings {
        log_dir: config.logging.log_dir.clone(),
        retention_runs: config.logging.retention_runs,
    });

    Ok(LoggingSettings {
        level: config.system.log_level.clone(),
        format,
        file,
    })
}

/// Combine `system.debug`, `NEUROVIZ_DEBUG` and explicitly named crates
pub fn debug_flags<I, S>(config: &NeurovizConfig, crate_names: I) -> CrateDebugFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = CrateDebugFlags::from_names(crate_names);
    flags.merge(neuroviz_observability::debug_flags_from_env());
    if config.system.debug {
        flags.enable_all();
    }
    flags
}

/// Projection flags shared by the binary and the override mapping
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct ProjectionFlags {
    /// Weight vector angle in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub w_angle: Option<f64>,

    /// Half-width of the cone around w in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub cone_half: Option<f64>,

    /// Feature 1 angle in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub f1_angle: Option<f64>,

    /// Feature 2 angle in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub f2_angle: Option<f64>,

    /// Switch feature 1 off
    #[arg(long, default_value_t = false)]
    pub f1_off: bool,

    /// Switch feature 2 off
    #[arg(long, default_value_t = false)]
    pub f2_off: bool,

    /// Show the signed readout ReLU(w·x) − ReLU(−w·x)
    #[arg(long, default_value_t = false)]
    pub signed: bool,
}

impl ProjectionFlags {
    /// Override keys for the flags that were given
    ///
    /// Keyed the way `neuroviz_config::apply_cli_overrides` expects; switches
    /// left at their default emit nothing so the configuration keeps its value.
    pub fn overrides(&self) -> HashMap<String, String> {
        let mut overrides: HashMap<String, String> = [
            ("w_angle", self.w_angle),
            ("cone_half_deg", self.cone_half),
            ("f1_angle", self.f1_angle),
            ("f2_angle", self.f2_angle),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.to_string())))
        .collect();

        for (key, set, value) in [
            ("f1_on", self.f1_off, "false"),
            ("f2_on", self.f2_off, "false"),
            ("show_signed", self.signed, "true"),
        ] {
            if set {
                overrides.insert(key.to_string(), value.to_string());
            }
        }
        overrides
    }
}

/// Read a JSON array of parameter updates, e.g. `[{"param": "w_angle", "value": 90}]`
pub fn load_updates(path: &Path) -> anyhow::Result<Vec<ParamUpdate>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read updates from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Malformed parameter updates in {}", path.display()))
}
