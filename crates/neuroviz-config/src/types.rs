// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroviz_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use neuroviz_math::ProjectionParams;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeurovizConfig {
    pub system: SystemConfig,
    pub logging: LoggingConfig,
    pub canvas: CanvasConfig,
    /// Initial parameters of the projection visualizer
    pub projection: ProjectionParams,
    pub palette: PaletteConfig,
    pub layers: LayersConfig,
    pub scatter: ScatterConfig,
    pub semantics: SemanticsConfig,
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    pub debug: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "text" or "json"
    pub format: String,
    pub file_logging: bool,
    pub log_dir: PathBuf,
    /// Number of most recent run folders kept in `log_dir`
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
            retention_runs: 10,
        }
    }
}

/// Projection visualizer canvas
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Radius of the bounding circle; unit vectors are scaled by it
    pub radius: f64,
    pub background: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 520.0,
            radius: 200.0,
            background: None,
        }
    }
}

/// Colours of the projection visualizer
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub weight: String,
    pub feature_one: String,
    pub feature_two: String,
    pub sum: String,
    pub boundary: String,
    pub cone_opacity: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            weight: "#22c55e".to_string(),
            feature_one: "#60a5fa".to_string(),
            feature_two: "#f472b6".to_string(),
            sum: "#eab308".to_string(),
            boundary: "#333".to_string(),
            cone_opacity: 0.15,
        }
    }
}

/// Layer diagram preset and overrides
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayersConfig {
    /// "primary" or "alternate"
    pub variant: String,
    pub fill: Option<String>,
    pub triangle_size: Option<f64>,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            variant: "primary".to_string(),
            fill: None,
            triangle_size: None,
        }
    }
}

/// Score scatter plot settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub width: f64,
    pub height: f64,
    pub vit_path: PathBuf,
    pub neuron_path: PathBuf,
    /// Directory holding `scene_NNN.png` thumbnails referenced by tooltips
    pub image_dir: String,
    pub normal_color: String,
    pub top_color: String,
    pub point_radius: f64,
    pub point_opacity: f64,
    /// Horizontal jitter amplitude in data units
    pub jitter_scale: f64,
    pub jitter_seed: u64,
    /// Ranks (0 = strongest neuron response) that get highlighted
    pub highlight_ranks: Vec<usize>,
    /// Dataset indices that are always highlighted
    pub pinned_indices: Vec<usize>,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 350.0,
            vit_path: PathBuf::from("data_dev/scores_vit_full.json"),
            neuron_path: PathBuf::from("data_dev/neuron_scores.json"),
            image_dir: "data_dev".to_string(),
            normal_color: "#9AD1D4".to_string(),
            top_color: "#EA2B7F".to_string(),
            point_radius: 4.0,
            point_opacity: 0.85,
            jitter_scale: 0.6,
            jitter_seed: 0,
            highlight_ranks: vec![0, 1, 2, 4],
            pinned_indices: vec![47, 15],
            x_label: "ViT PC1 Score".to_string(),
            y_label: "Neuron Response".to_string(),
        }
    }
}

/// Principal-component semantics report
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SemanticsConfig {
    pub pca_path: PathBuf,
    pub labels_path: PathBuf,
    pub top_k: usize,
    /// Number of leading components reported
    pub components: usize,
}

impl Default for SemanticsConfig {
    fn default() -> Self {
        Self {
            pca_path: PathBuf::from("vit_pca.json"),
            labels_path: PathBuf::from("imagenet1000_clsidx_to_labels.txt"),
            top_k: 20,
            components: 3,
        }
    }
}
