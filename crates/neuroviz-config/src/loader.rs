// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeurovizConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "neuroviz_configuration.toml";

/// Find the neuroviz configuration file
///
/// Search order:
/// 1. `NEUROVIZ_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroviz_configuration.toml`
/// 3. Parent directory: `../neuroviz_configuration.toml`
/// 4. Workspace root (searches up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEUROVIZ_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEUROVIZ_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "neuroviz configuration file '{}' not found in any of these locations:\n{}\n\nSet NEUROVIZ_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeurovizConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    info!("Loading configuration from {}", config_file.display());
    let content = fs::read_to_string(&config_file)?;
    let mut config: NeurovizConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like [`load_config`], but falls back to built-in defaults when no file is
/// found during discovery
///
/// An explicitly given `config_path` must exist. Overrides are applied to the
/// defaults the same way they would be applied to a file.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeurovizConfig> {
    if config_path.is_some() {
        return load_config(config_path, cli_args);
    }

    match load_config(None, cli_args) {
        Err(ConfigError::FileNotFound(msg)) => {
            debug!("{}", msg);
            warn!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
            let mut config = NeurovizConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        other => other,
    }
}

fn parse_bool(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower == "true" || lower == "1" || lower == "yes"
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!("Ignoring override {}={}: not a valid value", key, value),
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROVIZ_LOG_LEVEL` -> `system.log_level`
/// - `NEUROVIZ_LOG_FORMAT` -> `logging.format`
/// - `NEUROVIZ_LOG_DIR` -> `logging.log_dir`
/// - `NEUROVIZ_CANVAS_WIDTH` / `_HEIGHT` / `_RADIUS` -> `canvas.*`
/// - `NEUROVIZ_LAYERS_VARIANT` -> `layers.variant`
/// - `NEUROVIZ_SCATTER_VIT_PATH` -> `scatter.vit_path`
/// - `NEUROVIZ_SCATTER_NEURON_PATH` -> `scatter.neuron_path`
/// - `NEUROVIZ_SCATTER_IMAGE_DIR` -> `scatter.image_dir`
/// - `NEUROVIZ_JITTER_SEED` -> `scatter.jitter_seed`
/// - `NEUROVIZ_PCA_PATH` -> `semantics.pca_path`
/// - `NEUROVIZ_LABELS_PATH` -> `semantics.labels_path`
/// - `NEUROVIZ_TOP_K` -> `semantics.top_k`
pub fn apply_environment_overrides(config: &mut NeurovizConfig) {
    // System / logging
    if let Ok(value) = env::var("NEUROVIZ_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("NEUROVIZ_LOG_FORMAT") {
        config.logging.format = value;
    }
    if let Ok(value) = env::var("NEUROVIZ_LOG_DIR") {
        config.logging.log_dir = PathBuf::from(value);
    }

    // Canvas
    if let Ok(value) = env::var("NEUROVIZ_CANVAS_WIDTH") {
        set_parsed(&mut config.canvas.width, "NEUROVIZ_CANVAS_WIDTH", &value);
    }
    if let Ok(value) = env::var("NEUROVIZ_CANVAS_HEIGHT") {
        set_parsed(&mut config.canvas.height, "NEUROVIZ_CANVAS_HEIGHT", &value);
    }
    if let Ok(value) = env::var("NEUROVIZ_CANVAS_RADIUS") {
        set_parsed(&mut config.canvas.radius, "NEUROVIZ_CANVAS_RADIUS", &value);
    }

    if let Ok(value) = env::var("NEUROVIZ_LAYERS_VARIANT") {
        config.layers.variant = value;
    }

    // Scatter inputs
    if let Ok(value) = env::var("NEUROVIZ_SCATTER_VIT_PATH") {
        config.scatter.vit_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROVIZ_SCATTER_NEURON_PATH") {
        config.scatter.neuron_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROVIZ_SCATTER_IMAGE_DIR") {
        config.scatter.image_dir = value;
    }
    if let Ok(value) = env::var("NEUROVIZ_JITTER_SEED") {
        set_parsed(&mut config.scatter.jitter_seed, "NEUROVIZ_JITTER_SEED", &value);
    }

    // Semantics inputs
    if let Ok(value) = env::var("NEUROVIZ_PCA_PATH") {
        config.semantics.pca_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROVIZ_LABELS_PATH") {
        config.semantics.labels_path = PathBuf::from(value);
    }
    if let Ok(value) = env::var("NEUROVIZ_TOP_K") {
        set_parsed(&mut config.semantics.top_k, "NEUROVIZ_TOP_K", &value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"w_angle": "90", "f2_on": "false"}`)
pub fn apply_cli_overrides(config: &mut NeurovizConfig, cli_args: &HashMap<String, String>) {
    // System / logging
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.clone();
    }
    if let Some(value) = cli_args.get("debug") {
        config.system.debug = parse_bool(value);
    }

    // Canvas
    if let Some(value) = cli_args.get("canvas_width") {
        set_parsed(&mut config.canvas.width, "canvas_width", value);
    }
    if let Some(value) = cli_args.get("canvas_height") {
        set_parsed(&mut config.canvas.height, "canvas_height", value);
    }
    if let Some(value) = cli_args.get("canvas_radius") {
        set_parsed(&mut config.canvas.radius, "canvas_radius", value);
    }

    // Projection parameters
    let projection = &mut config.projection;
    if let Some(value) = cli_args.get("w_angle") {
        set_parsed(&mut projection.w_angle, "w_angle", value);
    }
    if let Some(value) = cli_args.get("cone_half_deg") {
        set_parsed(&mut projection.cone_half_deg, "cone_half_deg", value);
    }
    if let Some(value) = cli_args.get("f1_angle") {
        set_parsed(&mut projection.f1_angle, "f1_angle", value);
    }
    if let Some(value) = cli_args.get("f2_angle") {
        set_parsed(&mut projection.f2_angle, "f2_angle", value);
    }
    if let Some(value) = cli_args.get("f1_on") {
        projection.f1_on = parse_bool(value);
    }
    if let Some(value) = cli_args.get("f2_on") {
        projection.f2_on = parse_bool(value);
    }
    if let Some(value) = cli_args.get("show_signed") {
        projection.show_signed = parse_bool(value);
    }

    // Layer diagram
    if let Some(value) = cli_args.get("layers_variant") {
        config.layers.variant = value.clone();
    }

    // Scatter
    if let Some(value) = cli_args.get("vit_path") {
        config.scatter.vit_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("neuron_path") {
        config.scatter.neuron_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("image_dir") {
        config.scatter.image_dir = value.clone();
    }
    if let Some(value) = cli_args.get("jitter_seed") {
        set_parsed(&mut config.scatter.jitter_seed, "jitter_seed", value);
    }
    if let Some(value) = cli_args.get("jitter_scale") {
        set_parsed(&mut config.scatter.jitter_scale, "jitter_scale", value);
    }

    // Semantics
    if let Some(value) = cli_args.get("pca_path") {
        config.semantics.pca_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("labels_path") {
        config.semantics.labels_path = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("top_k") {
        set_parsed(&mut config.semantics.top_k, "top_k", value);
    }
    if let Some(value) = cli_args.get("components") {
        set_parsed(&mut config.semantics.components, "components", value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("NEUROVIZ_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("NEUROVIZ_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        env::set_var("NEUROVIZ_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("NEUROVIZ_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_width = env::var("NEUROVIZ_CANVAS_WIDTH").ok();
        env::remove_var("NEUROVIZ_CANVAS_WIDTH");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[canvas]").unwrap();
        writeln!(file, "width = 800.0").unwrap();
        writeln!(file, "[projection]").unwrap();
        writeln!(file, "w_angle = 90.0").unwrap();
        writeln!(file, "f2_on = false").unwrap();

        let config = load_config(Some(config_path.as_path()), None).unwrap();

        assert_eq!(config.canvas.width, 800.0);
        assert_eq!(config.canvas.height, 520.0);
        assert_eq!(config.projection.w_angle, 90.0);
        assert_eq!(config.projection.f1_angle, 5.0);
        assert!(!config.projection.f2_on);

        if let Some(value) = saved_width {
            env::set_var("NEUROVIZ_CANVAS_WIDTH", value);
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[canvas\nwidth = ").unwrap();

        let result = load_config(Some(config_path.as_path()), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeurovizConfig::default();

        env::set_var("NEUROVIZ_CANVAS_RADIUS", "150");
        env::set_var("NEUROVIZ_TOP_K", "5");
        env::set_var("NEUROVIZ_JITTER_SEED", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("NEUROVIZ_CANVAS_RADIUS");
        env::remove_var("NEUROVIZ_TOP_K");
        env::remove_var("NEUROVIZ_JITTER_SEED");

        assert_eq!(config.canvas.radius, 150.0);
        assert_eq!(config.semantics.top_k, 5);
        // Unparseable values leave the previous setting untouched
        assert_eq!(config.scatter.jitter_seed, 0);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NeurovizConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("w_angle".to_string(), "-45".to_string());
        cli_args.insert("f1_on".to_string(), "false".to_string());
        cli_args.insert("show_signed".to_string(), "yes".to_string());
        cli_args.insert("layers_variant".to_string(), "alternate".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.projection.w_angle, -45.0);
        assert!(!config.projection.f1_on);
        assert!(config.projection.show_signed);
        assert_eq!(config.layers.variant, "alternate");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[canvas]").unwrap();
        writeln!(file, "width = 100.0").unwrap();
        writeln!(file, "height = 100.0").unwrap();

        env::set_var("NEUROVIZ_CANVAS_WIDTH", "200");
        env::set_var("NEUROVIZ_CANVAS_HEIGHT", "300");

        let mut cli_args = HashMap::new();
        cli_args.insert("canvas_width".to_string(), "400".to_string());

        let config = load_config(Some(config_path.as_path()), Some(&cli_args)).unwrap();

        env::remove_var("NEUROVIZ_CANVAS_WIDTH");
        env::remove_var("NEUROVIZ_CANVAS_HEIGHT");

        // CLI wins for width, env wins for height (no CLI override)
        assert_eq!(config.canvas.width, 400.0);
        assert_eq!(config.canvas.height, 300.0);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = load_config_or_default(Some(missing.as_path()), None);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
