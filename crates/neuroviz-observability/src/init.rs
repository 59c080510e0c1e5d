// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for neuroviz
//!
//! Console output is always installed; with the `file-logging` feature a
//! combined JSON log file is written into a timestamped run folder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging initialization result
///
/// Keep it alive for the lifetime of the program; dropping it flushes and
/// closes any file writers.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder holding the log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` directive string for the given flags and settings
///
/// `RUST_LOG`, when set, replaces the computed directives entirely.
pub fn filter_directives(debug_flags: &CrateDebugFlags, settings: &LoggingSettings) -> String {
    match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => debug_flags.to_filter_string(&settings.level),
    }
}

/// Initialize logging with console output (and file output if configured)
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `settings` - Level, console format and optional file destination
///
/// # Errors
///
/// Fails on an invalid filter directive, an unusable log directory, or when a
/// global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, settings: &LoggingSettings) -> Result<LoggingGuard> {
    let directives = filter_directives(debug_flags, settings);
    let env_filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer: BoxedLayer = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .with_filter(env_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();
    #[allow(unused_mut)]
    let mut log_dir = None;

    if let Some(file) = &settings.file {
        #[cfg(feature = "file-logging")]
        {
            let run_folder = file_logging::prepare_run_folder(&file.log_dir, file.retention_runs)?;
            let appender = tracing_appender::rolling::daily(&run_folder, "neuroviz.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            file_guards.push(guard);

            let file_filter = EnvFilter::try_new(&directives)
                .with_context(|| format!("Invalid log filter: {}", directives))?;
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(file_filter)
                .boxed();
            layers.push(file_layer);
            log_dir = Some(run_folder);
        }

        #[cfg(not(feature = "file-logging"))]
        eprintln!(
            "Warning: file logging to {} requested but the `file-logging` feature is disabled",
            file.log_dir.display()
        );
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

#[cfg(feature = "file-logging")]
mod file_logging {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::{NaiveDateTime, Utc};

    const RUN_PREFIX: &str = "run_";
    const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Create `<base>/run_<timestamp>` and prune older runs
    pub(super) fn prepare_run_folder(base_log_dir: &Path, retention_runs: usize) -> Result<PathBuf> {
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT);
        let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_runs(base_log_dir, retention_runs)?;
        Ok(run_folder)
    }

    /// Keep only the most recent `retention_runs` run folders
    pub(super) fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
        if !base_log_dir.exists() {
            return Ok(());
        }

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let stamp = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(RUN_PREFIX))
                .and_then(|s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok());
            if let Some(dt) = stamp {
                runs.push((path, dt));
            }
        }

        // Oldest first
        runs.sort_by_key(|(_, dt)| *dt);

        if runs.len() > retention_runs {
            let to_remove = runs.len() - retention_runs;
            for (path, _) in runs.iter().take(to_remove) {
                if let Err(e) = std::fs::remove_dir_all(path) {
                    eprintln!("Warning: Failed to remove old log directory {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }

}
