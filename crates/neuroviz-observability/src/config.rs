// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console log format
    pub format: LogFormat,

    /// File output, if enabled
    pub file: Option<FileLoggingSettings>,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// File logging destination and retention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingSettings {
    /// Base directory; each run gets its own `run_<timestamp>` folder
    pub log_dir: PathBuf,

    /// Keep the N most recent run folders
    pub retention_runs: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

impl Default for FileLoggingSettings {
    fn default() -> Self {
        FileLoggingSettings {
            log_dir: PathBuf::from("./logs"),
            retention_runs: 10,
        }
    }
}
