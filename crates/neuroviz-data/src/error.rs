// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for data loading

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Score arrays differ in length: {vit} ViT scores vs {neuron} neuron scores")]
    LengthMismatch { vit: usize, neuron: usize },

    #[error("Component PC{} requested but only {available} available", .component + 1)]
    ComponentOutOfRange { component: usize, available: usize },

    #[error("Label file has {labels} entries but loadings have {loadings}")]
    LabelsTooShort { labels: usize, loadings: usize },
}

pub type DataResult<T> = Result<T, DataError>;
