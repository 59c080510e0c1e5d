// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroviz Data
//!
//! Loading and shaping of the precomputed data the plots are drawn from:
//! - **Scores**: paired ViT PC1 / neuron response arrays, ranking and highlighting
//! - **PCA**: eigenvector loadings over class labels and their semantic signatures
//!
//! No drawing happens here; see `neuroviz-render` for that.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod pca;
pub mod scores;

pub use error::{DataError, DataResult};
pub use pca::{load_labels, semantic_signature, LabelLoading, PcaResult, SemanticSignature};
pub use scores::{image_path, HighlightRule, ScoreDataset, ScorePoint};
