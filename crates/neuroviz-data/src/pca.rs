// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Principal-component semantics
//!
//! Each principal component of the classifier logits is a loading vector over
//! the class labels. Sorting the labels by loading shows what the component
//! "means": the most positive and most negative labels form its semantic
//! signature.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DataError, DataResult};

/// PCA output as written by the analysis notebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaResult {
    /// One loading vector per component, each over every class label
    pub eigenvectors: Vec<Vec<f64>>,
}

impl PcaResult {
    pub fn from_json_str(json: &str, source: &Path) -> DataResult<Self> {
        serde_json::from_str(json).map_err(|e| DataError::Json {
            path: source.to_path_buf(),
            source: e,
        })
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pca = Self::from_json_str(&content, path)?;
        info!(
            "Loaded {} components of length {} from {}",
            pca.component_count(),
            pca.eigenvectors.first().map_or(0, Vec::len),
            path.display()
        );
        Ok(pca)
    }

    pub fn component_count(&self) -> usize {
        self.eigenvectors.len()
    }

    pub fn component(&self, index: usize) -> DataResult<&[f64]> {
        self.eigenvectors
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataError::ComponentOutOfRange {
                component: index,
                available: self.eigenvectors.len(),
            })
    }
}

/// Read one class label per line, trimming surrounding whitespace
pub fn load_labels(path: &Path) -> DataResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let labels: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();
    info!("Loaded {} labels from {}", labels.len(), path.display());
    Ok(labels)
}

/// A label with its loading on one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLoading {
    pub class_index: usize,
    pub label: String,
    pub loading: f64,
}

/// Extreme labels of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticSignature {
    /// Zero-based component index
    pub component: usize,
    /// Most positive loadings, strongest first
    pub positive: Vec<LabelLoading>,
    /// Most negative loadings, strongest first
    pub negative: Vec<LabelLoading>,
}

impl SemanticSignature {
    /// Display name, `PC1` for component 0
    pub fn name(&self) -> String {
        format!("PC{}", self.component + 1)
    }
}

/// Rank the labels of `component` and keep the `k` most extreme on each side
///
/// # Errors
///
/// `ComponentOutOfRange` if the component does not exist, `LabelsTooShort` if
/// there are fewer labels than loadings.
pub fn semantic_signature(
    pca: &PcaResult,
    labels: &[String],
    component: usize,
    k: usize,
) -> DataResult<SemanticSignature> {
    let loadings = pca.component(component)?;
    if labels.len() < loadings.len() {
        return Err(DataError::LabelsTooShort {
            labels: labels.len(),
            loadings: loadings.len(),
        });
    }

    // ascending by loading
    let mut order: Vec<usize> = (0..loadings.len()).collect();
    order.sort_by(|&a, &b| loadings[a].total_cmp(&loadings[b]));

    let entry = |i: usize| LabelLoading {
        class_index: i,
        label: labels[i].clone(),
        loading: loadings[i],
    };

    let positive = order.iter().rev().take(k).map(|&i| entry(i)).collect();
    let negative = order.iter().take(k).map(|&i| entry(i)).collect();

    Ok(SemanticSignature {
        component,
        positive,
        negative,
    })
}

/// Fixed 4-decimal loading with a space where a `+` sign would go
fn signed_loading(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("{:.4}", value)
    } else {
        format!(" {:.4}", value.abs())
    }
}

const RULE: &str = "======================================================";

impl fmt::Display for SemanticSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, " SEMANTIC SIGNATURE OF {}", self.name())?;
        writeln!(f, "{}", RULE)?;

        writeln!(f)?;
        writeln!(f, "Top {} MOST POSITIVE semantic labels:", self.positive.len())?;
        for entry in &self.positive {
            writeln!(f, "  + {}   {}", signed_loading(entry.loading), entry.label)?;
        }

        writeln!(f)?;
        writeln!(f, "Top {} MOST NEGATIVE semantic labels:", self.negative.len())?;
        for entry in &self.negative {
            writeln!(f, "  - {}   {}", signed_loading(entry.loading), entry.label)?;
        }
        Ok(())
    }
}
