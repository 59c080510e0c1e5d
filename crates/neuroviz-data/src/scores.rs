// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Paired score dataset
//!
//! Two equally long JSON arrays of numbers are paired index by index: the
//! ViT first-principal-component score becomes `x`, the recorded neuron
//! response becomes `y`. Each point also knows the thumbnail it came from.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{DataError, DataResult};

/// One stimulus image with its two scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    /// ViT PC1 score
    pub x: f64,
    /// Neuron response
    pub y: f64,
    /// Position in the source arrays
    pub idx: usize,
    /// Thumbnail path, `<image_dir>/scene_NNN.png`
    pub image: String,
}

/// Which points get highlighted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Positions in the response ranking (0 = strongest response)
    pub ranks: Vec<usize>,
    /// Dataset indices highlighted regardless of rank
    pub pinned: Vec<usize>,
}

impl Default for HighlightRule {
    fn default() -> Self {
        Self {
            ranks: vec![0, 1, 2, 4],
            pinned: vec![47, 15],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreDataset {
    points: Vec<ScorePoint>,
}

/// Thumbnail path for dataset index `idx`
pub fn image_path(image_dir: &str, idx: usize) -> String {
    let dir = image_dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("scene_{:03}.png", idx)
    } else {
        format!("{}/scene_{:03}.png", dir, idx)
    }
}

fn read_scores(path: &Path) -> DataResult<Vec<f64>> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

impl ScoreDataset {
    /// Pair two score arrays
    ///
    /// # Errors
    ///
    /// `DataError::LengthMismatch` when the arrays differ in length.
    pub fn from_scores(vit: &[f64], neuron: &[f64], image_dir: &str) -> DataResult<Self> {
        if vit.len() != neuron.len() {
            return Err(DataError::LengthMismatch {
                vit: vit.len(),
                neuron: neuron.len(),
            });
        }

        let points = vit
            .iter()
            .zip(neuron)
            .enumerate()
            .map(|(idx, (&x, &y))| ScorePoint {
                x,
                y,
                idx,
                image: image_path(image_dir, idx),
            })
            .collect();

        Ok(Self { points })
    }

    /// Load both arrays from JSON files
    pub fn load(vit_path: &Path, neuron_path: &Path, image_dir: &str) -> DataResult<Self> {
        let vit = read_scores(vit_path)?;
        let neuron = read_scores(neuron_path)?;
        info!(
            "Loaded {} ViT scores from {} and {} neuron scores from {}",
            vit.len(),
            vit_path.display(),
            neuron.len(),
            neuron_path.display()
        );
        Self::from_scores(&vit, &neuron, image_dir)
    }

    pub fn points(&self) -> &[ScorePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points ordered by neuron response, strongest first
    ///
    /// The sort is stable, so equal responses keep dataset order.
    pub fn ranked_by_response(&self) -> Vec<&ScorePoint> {
        let mut ranked: Vec<&ScorePoint> = self.points.iter().collect();
        ranked.sort_by(|a, b| b.y.total_cmp(&a.y));
        ranked
    }

    /// Dataset indices selected by `rule`
    ///
    /// Ranks past the end of the ranking and pinned indices outside the
    /// dataset are skipped.
    pub fn highlighted(&self, rule: &HighlightRule) -> BTreeSet<usize> {
        let ranked = self.ranked_by_response();
        let mut selected = BTreeSet::new();

        for &rank in &rule.ranks {
            match ranked.get(rank) {
                Some(point) => {
                    selected.insert(point.idx);
                }
                None => warn!("Highlight rank {} skipped: only {} points", rank, ranked.len()),
            }
        }

        for &idx in &rule.pinned {
            if idx < self.points.len() {
                selected.insert(idx);
            } else {
                warn!("Pinned index {} skipped: only {} points", idx, self.points.len());
            }
        }

        selected
    }

    /// `(min, max)` of the x scores, `None` when empty
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.x))
    }

    /// `(min, max)` of the y scores, `None` when empty
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.y))
    }
}

/// Min and max of the finite values, ignoring NaN
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(neuron: &[f64]) -> ScoreDataset {
        let vit: Vec<f64> = (0..neuron.len()).map(|i| i as f64 * 0.5).collect();
        ScoreDataset::from_scores(&vit, neuron, "data_dev").unwrap()
    }

    #[test]
    fn test_pairing_and_image_paths() {
        let ds = ScoreDataset::from_scores(&[1.0, 2.0], &[0.1, 0.2], "data_dev/").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.points()[1].x, 2.0);
        assert_eq!(ds.points()[1].y, 0.2);
        assert_eq!(ds.points()[0].image, "data_dev/scene_000.png");
        assert_eq!(image_path("", 7), "scene_007.png");
        assert_eq!(image_path("imgs", 123), "imgs/scene_123.png");
    }

    #[test]
    fn test_length_mismatch() {
        let result = ScoreDataset::from_scores(&[1.0, 2.0, 3.0], &[0.1], "");
        assert!(matches!(
            result,
            Err(DataError::LengthMismatch { vit: 3, neuron: 1 })
        ));
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let ds = dataset(&[0.3, 0.9, 0.3, -1.0, 0.5]);
        let order: Vec<usize> = ds.ranked_by_response().iter().map(|p| p.idx).collect();
        assert_eq!(order, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_highlight_skips_rank_three() {
        // responses descending: idx 5,4,3,2,1,0
        let ds = dataset(&[0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
        let selected = ds.highlighted(&HighlightRule {
            ranks: vec![0, 1, 2, 4],
            pinned: vec![],
        });
        let expected: BTreeSet<usize> = [5, 4, 3, 1].into_iter().collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_highlight_pins_and_out_of_range() {
        let ds = dataset(&[0.0, 0.1, 0.2]);
        let selected = ds.highlighted(&HighlightRule::default());
        // ranks 0..=2 cover everything, rank 4 and pins 47/15 are out of range
        assert_eq!(selected.len(), 3);

        let ds = dataset(&vec![0.0; 50]);
        let selected = ds.highlighted(&HighlightRule {
            ranks: vec![],
            pinned: vec![47, 15],
        });
        let expected: BTreeSet<usize> = [15, 47].into_iter().collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_extents() {
        let ds = dataset(&[0.3, -0.2, f64::NAN, 0.7]);
        assert_eq!(ds.y_extent(), Some((-0.2, 0.7)));
        assert_eq!(ds.x_extent(), Some((0.0, 1.5)));
        assert_eq!(ScoreDataset::default().x_extent(), None);
    }
}
