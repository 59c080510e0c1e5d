// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! ViT PC1 score vs neuron response scatter plot
//!
//! Points are jittered horizontally with a seeded generator so the same data
//! and seed always give the same picture. Highlighted points (strongest
//! responses plus pinned images) use the accent colour.

use std::collections::BTreeSet;

use neuroviz_config::ScatterConfig;
use neuroviz_data::{HighlightRule, ScoreDataset, ScorePoint};
use neuroviz_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::draw::{DrawCommands, DrawingSurface, Paint, TextAnchor, TextStyle};
use crate::error::{RenderError, RenderResult};
use crate::scale::{LinearScale, DEFAULT_TICKS};
use crate::svg::to_svg;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT: &str = "10px";
const TITLE_FONT: &str = "14px";
const AXIS_COLOR: &str = "currentColor";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 50.0,
            left: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterStyle {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub normal_color: String,
    pub top_color: String,
    pub point_radius: f64,
    pub point_opacity: f64,
    pub jitter_scale: f64,
    pub jitter_seed: u64,
    pub highlight: HighlightRule,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self::from_config(&ScatterConfig::default())
    }
}

impl ScatterStyle {
    pub fn from_config(config: &ScatterConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margins: Margins::default(),
            normal_color: config.normal_color.clone(),
            top_color: config.top_color.clone(),
            point_radius: config.point_radius,
            point_opacity: config.point_opacity,
            jitter_scale: config.jitter_scale,
            jitter_seed: config.jitter_seed,
            highlight: HighlightRule {
                ranks: config.highlight_ranks.clone(),
                pinned: config.pinned_indices.clone(),
            },
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
        }
    }

    fn validate(&self) -> RenderResult<()> {
        let inner_w = self.width - self.margins.left - self.margins.right;
        let inner_h = self.height - self.margins.top - self.margins.bottom;
        if !(inner_w > 0.0 && inner_h > 0.0) {
            return Err(RenderError::InvalidStyle(format!(
                "{}x{} leaves no plot area inside the margins",
                self.width, self.height
            )));
        }
        if !(self.jitter_scale.is_finite() && self.jitter_scale >= 0.0) {
            return Err(RenderError::InvalidStyle(format!(
                "jitter_scale must be non-negative, got {}",
                self.jitter_scale
            )));
        }
        Ok(())
    }
}

/// A rendered scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFrame {
    pub commands: DrawCommands,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    /// Dataset indices drawn in the accent colour
    pub highlighted: BTreeSet<usize>,
    width: f64,
    height: f64,
}

impl ScatterFrame {
    pub fn to_svg(&self) -> String {
        to_svg(&self.commands, self.width, self.height, None)
    }
}

/// Hover text of one point
fn tooltip(point: &ScorePoint) -> String {
    format!(
        "{}\nImage: {}\nViT PC1: {:.2}\nNeuron: {:.3}",
        point.image, point.idx, point.x, point.y
    )
}

fn draw_bottom_axis<S: DrawingSurface + ?Sized>(surface: &mut S, scale: &LinearScale, y: f64) {
    let (r0, r1) = scale.range();
    let stroke = Paint::stroke(AXIS_COLOR, 1.0);
    surface.line(Vec2::new(r0, y), Vec2::new(r1, y), &stroke, false);

    let label_style = TextStyle {
        fill: Some(AXIS_COLOR.to_string()),
        font_size: Some(TICK_FONT.to_string()),
        anchor: TextAnchor::Middle,
        // baseline sits 0.71em below the anchor
        dy: 7.1,
        ..TextStyle::default()
    };
    for tick in scale.ticks(DEFAULT_TICKS) {
        let x = scale.apply(tick);
        surface.line(Vec2::new(x, y), Vec2::new(x, y + TICK_SIZE), &stroke, false);
        surface.text(
            Vec2::new(x, y + TICK_SIZE + TICK_PADDING),
            &scale.tick_label(tick, DEFAULT_TICKS),
            &label_style,
        );
    }
}

fn draw_left_axis<S: DrawingSurface + ?Sized>(surface: &mut S, scale: &LinearScale, x: f64) {
    let (r0, r1) = scale.range();
    let stroke = Paint::stroke(AXIS_COLOR, 1.0);
    surface.line(Vec2::new(x, r0), Vec2::new(x, r1), &stroke, false);

    let label_style = TextStyle {
        fill: Some(AXIS_COLOR.to_string()),
        font_size: Some(TICK_FONT.to_string()),
        anchor: TextAnchor::End,
        dy: 3.2,
        ..TextStyle::default()
    };
    for tick in scale.ticks(DEFAULT_TICKS) {
        let y = scale.apply(tick);
        surface.line(Vec2::new(x - TICK_SIZE, y), Vec2::new(x, y), &stroke, false);
        surface.text(
            Vec2::new(x - TICK_SIZE - TICK_PADDING, y),
            &scale.tick_label(tick, DEFAULT_TICKS),
            &label_style,
        );
    }
}

/// Lay out and draw the scatter plot for `dataset`
///
/// # Errors
///
/// `EmptyDataset` when there is nothing to plot, `InvalidStyle` when the
/// canvas has no room inside its margins.
pub fn render_scatter(dataset: &ScoreDataset, style: &ScatterStyle) -> RenderResult<ScatterFrame> {
    style.validate()?;
    let (x_extent, y_extent) = match (dataset.x_extent(), dataset.y_extent()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(RenderError::EmptyDataset("no finite scores".to_string())),
    };

    let m = style.margins;
    let x_scale = LinearScale::new(x_extent, (m.left, style.width - m.right)).nice(DEFAULT_TICKS);
    let y_scale =
        LinearScale::new(y_extent, (style.height - m.bottom, m.top)).nice(DEFAULT_TICKS);

    let highlighted = dataset.highlighted(&style.highlight);
    let mut commands = DrawCommands::new();

    draw_bottom_axis(&mut commands, &x_scale, style.height - m.bottom);
    draw_left_axis(&mut commands, &y_scale, m.left);

    let title = |rotate: Option<f64>| TextStyle {
        font_size: Some(TITLE_FONT.to_string()),
        anchor: TextAnchor::Middle,
        rotate,
        ..TextStyle::default()
    };
    commands.text(
        Vec2::new(style.width / 2.0, style.height - 10.0),
        &style.x_label,
        &title(None),
    );
    // rotated frame: x runs up the canvas
    commands.text(
        Vec2::new(-style.height / 2.0, 20.0),
        &style.y_label,
        &title(Some(-90.0)),
    );

    let mut rng = StdRng::seed_from_u64(style.jitter_seed);
    let normal = Paint::fill(&style.normal_color).with_opacity(style.point_opacity);
    let accent = Paint::fill(&style.top_color).with_opacity(style.point_opacity);

    for point in dataset.points() {
        let jitter = (rng.gen::<f64>() - 0.5) * style.jitter_scale;
        let center = Vec2::new(x_scale.apply(point.x + jitter), y_scale.apply(point.y));
        let paint = if highlighted.contains(&point.idx) {
            &accent
        } else {
            &normal
        };
        commands.circle(center, style.point_radius, paint, Some(&tooltip(point)));
    }

    debug!(
        "Rendered scatter: {} points, {} highlighted, x domain {:?}, y domain {:?}",
        dataset.len(),
        highlighted.len(),
        x_scale.domain(),
        y_scale.domain()
    );

    Ok(ScatterFrame {
        commands,
        x_scale,
        y_scale,
        highlighted,
        width: style.width,
        height: style.height,
    })
}
