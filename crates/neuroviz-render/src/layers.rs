// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Three-layer network sketch
//!
//! An input column of squares, a hidden column of circles and a single
//! right-pointing triangle as the output, all on a 500x500 canvas.

use std::str::FromStr;

use neuroviz_config::LayersConfig;
use neuroviz_math::Vec2;
use tracing::debug;

use crate::draw::{DrawCommands, DrawingSurface, Paint};
use crate::error::{RenderError, RenderResult};
use crate::svg::to_svg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerVariant {
    #[default]
    Primary,
    Alternate,
}

impl FromStr for LayerVariant {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(LayerVariant::Primary),
            "alternate" => Ok(LayerVariant::Alternate),
            other => Err(RenderError::UnknownVariant(other.to_string())),
        }
    }
}

/// Geometry and colours of the sketch
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDiagram {
    pub canvas_size: f64,
    pub square_count: usize,
    pub square_size: f64,
    pub spacing: f64,
    /// Left edge of the square column
    pub square_x: f64,
    /// Top margin of the square column
    pub top: f64,
    pub circle_x: f64,
    /// Circle centres sit at `offset + top`
    pub circle_offsets: Vec<f64>,
    pub triangle_x: f64,
    pub triangle_size: f64,
    pub square_fill: String,
    pub node_fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

const PRIMARY_FILL: &str = "#69b3a2";
const ALTERNATE_SQUARE_FILL: &str = "#696ab3ff";

impl Default for LayerDiagram {
    fn default() -> Self {
        Self::preset(LayerVariant::Primary)
    }
}

impl LayerDiagram {
    pub fn preset(variant: LayerVariant) -> Self {
        let base = Self {
            canvas_size: 500.0,
            square_count: 3,
            square_size: 50.0,
            spacing: 20.0,
            square_x: 75.0,
            top: 20.0,
            circle_x: 200.0,
            circle_offsets: vec![60.0, 130.0],
            triangle_x: 325.0,
            triangle_size: 25.0,
            square_fill: PRIMARY_FILL.to_string(),
            node_fill: PRIMARY_FILL.to_string(),
            stroke: "#333".to_string(),
            stroke_width: 2.0,
        };
        match variant {
            LayerVariant::Primary => base,
            LayerVariant::Alternate => Self {
                triangle_size: 35.0,
                square_fill: ALTERNATE_SQUARE_FILL.to_string(),
                ..base
            },
        }
    }

    /// Preset named by the config, with its overrides applied
    pub fn from_config(config: &LayersConfig) -> RenderResult<Self> {
        let mut diagram = Self::preset(config.variant.parse()?);
        if let Some(fill) = &config.fill {
            diagram.square_fill = fill.clone();
            diagram.node_fill = fill.clone();
        }
        if let Some(size) = config.triangle_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(RenderError::InvalidStyle(format!(
                    "triangle_size must be positive, got {}",
                    size
                )));
            }
            diagram.triangle_size = size;
        }
        Ok(diagram)
    }

    /// Total height of the square column including gaps
    pub fn stack_height(&self) -> f64 {
        let n = self.square_count as f64;
        n * self.square_size + (n - 1.0).max(0.0) * self.spacing
    }

    /// Top-left corner of square `i`
    pub fn square_origin(&self, i: usize) -> Vec2 {
        Vec2::new(
            self.square_x,
            i as f64 * (self.square_size + self.spacing) + self.top,
        )
    }

    /// Vertices of the output triangle, pointing right
    pub fn triangle_points(&self) -> [Vec2; 3] {
        let x = self.triangle_x;
        let y = self.top + self.stack_height() / 2.0;
        let h = self.triangle_size / 2.0;
        [
            Vec2::new(x - h, y - h),
            Vec2::new(x - h, y + h),
            Vec2::new(x + h, y),
        ]
    }

    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let square_paint = Paint::fill(&self.square_fill).with_stroke(&self.stroke, self.stroke_width);
        let node_paint = Paint::fill(&self.node_fill).with_stroke(&self.stroke, self.stroke_width);

        for i in 0..self.square_count {
            surface.rect(self.square_origin(i), self.square_size, self.square_size, &square_paint);
        }

        let radius = self.square_size / 2.0;
        for offset in &self.circle_offsets {
            surface.circle(Vec2::new(self.circle_x, offset + self.top), radius, &node_paint, None);
        }

        surface.polygon(&self.triangle_points(), &node_paint);
    }

    pub fn render(&self) -> DrawCommands {
        let mut commands = DrawCommands::new();
        self.draw(&mut commands);
        debug!("Rendered layer diagram: {} shapes", commands.len());
        commands
    }

    pub fn to_svg(&self) -> String {
        to_svg(&self.render(), self.canvas_size, self.canvas_size, None)
    }
}
