// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroviz Render
//!
//! Turns derived state into drawing instructions:
//! - **Draw**: the `DrawingSurface` primitives and a replayable command recorder
//! - **SVG**: a surface that serialises primitives into an SVG document
//! - **Scale**: linear data → pixel scales with "nice" domains and ticks
//! - **Projection view**: weight/feature arrows, cone and numeric summary
//! - **Layers**: the three-layer network sketch
//! - **Scatter**: ViT PC1 score vs neuron response plot
//!
//! Nothing here computes the projection maths; it only consumes
//! `neuroviz_math::ProjectionState`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod draw;
pub mod error;
pub mod layers;
pub mod projection_view;
pub mod scale;
pub mod scatter;
pub mod svg;

pub use draw::{Arc, DrawCommand, DrawCommands, DrawingSurface, Paint, TextAnchor, TextStyle};
pub use error::{RenderError, RenderResult};
pub use layers::{LayerDiagram, LayerVariant};
pub use projection_view::{render, summary_lines, ProjectionFrame, ProjectionStyle, ProjectionVisualizer};
pub use scale::LinearScale;
pub use scatter::{render_scatter, Margins, ScatterFrame, ScatterStyle};
pub use svg::{to_svg, SvgSurface};
