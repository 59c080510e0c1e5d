// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroviz Maths (Platform-Agnostic)
//!
//! All computation behind the visualizations, with no drawing and no I/O:
//! - **Vector**: fixed-size 2-D vector arithmetic (polar, dot, unit, ...)
//! - **Activation**: ReLU, signed readout and interference
//! - **Projection**: the parameter → vectors → scalars derivation pipeline
//! - **Viewport**: the affine map from unit space onto a drawing surface
//!
//! Every function here is pure; calling it twice with the same inputs yields
//! bit-identical results.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activation;
pub mod projection;
pub mod vector;
pub mod viewport;

pub use activation::{interference, relu, signed_readout};
pub use projection::{ParamUpdate, ProjectionParams, ProjectionState};
pub use vector::{deg_to_rad, rad_to_deg, Vec2, UNIT_EPSILON};
pub use viewport::Viewport;
