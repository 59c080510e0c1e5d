// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unit space → drawing surface mapping

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::vector::Vec2;

/// Affine map from unit space (y up) onto a surface (y down)
///
/// The origin lands on `center`, unit length becomes `radius` surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub center: Vec2,
    pub radius: f64,
}

impl Viewport {
    /// Viewport centred on a `width` x `height` canvas
    pub fn centered(width: f64, height: f64, radius: f64) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            radius,
        }
    }

    /// Map a unit-space vector to surface coordinates
    ///
    /// # Example
    /// ```
    /// use neuroviz_math::{Vec2, Viewport};
    ///
    /// let vp = Viewport::centered(720.0, 520.0, 200.0);
    /// assert_eq!(vp.to_surface(Vec2::new(1.0, 0.0)), Vec2::new(560.0, 260.0));
    /// assert_eq!(vp.to_surface(Vec2::new(0.0, 1.0)), Vec2::new(360.0, 60.0));
    /// ```
    #[inline]
    pub fn to_surface(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.center.x + v.x * self.radius, self.center.y - v.y * self.radius)
    }

    /// Surface point on the rim at `angle_deg` (counterclockwise as seen on screen)
    #[inline]
    pub fn rim_point(&self, angle_deg: f64) -> Vec2 {
        self.to_surface(Vec2::polar(1.0, angle_deg))
    }
}
