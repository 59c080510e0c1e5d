// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size 2-D vector arithmetic
//!
//! Pure functions for building, combining and normalising `{x, y}` pairs.

use core::ops::{Add, Mul, Neg, Sub};

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Denominator substituted when normalising a zero-length vector.
pub const UNIT_EPSILON: f64 = 1e-6;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * core::f64::consts::PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / core::f64::consts::PI
}

/// A 2-D vector (or point) of real numbers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from a magnitude and an angle in degrees
    ///
    /// The angle is measured counterclockwise from the +x axis; no wraparound
    /// is applied, so 370° and 10° give the same direction.
    ///
    /// # Example
    /// ```
    /// use neuroviz_math::Vec2;
    ///
    /// let v = Vec2::polar(2.0, 90.0);
    /// assert!(v.x.abs() < 1e-12);
    /// assert!((v.y - 2.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn polar(magnitude: f64, angle_deg: f64) -> Self {
        let theta = deg_to_rad(angle_deg);
        Self {
            x: magnitude * theta.cos(),
            y: magnitude * theta.sin(),
        }
    }

    /// Dot product `a.x*b.x + a.y*b.y`
    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Component-wise scale
    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Normalise to unit length
    ///
    /// A zero (or NaN) norm is replaced by [`UNIT_EPSILON`], so the zero vector
    /// maps to itself instead of NaN.
    ///
    /// # Example
    /// ```
    /// use neuroviz_math::Vec2;
    ///
    /// let u = Vec2::new(3.0, 4.0).unit();
    /// assert!((u.norm() - 1.0).abs() < 1e-12);
    ///
    /// assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
    /// ```
    #[inline]
    pub fn unit(self) -> Self {
        let n = self.norm();
        let n = if n == 0.0 || n.is_nan() { UNIT_EPSILON } else { n };
        Self {
            x: self.x / n,
            y: self.y / n,
        }
    }

    /// Angle of the vector in degrees, in `(-180, 180]`
    #[inline]
    pub fn angle_deg(self) -> f64 {
        rad_to_deg(self.y.atan2(self.x))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_polar_cardinal_directions() {
        let east = Vec2::polar(1.0, 0.0);
        assert!((east.x - 1.0).abs() < EPS && east.y.abs() < EPS);

        let west = Vec2::polar(1.0, 180.0);
        assert!((west.x + 1.0).abs() < EPS && west.y.abs() < EPS);

        let south = Vec2::polar(1.0, -90.0);
        assert!(south.x.abs() < EPS && (south.y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_polar_has_no_wraparound_but_same_direction() {
        let a = Vec2::polar(1.0, 10.0);
        let b = Vec2::polar(1.0, 370.0);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);
    }

    #[test]
    fn test_unit_has_length_one() {
        for deg in (0..360).step_by(7) {
            for mag in [0.001, 0.5, 1.0, 42.0, 1e6] {
                let u = Vec2::polar(mag, deg as f64).unit();
                assert!((u.norm() - 1.0).abs() < 1e-9, "deg={} mag={}", deg, mag);
            }
        }
    }

    #[test]
    fn test_unit_of_zero_vector_is_deterministic() {
        let u = Vec2::ZERO.unit();
        assert_eq!(u, Vec2::ZERO);
        assert!(!u.x.is_nan() && !u.y.is_nan());
    }

    #[test]
    fn test_dot_and_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a.dot(b), -5.0);
        assert_eq!(a + b, Vec2::new(4.0, -2.0));
        assert_eq!(a - b, Vec2::new(-2.0, 6.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_angle_roundtrip() {
        let v = Vec2::polar(3.0, 135.0);
        assert!((v.angle_deg() - 135.0).abs() < 1e-9);
        assert!((rad_to_deg(deg_to_rad(57.0)) - 57.0).abs() < EPS);
    }
}
