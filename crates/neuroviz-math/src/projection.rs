// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Projection derivation pipeline
//!
//! A neuron's weight vector `w` acts as an axis that feature directions project
//! onto. From six parameters this module derives:
//!
//! ```text
//! params ─► w, f1, f2, x_sum ─► a1, a2, a_sum ─► y1, y2, y_sum ─► signed, interference
//! ```
//!
//! The whole pipeline is recomputed on every parameter change; nothing is
//! cached between derivations.

use tracing::debug;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::activation::{relu, signed_readout};
use crate::vector::Vec2;

/// User-adjustable inputs of the projection visualizer
///
/// Angles are degrees and accept any real number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct ProjectionParams {
    pub w_angle: f64,
    /// Half-width of the cone drawn around `w`; has no effect on the maths
    pub cone_half_deg: f64,
    pub f1_angle: f64,
    pub f2_angle: f64,
    pub f1_on: bool,
    pub f2_on: bool,
    pub show_signed: bool,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            w_angle: 25.0,
            cone_half_deg: 30.0,
            f1_angle: 5.0,
            f2_angle: 60.0,
            f1_on: true,
            f2_on: true,
            show_signed: false,
        }
    }
}

/// A single parameter change issued by a control (slider or toggle)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "param", content = "value", rename_all = "snake_case"))]
pub enum ParamUpdate {
    WAngle(f64),
    ConeHalfDeg(f64),
    F1Angle(f64),
    F2Angle(f64),
    F1On(bool),
    F2On(bool),
    ShowSigned(bool),
}

impl ProjectionParams {
    /// Apply one update in place
    ///
    /// Returns `true` if the stored value changed.
    pub fn apply(&mut self, update: ParamUpdate) -> bool {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            let changed = *slot != value;
            *slot = value;
            changed
        }

        match update {
            ParamUpdate::WAngle(v) => set(&mut self.w_angle, v),
            ParamUpdate::ConeHalfDeg(v) => set(&mut self.cone_half_deg, v),
            ParamUpdate::F1Angle(v) => set(&mut self.f1_angle, v),
            ParamUpdate::F2Angle(v) => set(&mut self.f2_angle, v),
            ParamUpdate::F1On(v) => set(&mut self.f1_on, v),
            ParamUpdate::F2On(v) => set(&mut self.f2_on, v),
            ParamUpdate::ShowSigned(v) => set(&mut self.show_signed, v),
        }
    }

    /// Derive every vector and scalar for this snapshot
    #[inline]
    pub fn derive(&self) -> ProjectionState {
        ProjectionState::derive(self)
    }
}

/// Everything derived from one parameter snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct ProjectionState {
    /// Unit weight vector
    pub w: Vec2,
    /// Feature vectors; zero when toggled off
    pub f1: Vec2,
    pub f2: Vec2,
    pub x_sum: Vec2,

    /// Linear projections onto `w`
    pub a1: f64,
    pub a2: f64,
    pub a_sum: f64,

    /// Rectified projections
    pub y1: f64,
    pub y2: f64,
    pub y_sum: f64,

    /// `relu(a_sum) - relu(-a_sum)` when requested, otherwise `y_sum`
    pub signed: f64,
    pub show_signed: bool,

    /// `y1 + y2 - y_sum`
    pub interference: f64,
}

impl ProjectionState {
    pub fn derive(params: &ProjectionParams) -> Self {
        let w = Vec2::polar(1.0, params.w_angle).unit();
        let f1 = feature(params.f1_on, params.f1_angle);
        let f2 = feature(params.f2_on, params.f2_angle);
        let x_sum = f1 + f2;

        let a1 = w.dot(f1);
        let a2 = w.dot(f2);
        let a_sum = w.dot(x_sum);

        let y1 = relu(a1);
        let y2 = relu(a2);
        let y_sum = relu(a_sum);

        let signed = if params.show_signed {
            signed_readout(a_sum)
        } else {
            y_sum
        };
        let interference = y1 + y2 - y_sum;

        debug!(
            w_angle = params.w_angle,
            a1, a2, a_sum, interference, "derived projection state"
        );

        Self {
            w,
            f1,
            f2,
            x_sum,
            a1,
            a2,
            a_sum,
            y1,
            y2,
            y_sum,
            signed,
            show_signed: params.show_signed,
            interference,
        }
    }
}

#[inline]
fn feature(on: bool, angle_deg: f64) -> Vec2 {
    if on {
        Vec2::polar(1.0, angle_deg)
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn params(w: f64, f1: f64, f2: f64) -> ProjectionParams {
        ProjectionParams {
            w_angle: w,
            f1_angle: f1,
            f2_angle: f2,
            ..ProjectionParams::default()
        }
    }

    #[test]
    fn test_opposite_features_cancel() {
        let state = params(0.0, 0.0, 180.0).derive();

        assert!((state.a1 - 1.0).abs() < EPS);
        assert_eq!(state.y1, 1.0);
        assert!((state.a2 + 1.0).abs() < EPS);
        assert_eq!(state.y2, 0.0);
        assert!(state.x_sum.norm() < EPS);
        assert!(state.a_sum.abs() < EPS);
        assert_eq!(state.y_sum, 0.0);
        assert!((state.interference - 1.0).abs() < EPS);
    }

    #[test]
    fn test_dot_is_linear_before_rectification() {
        for w in (0..360).step_by(15) {
            for f1 in (0..360).step_by(20) {
                for f2 in (0..360).step_by(35) {
                    let s = params(w as f64, f1 as f64, f2 as f64).derive();
                    assert!(
                        (s.a1 + s.a2 - s.a_sum).abs() < EPS,
                        "w={} f1={} f2={}",
                        w,
                        f1,
                        f2
                    );
                }
            }
        }
    }

    #[test]
    fn test_toggle_off_zeroes_feature() {
        for angle in [-720.0, 0.0, 33.3, 90.0, 1e4] {
            let mut p = params(25.0, angle, 60.0);
            p.f1_on = false;
            let s = p.derive();
            assert_eq!(s.f1, Vec2::ZERO);
            assert_eq!(s.a1, 0.0);
            assert_eq!(s.y1, 0.0);
            assert_eq!(s.x_sum, s.f2);
        }
    }

    #[test]
    fn test_both_off_is_all_zero() {
        let mut p = ProjectionParams::default();
        p.f1_on = false;
        p.f2_on = false;
        let s = p.derive();
        assert_eq!(s.a_sum, 0.0);
        assert_eq!(s.y_sum, 0.0);
        assert_eq!(s.interference, 0.0);
        assert_eq!(s.x_sum.unit(), Vec2::ZERO);
    }

    #[test]
    fn test_signed_readout_only_when_requested() {
        // w along +x, both features along -x: a_sum = -2
        let mut p = params(0.0, 180.0, 180.0);
        let hidden = p.derive();
        assert_eq!(hidden.y_sum, 0.0);
        assert_eq!(hidden.signed, 0.0);

        p.show_signed = true;
        let shown = p.derive();
        assert!((shown.signed + 2.0).abs() < EPS);
        assert_eq!(shown.y_sum, 0.0);

        // and along +x: a_sum = 2, identical to y_sum
        let mut p = params(0.0, 0.0, 0.0);
        p.show_signed = true;
        let s = p.derive();
        assert!((s.signed - 2.0).abs() < EPS);
        assert_eq!(s.signed, s.y_sum);
    }

    #[test]
    fn test_derive_is_pure() {
        let p = ProjectionParams::default();
        let a = p.derive();
        let b = p.derive();
        assert_eq!(a, b);
        assert_eq!(a.interference.to_bits(), b.interference.to_bits());
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut p = ProjectionParams::default();
        assert!(!p.apply(ParamUpdate::WAngle(25.0)));
        assert!(p.apply(ParamUpdate::WAngle(40.0)));
        assert_eq!(p.w_angle, 40.0);
        assert!(p.apply(ParamUpdate::F2On(false)));
        assert!(!p.f2_on);
        assert!(p.apply(ParamUpdate::ShowSigned(true)));
        assert!(p.apply(ParamUpdate::ConeHalfDeg(45.0)));
        assert_eq!(p.cone_half_deg, 45.0);
    }
}
