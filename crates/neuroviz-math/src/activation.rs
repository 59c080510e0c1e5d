// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rectification and its non-additivity

/// Rectified linear unit, `max(0, z)`
///
/// # Example
/// ```
/// use neuroviz_math::relu;
///
/// assert_eq!(relu(2.5), 2.5);
/// assert_eq!(relu(-2.5), 0.0);
/// ```
#[inline]
pub fn relu(z: f64) -> f64 {
    if z > 0.0 {
        z
    } else {
        0.0
    }
}

/// Signed readout `relu(z) - relu(-z)`
///
/// Recovers the sign that a single ReLU discards.
///
/// # Example
/// ```
/// use neuroviz_math::signed_readout;
///
/// assert_eq!(signed_readout(2.0), 2.0);
/// assert_eq!(signed_readout(-2.0), -2.0);
/// ```
#[inline]
pub fn signed_readout(z: f64) -> f64 {
    relu(z) - relu(-z)
}

/// Interference `relu(a) + relu(b) - relu(a + b)`
///
/// Zero whenever `a` and `b` share a sign; this is where rectification breaks
/// the linearity of the underlying projections.
#[inline]
pub fn interference(a: f64, b: f64) -> f64 {
    relu(a) + relu(b) - relu(a + b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu() {
        assert_eq!(relu(0.0), 0.0);
        assert_eq!(relu(-0.0), 0.0);
        assert_eq!(relu(1e-300), 1e-300);
        assert_eq!(relu(-1e-300), 0.0);
    }

    #[test]
    fn test_signed_readout_matches_input() {
        for z in [-3.0, -0.5, 0.0, 0.25, 7.0] {
            assert_eq!(signed_readout(z), z);
        }
    }

    #[test]
    fn test_interference_same_sign_is_zero() {
        assert_eq!(interference(0.3, 0.4), 0.0);
        assert_eq!(interference(-0.3, -0.4), 0.0);
    }

    #[test]
    fn test_interference_opposite_signs() {
        assert_eq!(interference(1.0, -1.0), 1.0);
        assert!((interference(0.75, -0.25) - 0.25).abs() < 1e-12);
    }
}
