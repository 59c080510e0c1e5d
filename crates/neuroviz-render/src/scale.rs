// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Linear scales
//!
//! Maps a data domain onto a pixel range. Domain "nicing", tick generation and
//! tick label precision follow the conventions of common charting libraries:
//! steps are 1, 2 or 5 times a power of ten, and a domain is widened outward to
//! whole multiples of the step.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Default number of ticks requested
pub const DEFAULT_TICKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Signed tick increment: positive is a step, negative is the inverse of a step
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Absolute tick step between `start` and `stop`
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc >= 0.0 {
        inc
    } else {
        -1.0 / inc
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn is_degenerate(&self) -> bool {
        let (d0, d1) = self.domain;
        !(d0.is_finite() && d1.is_finite()) || d0 == d1
    }

    /// Widen the domain to whole multiples of the tick step
    ///
    /// A zero-width or non-finite domain is left unchanged.
    pub fn nice(mut self, count: usize) -> Self {
        if self.is_degenerate() {
            return self;
        }

        let reversed = self.domain.1 < self.domain.0;
        let (mut start, mut stop) = if reversed {
            (self.domain.1, self.domain.0)
        } else {
            self.domain
        };

        let mut prestep = f64::NAN;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Map a data value to the range
    ///
    /// A zero-width domain maps every value to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 || !(d0.is_finite() && d1.is_finite()) {
            return Vec::new();
        }
        if d0 == d1 {
            return vec![d0];
        }

        let reversed = d1 < d0;
        let (start, stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let inc = tick_increment(start, stop, count);

        let mut ticks = Vec::new();
        if inc > 0.0 {
            let mut i1 = (start / inc).round();
            let mut i2 = (stop / inc).round();
            if i1 * inc < start {
                i1 += 1.0;
            }
            if i2 * inc > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i * inc);
                i += 1.0;
            }
        } else if inc < 0.0 {
            let inv = -inc;
            let mut i1 = (start * inv).round();
            let mut i2 = (stop * inv).round();
            if i1 / inv < start {
                i1 += 1.0;
            }
            if i2 / inv > stop {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                ticks.push(i / inv);
                i += 1.0;
            }
        }

        if reversed {
            ticks.reverse();
        }
        ticks
    }

    /// Fixed-point tick label with just enough decimals for the tick step
    ///
    /// Negative values use the typographic minus sign.
    pub fn tick_label(&self, value: f64, count: usize) -> String {
        let precision = if self.is_degenerate() {
            0
        } else {
            let step = tick_step(self.domain.0, self.domain.1, count);
            (-step.log10().floor()).max(0.0) as usize
        };
        let text = format!("{:.*}", precision, value);
        match text.strip_prefix('-') {
            Some(rest) if rest.chars().any(|c| c != '0' && c != '.') => format!("\u{2212}{}", rest),
            Some(rest) => rest.to_string(),
            None => text,
        }
    }
}
