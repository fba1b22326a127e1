//! Shaping functions for the volume-restoring shoulder around a dent.
//!
//! All functions here are pure. [`Distribution`] drives the actual
//! redistribution; [`indent_function`] and [`volume_function`] describe the
//! shoulder's indentation and volume ramp and are exposed through
//! [`IndentProfile`] for hosts that want to preview the curve.

use crate::math::TOLERANCE;

/// Exponential indentation curve: `1` at `x = 0`, `0` at `x = range`.
///
/// `smoothness` in `[0, 1]` maps to the sharpness `b = 3 - 2.999 * smoothness`.
/// Low smoothness gives an almost linear falloff, high smoothness a curve
/// that is very flat near the far end. A non-positive `range` collapses the
/// curve to a step at zero.
#[must_use]
pub fn indent_function(x: f64, range: f64, smoothness: f64) -> f64 {
    if range <= TOLERANCE {
        return if x <= 0.0 { 1.0 } else { 0.0 };
    }
    let b = 3.0 - 2.999 * smoothness;
    let a = 1.0 + b;
    a * ((b / a).ln() * x / range).exp() - b
}

/// Quadratic ease from `0` at `x = 0` to `1` at `x = ramp`, constant `1` after.
///
/// A non-positive `ramp` gives `1` everywhere.
#[must_use]
pub fn volume_function(x: f64, ramp: f64) -> f64 {
    if ramp <= TOLERANCE {
        return 1.0;
    }
    if x < ramp {
        let a = -1.0 / (ramp * ramp);
        a * (x - ramp) * (x - ramp) + 1.0
    } else {
        1.0
    }
}

/// The quadratic distribution used to push volume back into the shoulder.
///
/// Solved from the total displaced distance, the mesh diameter, the indent
/// range and the indent depth:
///
/// ```text
/// a = (total + depth * diameter) / (range³/3 - 2·range² + range * diameter)
/// c = -depth + a * range
/// f(x) = a (x - range)² + c   for x <= range
///        c                    otherwise
/// ```
///
/// An approximation, not an exact volume integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    a: f64,
    c: f64,
    range: f64,
}

impl Distribution {
    /// Solves the coefficients, or `None` if the system is singular.
    #[must_use]
    pub fn solve(total: f64, diameter: f64, range: f64, depth: f64) -> Option<Self> {
        let denominator = range.powi(3) / 3.0 - 2.0 * range.powi(2) + range * diameter;
        if denominator.abs() < TOLERANCE || !denominator.is_finite() {
            return None;
        }
        let a = (total + depth * diameter) / denominator;
        let c = -depth + a * range;
        Some(Self { a, c, range })
    }

    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Weight applied at distance `x` from the rim.
    #[must_use]
    pub fn weight(&self, x: f64) -> f64 {
        if x <= self.range {
            self.a * (x - self.range).powi(2) + self.c
        } else {
            self.c
        }
    }
}

/// Indentation and volume curves configured for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndentProfile {
    pub range: f64,
    pub smoothness: f64,
    pub volume_ramp: f64,
}

impl IndentProfile {
    #[must_use]
    pub fn indent(&self, x: f64) -> f64 {
        indent_function(x, self.range, self.smoothness)
    }

    #[must_use]
    pub fn volume(&self, x: f64) -> f64 {
        volume_function(x, self.volume_ramp)
    }

    /// Samples `(x, indent, volume)` at `count` evenly spaced points on `[0, range]`.
    #[must_use]
    pub fn sample(&self, count: usize) -> Vec<(f64, f64, f64)> {
        if count < 2 {
            return vec![(0.0, self.indent(0.0), self.volume(0.0))];
        }
        #[allow(clippy::cast_precision_loss)]
        let step = self.range / (count - 1) as f64;
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = step * i as f64;
                (x, self.indent(x), self.volume(x))
            })
            .collect()
    }
}
