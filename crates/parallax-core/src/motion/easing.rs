//! Easing curves
//!
//! Pure functions that reshape a normalized progress `t` in [0, 1] before it
//! is interpolated. Named presets cover the common CSS curves; arbitrary
//! curves are expressed with `Easing::CubicBezier`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Easing curve applied to a normalized progress value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Identity: f(t) = t
    #[default]
    Linear,
    /// Jump to the end value once t reaches 1
    Step,
    /// CSS `ease-in`
    EaseIn,
    /// CSS `ease-out`
    EaseOut,
    /// CSS `ease-in-out`
    EaseInOut,
    /// Cubic ease-out: f(t) = 1 - (1-t)³
    Cubic,
    /// Quintic ease-out: f(t) = 1 - (1-t)⁵
    Quintic,
    /// Exponential ease-out: f(t) = 1 - 2^(-10t)
    Exponential,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier([f64; 4]),
}

impl Easing {
    /// Apply the easing function to a progress value
    ///
    /// Input is clamped to [0, 1]. Bezier curves with control points outside
    /// the unit square may return values outside [0, 1] (overshoot).
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::Cubic => cubic_ease_out(t),
            Easing::Quintic => quintic_ease_out(t),
            Easing::Exponential => exponential_ease_out(t),
            Easing::CubicBezier([x1, y1, x2, y2]) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// All named presets, in display order
    pub fn presets() -> [Easing; 8] {
        [
            Easing::Linear,
            Easing::Step,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Cubic,
            Easing::Quintic,
            Easing::Exponential,
        ]
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("linear"),
            Easing::Step => f.write_str("step"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::Cubic => f.write_str("cubic"),
            Easing::Quintic => f.write_str("quintic"),
            Easing::Exponential => f.write_str("exponential"),
            Easing::CubicBezier([x1, y1, x2, y2]) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

impl FromStr for Easing {
    type Err = Error;

    /// Parse a preset name or `cubic-bezier(x1, y1, x2, y2)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let easing = match s.to_lowercase().as_str() {
            "linear" => Easing::Linear,
            "step" | "none" => Easing::Step,
            "ease-in" | "easein" => Easing::EaseIn,
            "ease-out" | "easeout" => Easing::EaseOut,
            "ease-in-out" | "easeinout" => Easing::EaseInOut,
            "cubic" => Easing::Cubic,
            "quintic" => Easing::Quintic,
            "exponential" | "expo" => Easing::Exponential,
            other => return parse_bezier(other),
        };
        Ok(easing)
    }
}

fn parse_bezier(s: &str) -> Result<Easing, Error> {
    let inner = s
        .strip_prefix("cubic-bezier(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::InvalidEasing(s.to_string()))?;

    let points = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidEasing(s.to_string()))?;

    match points.as_slice() {
        // x coordinates must stay in [0, 1] for the curve to be a function of t
        [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
            Ok(Easing::CubicBezier([*x1, *y1, *x2, *y2]))
        }
        _ => Err(Error::InvalidEasing(s.to_string())),
    }
}

#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// One coordinate of a cubic bezier anchored at 0 and 1
#[inline]
fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Evaluate a CSS cubic-bezier at horizontal position `x`
///
/// Newton-Raphson on the curve parameter, falling back to bisection when the
/// slope is too flat to converge.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}
