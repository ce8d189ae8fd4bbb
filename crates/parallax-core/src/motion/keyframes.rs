//! Piecewise-linear keyframe mapping
//!
//! A `Keyframes<T>` maps a scalar input (usually a progress value) to an
//! output by locating the bracketing pair of keyframes and interpolating
//! between their outputs. Inputs outside the defined domain clamp to the
//! nearest edge output; nothing is ever extrapolated.
//!
//! Definitions are validated once, at construction. Sampling is total.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::easing::Easing;
use crate::error::Error;

/// Values that can be linearly interpolated between two keyframes
pub trait Interpolate: Clone {
    /// Interpolate from `self` towards `to` by `t`
    ///
    /// `t` is 0 at `self` and 1 at `to`; eased segments may pass values
    /// slightly outside that range.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t as f32
    }
}

impl Interpolate for (f64, f64) {
    #[inline]
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        (self.0.interpolate(&to.0, t), self.1.interpolate(&to.1, t))
    }
}

/// Rejected keyframe definitions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyframeError {
    #[error("at least two keyframes are required, got {0}")]
    TooFewPoints(usize),

    #[error("keyframe inputs must be non-decreasing (input {index} is {value} after {previous})")]
    NotMonotonic {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("keyframe input {index} is not a finite number")]
    NonFinite { index: usize },

    #[error("expected {expected} inputs to match outputs, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("expected {expected} segment easings, got {actual}")]
    EasingCount { expected: usize, actual: usize },

    #[error("malformed keyframe \"{0}\" (expected input:output)")]
    Malformed(String),
}

/// Validated keyframe mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKeyframes<T>", into = "RawKeyframes<T>")]
#[serde(bound(
    serialize = "T: Serialize + Clone",
    deserialize = "T: Deserialize<'de> + Interpolate"
))]
pub struct Keyframes<T = f64> {
    inputs: Vec<f64>,
    outputs: Vec<T>,
    /// One easing per segment (inputs.len() - 1 entries), empty for linear
    easing: Vec<Easing>,
}

impl<T: Interpolate> Keyframes<T> {
    /// Build a mapping from `(input, output)` pairs
    pub fn new<I>(points: I) -> Result<Self, KeyframeError>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        let (inputs, outputs): (Vec<f64>, Vec<T>) = points.into_iter().unzip();
        Self::from_parts(inputs, outputs)
    }

    /// Build a mapping from parallel input and output lists
    pub fn from_parts(inputs: Vec<f64>, outputs: Vec<T>) -> Result<Self, KeyframeError> {
        if inputs.len() != outputs.len() {
            return Err(KeyframeError::LengthMismatch {
                expected: outputs.len(),
                actual: inputs.len(),
            });
        }
        if inputs.len() < 2 {
            return Err(KeyframeError::TooFewPoints(inputs.len()));
        }
        for (index, value) in inputs.iter().enumerate() {
            if !value.is_finite() {
                return Err(KeyframeError::NonFinite { index });
            }
        }
        for (index, pair) in inputs.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(KeyframeError::NotMonotonic {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        Ok(Self {
            inputs,
            outputs,
            easing: Vec::new(),
        })
    }

    /// Outputs spread evenly across [0, 1]
    pub fn evenly_spaced(outputs: Vec<T>) -> Result<Self, KeyframeError> {
        let count = outputs.len();
        if count < 2 {
            return Err(KeyframeError::TooFewPoints(count));
        }
        let step = 1.0 / (count - 1) as f64;
        let inputs = (0..count).map(|i| i as f64 * step).collect();
        Self::from_parts(inputs, outputs)
    }

    /// A mapping that always yields `value`
    ///
    /// Stored as two coincident keyframes so it stays a valid definition
    /// when serialized.
    pub fn constant(value: T) -> Self {
        Self {
            inputs: vec![0.0, 0.0],
            outputs: vec![value.clone(), value],
            easing: Vec::new(),
        }
    }

    /// Apply the same easing to every segment
    pub fn with_easing(mut self, easing: Easing) -> Self {
        let segments = self.inputs.len().saturating_sub(1);
        self.easing = vec![easing; segments];
        self
    }

    /// Apply one easing per segment
    pub fn with_segment_easing(mut self, easing: Vec<Easing>) -> Result<Self, KeyframeError> {
        let segments = self.inputs.len().saturating_sub(1);
        if easing.len() != segments {
            return Err(KeyframeError::EasingCount {
                expected: segments,
                actual: easing.len(),
            });
        }
        self.easing = easing;
        Ok(self)
    }

    /// Map an input through the keyframes
    ///
    /// Inputs below the first keyframe yield the first output, inputs above
    /// the last yield the last output. NaN is treated as the domain start.
    pub fn sample(&self, input: f64) -> T {
        let last = self.inputs.len() - 1;
        if input.is_nan() || input <= self.inputs[0] {
            return self.outputs[0].clone();
        }
        if input >= self.inputs[last] {
            return self.outputs[last].clone();
        }

        // First segment whose upper bound reaches the input
        let segment = self.inputs[1..]
            .partition_point(|&x| x < input)
            .min(last - 1);

        let (x0, x1) = (self.inputs[segment], self.inputs[segment + 1]);
        let (y0, y1) = (&self.outputs[segment], &self.outputs[segment + 1]);

        let span = x1 - x0;
        if span <= 0.0 {
            return y0.clone();
        }

        let t = (input - x0) / span;
        let t = match self.easing.get(segment) {
            Some(easing) => easing.apply(t),
            None => t,
        };
        y0.interpolate(y1, t)
    }

    /// Input range covered by the keyframes
    pub fn domain(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false; a mapping holds at least two keyframes
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl FromStr for Keyframes<f64> {
    type Err = Error;

    /// Parse `"0:0, 0.5:1, 1:0"` into keyframes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let points = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|point| {
                let (input, output) = point
                    .split_once(':')
                    .ok_or_else(|| KeyframeError::Malformed(point.to_string()))?;
                let input = input.trim().parse::<f64>();
                let output = output.trim().parse::<f64>();
                match (input, output) {
                    (Ok(i), Ok(o)) => Ok((i, o)),
                    _ => Err(KeyframeError::Malformed(point.to_string())),
                }
            })
            .collect::<Result<Vec<_>, KeyframeError>>()?;

        Ok(Keyframes::new(points)?)
    }
}

/// Serialized shape: `{ inputs = [...], outputs = [...], easing = [...] }`
#[derive(Serialize, Deserialize)]
struct RawKeyframes<T> {
    inputs: Vec<f64>,
    outputs: Vec<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    easing: Vec<Easing>,
}

impl<T: Interpolate> TryFrom<RawKeyframes<T>> for Keyframes<T> {
    type Error = KeyframeError;

    fn try_from(raw: RawKeyframes<T>) -> Result<Self, Self::Error> {
        let keyframes = Keyframes::from_parts(raw.inputs, raw.outputs)?;
        match raw.easing.len() {
            0 => Ok(keyframes),
            1 => Ok(keyframes.with_easing(raw.easing[0])),
            _ => keyframes.with_segment_easing(raw.easing),
        }
    }
}

impl<T> From<Keyframes<T>> for RawKeyframes<T> {
    fn from(keyframes: Keyframes<T>) -> Self {
        Self {
            inputs: keyframes.inputs,
            outputs: keyframes.outputs,
            easing: keyframes.easing,
        }
    }
}
