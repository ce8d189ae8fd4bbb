//! Motion primitives
//!
//! Pure building blocks of the mapper. Nothing in here observes host signals
//! or keeps time on its own; see `graph` for the part that does.
//!
//! - `easing` - curves reshaping a normalized progress value
//! - `keyframes` - validated piecewise-linear mapping
//! - `color` - RGBA outputs for color keyframes
//! - `spring` - second-order smoothing filter
//! - `velocity` - rate of change of a sampled value
//! - `tween` - keyframes played over time

pub mod color;
pub mod easing;
pub mod keyframes;
pub mod spring;
pub mod tween;
pub mod velocity;

pub use color::Rgba;
pub use easing::Easing;
pub use keyframes::{Interpolate, KeyframeError, Keyframes};
pub use spring::{Spring, SpringConfig};
pub use tween::{Repeat, RepeatMode, Tween};
pub use velocity::VelocityTracker;
