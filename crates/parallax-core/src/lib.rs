//! Scroll-linked animation mapping
//!
//! Turns normalized progress signals (how far a region has scrolled through
//! the viewport, where the pointer sits relative to an element, how much
//! time has passed) into presentation values through keyframe mappings,
//! optionally smoothed by springs.
//!
//! - `motion` - pure primitives: easing, keyframes, springs, tweens
//! - `progress` - geometry of regions, viewports and scroll offsets
//! - `graph` - `MotionGraph`, the dependency-ordered value store a host ticks
//! - `config` - user configuration

pub mod config;
pub mod error;
pub mod graph;
pub mod motion;
pub mod progress;

pub use config::{AppConfig, MotionConfig, ScrollConfig, ThemeConfig};
pub use error::{Error, Result};
pub use graph::{Layout, MotionGraph, RegionId, Scope, ScopeId, ValueId};
pub use motion::{
    Easing, KeyframeError, Keyframes, Repeat, RepeatMode, Rgba, Spring, SpringConfig, Tween,
};
pub use progress::{Axis, Bounds, Edge, Intersection, Pointer, ScrollOffset, Viewport};
