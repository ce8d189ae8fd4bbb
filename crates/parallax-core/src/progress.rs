//! Progress of regions and pointers through a reference frame
//!
//! Pure geometry: given the bounds of a region and the state of the
//! viewport, compute how far the region has travelled through the frame
//! described by a `ScrollOffset`. The host reports bounds; nothing here
//! measures anything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Rectangle in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A full-width band of the document
    pub fn band(top: f64, height: f64) -> Self {
        Self::new(0.0, top, 0.0, height)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Scroll state reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll position of the top of the viewport
    pub scroll: f64,
    /// Visible height
    pub height: f64,
    /// Height of the whole scrollable document
    pub document_height: f64,
}

impl Viewport {
    pub fn new(scroll: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll,
            height,
            document_height,
        }
    }

    /// Largest reachable scroll position
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

/// Pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// A point along the length of a region or of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Leading edge (top)
    Start,
    Center,
    /// Trailing edge (bottom)
    End,
    /// Fraction of the length, 0 is the start and 1 the end
    Fraction(f64),
    /// Absolute distance from the start
    Pixels(f64),
}

impl Edge {
    /// Distance of this edge from the start of something `length` long
    pub fn resolve(&self, length: f64) -> f64 {
        match *self {
            Edge::Start => 0.0,
            Edge::Center => length / 2.0,
            Edge::End => length,
            Edge::Fraction(f) => length * f,
            Edge::Pixels(px) => px,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Start => f.write_str("start"),
            Edge::Center => f.write_str("center"),
            Edge::End => f.write_str("end"),
            Edge::Fraction(v) => write!(f, "{}", v),
            Edge::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

impl FromStr for Edge {
    type Err = Error;

    /// `start`, `center`, `end`, a fraction (`0.25`), a percentage (`25%`)
    /// or a pixel distance (`40px`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidOffset(s.to_string());
        let edge = match s {
            "start" => Edge::Start,
            "center" => Edge::Center,
            "end" => Edge::End,
            _ => {
                if let Some(px) = s.strip_suffix("px") {
                    Edge::Pixels(px.trim().parse().map_err(|_| invalid())?)
                } else if let Some(pct) = s.strip_suffix('%') {
                    let pct: f64 = pct.trim().parse().map_err(|_| invalid())?;
                    Edge::Fraction(pct / 100.0)
                } else {
                    Edge::Fraction(s.parse().map_err(|_| invalid())?)
                }
            }
        };
        match edge {
            Edge::Fraction(v) | Edge::Pixels(v) if !v.is_finite() => Err(invalid()),
            _ => Ok(edge),
        }
    }
}

/// The moment an edge of the target meets an edge of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: Edge,
    pub container: Edge,
}

impl Intersection {
    pub const fn new(target: Edge, container: Edge) -> Self {
        Self { target, container }
    }

    /// Scroll position at which this intersection happens
    fn scroll_position(&self, bounds: &Bounds, viewport_height: f64) -> f64 {
        bounds.y + self.target.resolve(bounds.height) - self.container.resolve(viewport_height)
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.container)
    }
}

impl FromStr for Intersection {
    type Err = Error;

    /// `"start end"` means the target's start meets the viewport's end;
    /// a single edge applies to both
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [both] => {
                let edge: Edge = both.parse()?;
                Ok(Self::new(edge, edge))
            }
            [target, container] => Ok(Self::new(target.parse()?, container.parse()?)),
            _ => Err(Error::InvalidOffset(s.to_string())),
        }
    }
}

/// Reference frame for scroll progress: progress is 0 at `start` and 1 at
/// `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffset {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffset {
    /// From the target's top entering the viewport bottom to its bottom
    /// leaving the viewport top
    pub const ENTER_EXIT: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::Start),
    };

    /// From the target's top reaching the viewport top to its bottom
    /// reaching the viewport bottom
    pub const CONTAINED: ScrollOffset = ScrollOffset {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::End),
    };

    pub const fn new(start: Intersection, end: Intersection) -> Self {
        Self { start, end }
    }
}

impl Default for ScrollOffset {
    fn default() -> Self {
        Self::CONTAINED
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.start, self.end)
    }
}

impl FromStr for ScrollOffset {
    type Err = Error;

    /// `"start end, end start"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((start, end)) => Ok(Self::new(start.parse()?, end.parse()?)),
            None => Err(Error::InvalidOffset(s.to_string())),
        }
    }
}

impl Serialize for ScrollOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ScrollOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How far `bounds` has travelled through `offset`, in [0, 1]
///
/// When both intersections happen at the same scroll position the progress
/// is a step: 0 before it, 1 from it on.
pub fn scroll_progress(bounds: &Bounds, viewport: &Viewport, offset: &ScrollOffset) -> f64 {
    let start = offset.start.scroll_position(bounds, viewport.height);
    let end = offset.end.scroll_position(bounds, viewport.height);
    let scroll = viewport.scroll;

    if !(start.is_finite() && end.is_finite() && scroll.is_finite()) {
        return 0.0;
    }

    let span = end - start;
    if span.abs() < f64::EPSILON {
        return if scroll >= start { 1.0 } else { 0.0 };
    }

    ((scroll - start) / span).clamp(0.0, 1.0)
}

/// How far the whole document has been scrolled, in [0, 1]
pub fn page_progress(viewport: &Viewport) -> f64 {
    let max = viewport.max_scroll();
    if max <= 0.0 || !viewport.scroll.is_finite() {
        return 0.0;
    }
    (viewport.scroll / max).clamp(0.0, 1.0)
}

/// Pointer displacement along `axis`
///
/// Measured from the center of `bounds` when given (tilt effects), otherwise
/// the raw pointer coordinate (cursor followers). Bounds are in document
/// coordinates and are shifted by the scroll position.
pub fn pointer_displacement(
    pointer: &Pointer,
    bounds: Option<&Bounds>,
    viewport: &Viewport,
    axis: Axis,
) -> f64 {
    let value = match (bounds, axis) {
        (None, Axis::X) => pointer.x,
        (None, Axis::Y) => pointer.y,
        (Some(bounds), Axis::X) => pointer.x - bounds.center().0,
        (Some(bounds), Axis::Y) => pointer.y - (bounds.center().1 - viewport.scroll),
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
