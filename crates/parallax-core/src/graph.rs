//! Dependency-ordered motion values
//!
//! A `MotionGraph` owns every derived value of one presentation: trackers
//! that observe host signals (scroll, pointer, time) and the values mapped,
//! smoothed or differentiated from them. The host reports its signals
//! through the setters and calls `tick` once per rendered frame; every live
//! value is then recomputed in dependency order.
//!
//! Values are created inside a `Scope`. Dropping the scope releases every
//! value it created, which also stops any observation of host signals those
//! values were doing.
//!
//! ```ignore
//! let mut graph = MotionGraph::new();
//! graph.set_viewport(Viewport::new(0.0, 800.0, 4000.0));
//! let region = graph.layout_mut().insert(Bounds::band(800.0, 800.0));
//!
//! let scope = graph.scope();
//! let progress = graph.track(&scope, region, ScrollOffset::ENTER_EXIT);
//! let opacity = graph.map(&scope, progress, Keyframes::new([(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)])?);
//!
//! graph.set_scroll(400.0);
//! graph.tick(1.0 / 60.0);
//! let opacity = graph.get(opacity).unwrap_or(0.0);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::motion::{Keyframes, Spring, SpringConfig, Tween, VelocityTracker};
use crate::progress::{
    page_progress, pointer_displacement, scroll_progress, Axis, Bounds, Pointer, ScrollOffset,
    Viewport,
};

/// Handle to a value in a `MotionGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(u64);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Handle to a region registered in a `Layout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

/// Bounds of the regions the host has rendered
#[derive(Debug, Default)]
pub struct Layout {
    regions: HashMap<RegionId, Bounds>,
    next_id: u64,
}

impl Layout {
    /// Register a rendered region
    pub fn insert(&mut self, bounds: Bounds) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.insert(id, bounds);
        id
    }

    /// Report new bounds for a region; returns false if it was removed
    pub fn update(&mut self, id: RegionId, bounds: Bounds) -> bool {
        match self.regions.get_mut(&id) {
            Some(existing) => {
                *existing = bounds;
                true
            }
            None => false,
        }
    }

    /// Forget a region that is no longer rendered
    pub fn remove(&mut self, id: RegionId) -> Option<Bounds> {
        self.regions.remove(&id)
    }

    pub fn get(&self, id: RegionId) -> Option<&Bounds> {
        self.regions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Ownership token for values created in a `MotionGraph`
///
/// Dropping the scope releases every value created with it. The graph
/// purges released values at the start of the next `tick`.
pub struct Scope {
    id: ScopeId,
    released: Rc<RefCell<Vec<ScopeId>>>,
}

impl Scope {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Release the scope now; same as dropping it
    pub fn release(self) {}
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.released.borrow_mut().push(self.id);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("id", &self.id).finish()
    }
}

type TransformFn = Box<dyn Fn(f64) -> f64>;

enum NodeKind {
    /// Set directly by the host
    Source,
    Scroll {
        region: RegionId,
        offset: ScrollOffset,
    },
    Page,
    Pointer {
        axis: Axis,
        region: Option<RegionId>,
    },
    Map {
        input: ValueId,
        keyframes: Keyframes<f64>,
    },
    Transform {
        input: ValueId,
        f: TransformFn,
    },
    Smooth {
        input: ValueId,
        spring: Spring,
    },
    Velocity {
        input: ValueId,
        tracker: VelocityTracker,
    },
    Tween {
        tween: Tween,
        elapsed: f64,
    },
    /// Tween that plays while its input lies inside `window`
    InView {
        input: ValueId,
        window: RangeInclusive<f64>,
        tween: Tween,
        elapsed: f64,
    },
}

impl NodeKind {
    fn input(&self) -> Option<ValueId> {
        match self {
            NodeKind::Map { input, .. }
            | NodeKind::Transform { input, .. }
            | NodeKind::Smooth { input, .. }
            | NodeKind::Velocity { input, .. }
            | NodeKind::InView { input, .. } => Some(*input),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            NodeKind::Source => "source",
            NodeKind::Scroll { .. } => "scroll",
            NodeKind::Page => "page",
            NodeKind::Pointer { .. } => "pointer",
            NodeKind::Map { .. } => "map",
            NodeKind::Transform { .. } => "transform",
            NodeKind::Smooth { .. } => "smooth",
            NodeKind::Velocity { .. } => "velocity",
            NodeKind::Tween { .. } => "tween",
            NodeKind::InView { .. } => "in_view",
        }
    }
}

struct Node {
    id: ValueId,
    scope: ScopeId,
    kind: NodeKind,
    value: f64,
}

/// Host signals sampled during a tick
struct Signals<'a> {
    viewport: &'a Viewport,
    pointer: &'a Pointer,
    layout: &'a Layout,
    reduced_motion: bool,
}

impl Node {
    /// Recompute the value from the current input and host signals
    fn update(&mut self, input: f64, signals: &Signals<'_>, dt: f64) {
        let value = match &mut self.kind {
            NodeKind::Source => self.value,
            NodeKind::Scroll { region, offset } => signals
                .layout
                .get(*region)
                .map(|bounds| scroll_progress(bounds, signals.viewport, offset))
                .unwrap_or(0.0),
            NodeKind::Page => page_progress(signals.viewport),
            NodeKind::Pointer { axis, region } => match region {
                Some(region) => signals
                    .layout
                    .get(*region)
                    .map(|bounds| {
                        pointer_displacement(signals.pointer, Some(bounds), signals.viewport, *axis)
                    })
                    .unwrap_or(0.0),
                None => pointer_displacement(signals.pointer, None, signals.viewport, *axis),
            },
            NodeKind::Map { keyframes, .. } => keyframes.sample(input),
            NodeKind::Transform { f, .. } => f(input),
            NodeKind::Smooth { spring, .. } => {
                if signals.reduced_motion {
                    spring.snap_to(input);
                } else {
                    spring.set_target(input);
                    spring.step(dt);
                }
                spring.value()
            }
            NodeKind::Velocity { tracker, .. } => tracker.update(input, dt),
            NodeKind::Tween { tween, elapsed } => {
                if signals.reduced_motion {
                    *elapsed = f64::INFINITY;
                } else if dt.is_finite() && dt > 0.0 {
                    *elapsed += dt;
                }
                tween.value_at(*elapsed)
            }
            NodeKind::InView {
                window,
                tween,
                elapsed,
                ..
            } => {
                if !window.contains(&input) {
                    *elapsed = 0.0;
                } else if signals.reduced_motion {
                    *elapsed = f64::INFINITY;
                } else if dt.is_finite() && dt > 0.0 {
                    *elapsed += dt;
                }
                tween.value_at(*elapsed)
            }
        };
        self.value = if value.is_finite() { value } else { 0.0 };
    }
}

/// Owner of the motion values of one presentation instance
pub struct MotionGraph {
    /// Sorted by id; ids only grow, so this is also dependency order
    nodes: Vec<Node>,
    next_value: u64,
    next_scope: u64,
    released: Rc<RefCell<Vec<ScopeId>>>,
    viewport: Viewport,
    pointer: Pointer,
    layout: Layout,
    reduced_motion: bool,
}

impl Default for MotionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_value: 0,
            next_scope: 0,
            released: Rc::new(RefCell::new(Vec::new())),
            viewport: Viewport::default(),
            pointer: Pointer::default(),
            layout: Layout::default(),
            reduced_motion: false,
        }
    }

    /// Open a scope for a new presentation instance
    pub fn scope(&mut self) -> Scope {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        Scope {
            id,
            released: Rc::clone(&self.released),
        }
    }

    // Host signals

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll(&mut self, scroll: f64) {
        self.viewport.scroll = scroll;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport.height = height;
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.viewport.document_height = height;
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Pointer { x, y };
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Snap springs and finish tweens instead of animating them
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    // Value constructors

    /// A value the host sets directly
    pub fn source(&mut self, scope: &Scope, initial: f64) -> ValueId {
        self.insert(scope, NodeKind::Source, initial)
    }

    /// Progress of `region` through the viewport along `offset`
    ///
    /// Reads 0 whenever the region is not in the layout.
    pub fn track(&mut self, scope: &Scope, region: RegionId, offset: ScrollOffset) -> ValueId {
        self.insert(scope, NodeKind::Scroll { region, offset }, 0.0)
    }

    /// Progress of the whole document
    pub fn track_page(&mut self, scope: &Scope) -> ValueId {
        self.insert(scope, NodeKind::Page, 0.0)
    }

    /// Pointer position along `axis`, relative to the center of `region`
    /// when given
    pub fn track_pointer(&mut self, scope: &Scope, axis: Axis, region: Option<RegionId>) -> ValueId {
        self.insert(scope, NodeKind::Pointer { axis, region }, 0.0)
    }

    /// `input` mapped through `keyframes`
    pub fn map(&mut self, scope: &Scope, input: ValueId, keyframes: Keyframes<f64>) -> ValueId {
        self.insert(scope, NodeKind::Map { input, keyframes }, 0.0)
    }

    /// `input` passed through an arbitrary function
    pub fn transform<F>(&mut self, scope: &Scope, input: ValueId, f: F) -> ValueId
    where
        F: Fn(f64) -> f64 + 'static,
    {
        self.insert(
            scope,
            NodeKind::Transform {
                input,
                f: Box::new(f),
            },
            0.0,
        )
    }

    /// `input` smoothed by a spring; starts at rest on the input's value
    pub fn smooth(&mut self, scope: &Scope, input: ValueId, config: SpringConfig) -> ValueId {
        let start = self.read(input);
        let spring = Spring::new(config, start);
        self.insert(scope, NodeKind::Smooth { input, spring }, start)
    }

    /// Rate of change of `input` in units per second
    pub fn velocity(&mut self, scope: &Scope, input: ValueId) -> ValueId {
        let mut tracker = VelocityTracker::new();
        tracker.update(self.read(input), 0.0);
        self.insert(scope, NodeKind::Velocity { input, tracker }, 0.0)
    }

    /// A tween that starts playing now
    pub fn tween(&mut self, scope: &Scope, tween: Tween) -> ValueId {
        self.insert(scope, NodeKind::Tween { tween, elapsed: 0.0 }, 0.0)
    }

    /// A tween that plays while `progress` lies within `window`
    ///
    /// Outside the window the tween rewinds to its first keyframe, so it
    /// replays every time `progress` comes back in.
    pub fn in_view(
        &mut self,
        scope: &Scope,
        progress: ValueId,
        window: RangeInclusive<f64>,
        tween: Tween,
    ) -> ValueId {
        let initial = tween.value_at(0.0);
        let kind = NodeKind::InView {
            input: progress,
            window,
            tween,
            elapsed: 0.0,
        };
        self.insert(scope, kind, initial)
    }

    fn insert(&mut self, scope: &Scope, kind: NodeKind, initial: f64) -> ValueId {
        debug_assert!(
            Rc::ptr_eq(&scope.released, &self.released),
            "scope {:?} belongs to another MotionGraph",
            scope.id
        );
        let id = ValueId(self.next_value);
        self.next_value += 1;

        if let Some(input) = kind.input() {
            if self.index_of(input).is_none() {
                tracing::debug!(value = %id, input = %input, "Input is not live, value reads 0");
            }
        }

        let mut node = Node {
            id,
            scope: scope.id,
            kind,
            value: initial,
        };
        let input = node.kind.input().map(|i| self.read(i)).unwrap_or(0.0);
        let signals = Signals {
            viewport: &self.viewport,
            pointer: &self.pointer,
            layout: &self.layout,
            reduced_motion: self.reduced_motion,
        };
        node.update(input, &signals, 0.0);

        tracing::trace!(value = %id, kind = node.kind.name(), "Created motion value");
        self.nodes.push(node);
        id
    }

    // Reading and writing

    /// Current value, `None` once released
    pub fn get(&self, id: ValueId) -> Option<f64> {
        self.index_of(id).map(|i| self.nodes[i].value)
    }

    /// Current value, 0 once released
    fn read(&self, id: ValueId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    /// Set a source value; returns false if `id` is not a live source
    ///
    /// Dependents pick up the new value on the next `tick`.
    pub fn set(&mut self, id: ValueId, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.index_of(id) {
            Some(i) if matches!(self.nodes[i].kind, NodeKind::Source) => {
                self.nodes[i].value = value;
                true
            }
            _ => false,
        }
    }

    /// Jump a spring-smoothed value to its input without animating
    pub fn settle(&mut self, id: ValueId) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let input = self.nodes[i].kind.input().map(|i| self.read(i)).unwrap_or(0.0);
        let node = &mut self.nodes[i];
        match &mut node.kind {
            NodeKind::Smooth { spring, .. } => {
                spring.snap_to(input);
                node.value = spring.value();
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, id: ValueId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn index_of(&self, id: ValueId) -> Option<usize> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    // Update pass

    /// Remove values whose scope has been released
    ///
    /// Returns how many values were removed.
    pub fn collect(&mut self) -> usize {
        let released: HashSet<ScopeId> = self.released.borrow_mut().drain(..).collect();
        if released.is_empty() {
            return 0;
        }

        let before = self.nodes.len();
        self.nodes.retain(|node| !released.contains(&node.scope));
        let removed = before - self.nodes.len();

        tracing::debug!(
            scopes = released.len(),
            removed,
            live = self.nodes.len(),
            "Released motion scopes"
        );
        removed
    }

    /// Recompute every live value, `dt` seconds after the previous tick
    ///
    /// Values are visited in creation order, so each sees the current-tick
    /// state of everything it reads.
    pub fn tick(&mut self, dt: f64) {
        self.collect();

        let signals = Signals {
            viewport: &self.viewport,
            pointer: &self.pointer,
            layout: &self.layout,
            reduced_motion: self.reduced_motion,
        };

        for i in 0..self.nodes.len() {
            let input = match self.nodes[i].kind.input() {
                // Inputs always precede their dependents
                Some(input) => self.nodes[..i]
                    .binary_search_by_key(&input, |node| node.id)
                    .map(|j| self.nodes[j].value)
                    .unwrap_or(0.0),
                None => 0.0,
            };
            self.nodes[i].update(input, &signals, dt);
        }
    }
}

impl fmt::Debug for MotionGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionGraph")
            .field("values", &self.nodes.len())
            .field("regions", &self.layout.len())
            .field("viewport", &self.viewport)
            .field("pointer", &self.pointer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Keyframes;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_source_feeds_map() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let out = graph.map(&scope, p, Keyframes::new([(0.0, 0.0), (1.0, 10.0)]).unwrap());

        assert!(graph.set(p, 0.3));
        graph.tick(0.016);
        assert!(approx(graph.get(out).unwrap(), 3.0));
    }

    #[test]
    fn test_set_rejects_derived_values() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let out = graph.transform(&scope, p, |v| v * 2.0);
        assert!(!graph.set(out, 1.0));
        assert!(!graph.set(p, f64::NAN));
    }

    #[test]
    fn test_initial_value_computed_on_creation() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.5);
        let out = graph.map(&scope, p, Keyframes::new([(0.0, 0.0), (1.0, 8.0)]).unwrap());
        assert!(approx(graph.get(out).unwrap(), 4.0));
    }

    #[test]
    fn test_scope_drop_releases_values() {
        let mut graph = MotionGraph::new();
        let keep = graph.scope();
        let p = graph.source(&keep, 1.0);

        let scope = graph.scope();
        let doubled = graph.transform(&scope, p, |v| v * 2.0);
        assert_eq!(graph.len(), 2);

        drop(scope);
        graph.tick(0.016);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(doubled), None);
        assert!(graph.is_live(p));
    }

    #[test]
    fn test_explicit_release_and_collect() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        graph.track_page(&scope);
        graph.track_page(&scope);
        scope.release();
        assert_eq!(graph.collect(), 2);
        assert!(graph.is_empty());
        assert_eq!(graph.collect(), 0);
    }

    #[test]
    fn test_dependent_of_released_input_reads_zero() {
        let mut graph = MotionGraph::new();
        let upstream = graph.scope();
        let p = graph.source(&upstream, 0.5);

        let downstream = graph.scope();
        let out = graph.map(&downstream, p, Keyframes::new([(0.0, 1.0), (1.0, 3.0)]).unwrap());
        assert!(approx(graph.get(out).unwrap(), 2.0));

        drop(upstream);
        graph.tick(0.016);
        assert!(approx(graph.get(out).unwrap(), 1.0));
    }

    #[test]
    fn test_smooth_reads_current_tick_input() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let scaled = graph.transform(&scope, p, |v| v * 100.0);
        let smoothed = graph.smooth(&scope, scaled, SpringConfig::new(200.0, 25.0));

        graph.set(p, 1.0);
        graph.tick(1.0 / 60.0);
        let value = graph.get(smoothed).unwrap();
        // Moving towards 100 already on the first tick
        assert!(value > 0.0 && value < 100.0);

        for _ in 0..600 {
            graph.tick(1.0 / 60.0);
        }
        assert!(approx(graph.get(smoothed).unwrap(), 100.0));
    }

    #[test]
    fn test_reduced_motion_snaps() {
        let mut graph = MotionGraph::new();
        graph.set_reduced_motion(true);
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let smoothed = graph.smooth(&scope, p, SpringConfig::default());
        let tween = graph.tween(
            &scope,
            Tween::between(0.0, 5.0, std::time::Duration::from_secs(10)),
        );
        graph.set(p, 7.0);
        graph.tick(0.016);
        assert_eq!(graph.get(smoothed), Some(7.0));
        assert_eq!(graph.get(tween), Some(5.0));
    }

    #[test]
    fn test_settle() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let smoothed = graph.smooth(&scope, p, SpringConfig::default());
        graph.set(p, 3.0);
        assert!(graph.settle(smoothed));
        assert_eq!(graph.get(smoothed), Some(3.0));
        assert!(!graph.settle(p));
    }

    #[test]
    fn test_velocity_of_source() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let v = graph.velocity(&scope, p);
        graph.set(p, 0.5);
        graph.tick(0.5);
        assert!(approx(graph.get(v).unwrap(), 1.0));
        graph.tick(0.5);
        assert!(approx(graph.get(v).unwrap(), 0.0));
    }

    #[test]
    fn test_tween_advances_with_ticks() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let t = graph.tween(&scope, Tween::between(0.0, 1.0, std::time::Duration::from_secs(1)));
        assert_eq!(graph.get(t), Some(0.0));
        graph.tick(0.25);
        graph.tick(0.25);
        assert!(approx(graph.get(t).unwrap(), 0.5));
    }

    #[test]
    fn test_in_view_plays_inside_window_and_rewinds_outside() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let reveal = graph.in_view(
            &scope,
            p,
            0.2..=0.8,
            Tween::between(0.0, 1.0, std::time::Duration::from_secs(1)),
        );

        graph.tick(0.5);
        assert_eq!(graph.get(reveal), Some(0.0));

        graph.set(p, 0.5);
        graph.tick(0.25);
        graph.tick(0.25);
        assert!(approx(graph.get(reveal).unwrap(), 0.5));
        graph.tick(2.0);
        assert_eq!(graph.get(reveal), Some(1.0));

        graph.set(p, 0.9);
        graph.tick(0.1);
        assert_eq!(graph.get(reveal), Some(0.0));

        graph.set(p, 0.3);
        graph.tick(0.25);
        assert!(approx(graph.get(reveal).unwrap(), 0.25));
    }

    #[test]
    fn test_in_view_respects_delay_and_reduced_motion() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.5);
        let tween = Tween::between(0.0, 1.0, std::time::Duration::from_secs(1))
            .with_delay(std::time::Duration::from_millis(500));
        let reveal = graph.in_view(&scope, p, 0.0..=1.0, tween);

        graph.tick(0.5);
        assert_eq!(graph.get(reveal), Some(0.0));

        graph.set_reduced_motion(true);
        graph.tick(0.016);
        assert_eq!(graph.get(reveal), Some(1.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "belongs to another MotionGraph")]
    fn test_rejects_scope_from_another_graph() {
        let mut first = MotionGraph::new();
        let mut second = MotionGraph::new();
        let scope = first.scope();
        second.track_page(&scope);
    }

    #[test]
    fn test_transform_non_finite_reads_zero() {
        let mut graph = MotionGraph::new();
        let scope = graph.scope();
        let p = graph.source(&scope, 0.0);
        let out = graph.transform(&scope, p, |v| 1.0 / v);
        graph.tick(0.016);
        assert_eq!(graph.get(out), Some(0.0));
    }

    #[test]
    fn test_layout_update_and_remove() {
        let mut layout = Layout::default();
        let id = layout.insert(Bounds::band(0.0, 10.0));
        assert!(layout.update(id, Bounds::band(5.0, 10.0)));
        assert_eq!(layout.get(id).map(|b| b.y), Some(5.0));
        assert!(layout.remove(id).is_some());
        assert!(!layout.update(id, Bounds::band(0.0, 1.0)));
        assert!(layout.is_empty());
    }
}
