use std::time::Duration;

use parallax_core::{
    AppConfig, Axis, Bounds, Easing, Keyframes, MotionGraph, RegionId, Repeat, RepeatMode,
    Result as CoreResult, Scope, ScrollConfig, ScrollOffset, SpringConfig, Tween, ValueId,
    Viewport,
};

use crate::input::Action;
use crate::scroll::ScrollAnimator;
use crate::story::{Section, Story};
use crate::theme::Theme;

/// Rows above the story (progress bar)
pub const CONTENT_TOP: u16 = 1;
/// Rows taken by the progress bar and the status bar
const CHROME_ROWS: u16 = 2;

/// Section progress during which its lines count as in view
const REVEAL_WINDOW: std::ops::RangeInclusive<f64> = 0.15..=0.85;
const REVEAL_SECS: f64 = 0.8;
/// Delay between consecutive lines of one section
const REVEAL_STAGGER_SECS: f64 = 0.1;
const REVEAL_EASING: Easing = Easing::CubicBezier([0.16, 1.0, 0.3, 1.0]);

/// Ambient background glow looping on its own clock
struct GlowSpec {
    /// Resting center as a fraction of the story area
    anchor: (f64, f64),
    /// Drift in cells at the peak of the loop
    drift: (f64, f64),
    /// Radius as a fraction of the story width, at rest and at the peak
    radius: (f64, f64),
    period_secs: f64,
    delay_secs: f64,
    /// Strength at page progress 0, 0.5 and 1
    strength: [f64; 3],
}

const GLOWS: [GlowSpec; 2] = [
    GlowSpec {
        anchor: (0.2, 0.25),
        drift: (6.0, 2.0),
        radius: (0.35, 0.455),
        period_secs: 15.0,
        delay_secs: 0.0,
        strength: [0.3, 0.5, 0.2],
    },
    GlowSpec {
        anchor: (0.8, 0.75),
        drift: (-5.0, -2.0),
        radius: (0.36, 0.3),
        period_secs: 12.0,
        delay_secs: 2.0,
        strength: [0.1, 0.4, 0.1],
    },
];

/// Motion values bound to one section
#[derive(Debug, Clone)]
struct SectionBinding {
    region: RegionId,
    progress: ValueId,
    opacity: ValueId,
    offset: ValueId,
    jitter: ValueId,
    /// Title first, then one per body line
    reveals: Vec<ValueId>,
    tilt_x: ValueId,
    tilt_y: ValueId,
    pulse: Option<ValueId>,
}

#[derive(Debug, Clone, Copy)]
struct GlowBinding {
    phase: ValueId,
    strength: ValueId,
}

/// Motion values bound to the whole page
#[derive(Debug, Clone)]
struct PageBinding {
    progress: ValueId,
    velocity: ValueId,
    smooth_velocity: ValueId,
    skew: ValueId,
    follower_x: ValueId,
    follower_y: ValueId,
    glows: Vec<GlowBinding>,
}

/// What a section looks like on the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFrame {
    pub index: usize,
    /// Screen row of the section's top edge, relative to the story area
    pub top: f64,
    pub progress: f64,
    pub opacity: f64,
    /// Vertical parallax offset in rows
    pub offset: f64,
    /// Horizontal glitch offset in columns
    pub jitter: f64,
    /// Reveal of each line from 0 (hidden) to 1, title first
    pub reveal: Vec<f64>,
    /// Lean towards the pointer in degrees, around the vertical and
    /// horizontal axes
    pub tilt: (f64, f64),
    /// Background flicker strength, 0 for calm sections
    pub pulse: f64,
}

/// A background glow on the current frame, in story area cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowFrame {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub strength: f64,
}

pub struct App {
    pub config: AppConfig,
    pub story: Story,
    pub theme: Theme,
    pub scroll: ScrollAnimator,
    pub pending_key: Option<char>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Whether the pointer has been seen inside the terminal
    pub pointer_visible: bool,
    graph: MotionGraph,
    sections: Vec<SectionBinding>,
    section_scope: Option<Scope>,
    page: PageBinding,
    _page_scope: Scope,
    width: u16,
    viewport_height: u16,
}

impl App {
    pub fn new(config: AppConfig, story: Story) -> CoreResult<Self> {
        let viewport_height = 24 - CHROME_ROWS;
        let width = 80;
        let mut graph = MotionGraph::new();
        graph.set_viewport(Viewport::new(0.0, viewport_height as f64, 0.0));
        graph.set_reduced_motion(config.motion.reduced_motion);
        // Rest the pointer mid-screen so nothing leans before the mouse shows up
        graph.set_pointer(width as f64 / 2.0, viewport_height as f64 / 2.0);

        let page_scope = graph.scope();
        let page = bind_page(&mut graph, &page_scope, &config)?;

        let mut app = Self {
            theme: Theme::from_config(&config.ui.theme),
            scroll: ScrollAnimator::new(scroll_config(&config)),
            config,
            story: Story {
                title: String::new(),
                sections: Vec::new(),
            },
            pending_key: None,
            should_quit: false,
            status_message: None,
            pointer_visible: false,
            graph,
            sections: Vec::new(),
            section_scope: None,
            page,
            _page_scope: page_scope,
            width,
            viewport_height,
        };
        app.set_story(story)?;
        Ok(app)
    }

    /// Replace the story, releasing every value bound to the old one
    pub fn set_story(&mut self, story: Story) -> CoreResult<()> {
        for binding in self.sections.drain(..) {
            self.graph.layout_mut().remove(binding.region);
        }
        if let Some(scope) = self.section_scope.take() {
            scope.release();
        }
        self.graph.collect();

        let scope = self.graph.scope();
        for (index, section) in story.sections.iter().enumerate() {
            let bounds = self.section_bounds(index);
            let region = self.graph.layout_mut().insert(bounds);
            let binding = bind_section(
                &mut self.graph,
                &scope,
                region,
                index,
                section,
                self.config.motion.pointer_spring,
            )?;
            self.sections.push(binding);
        }
        let height = self.viewport_height as f64;
        self.section_scope = Some(scope);
        self.story = story;

        self.graph.set_document_height(self.sections.len() as f64 * height);
        self.scroll.set_scroll(0.0);
        self.graph.set_scroll(0.0);
        self.graph.tick(0.0);

        tracing::debug!(
            sections = self.sections.len(),
            values = self.graph.len(),
            "Bound story"
        );
        Ok(())
    }

    /// Lay the story out for a terminal of `width` x `height` cells
    pub fn resize(&mut self, width: u16, height: u16) {
        let new_height = height.saturating_sub(CHROME_ROWS).max(1);
        if new_height == self.viewport_height && width == self.width {
            return;
        }

        // Keep the same point of the story on screen
        let old_height = self.viewport_height.max(1) as f64;
        let position = self.scroll.current_scroll() / old_height;

        self.width = width;
        self.viewport_height = new_height;
        let h = new_height as f64;
        for index in 0..self.sections.len() {
            let bounds = self.section_bounds(index);
            let region = self.sections[index].region;
            self.graph.layout_mut().update(region, bounds);
        }
        self.graph.set_viewport_height(h);
        if !self.pointer_visible {
            self.graph.set_pointer(width as f64 / 2.0, h / 2.0);
        }
        self.graph.set_document_height(self.sections.len() as f64 * h);

        let scroll = (position * h).clamp(0.0, self.max_scroll());
        self.scroll.set_scroll(scroll);
        self.graph.set_scroll(scroll);

        tracing::debug!(width, height = new_height, "Resized story layout");
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height as f64
    }

    /// Story area columns
    pub fn width(&self) -> f64 {
        self.width as f64
    }

    /// Document bounds of section `index`: one full screen each
    fn section_bounds(&self, index: usize) -> Bounds {
        let h = self.viewport_height();
        Bounds::new(0.0, index as f64 * h, self.width(), h)
    }

    pub fn max_scroll(&self) -> f64 {
        self.graph.viewport().max_scroll()
    }

    /// Advance all motion by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        let max_scroll = self.max_scroll();
        let scroll = self.scroll.update(dt, max_scroll);
        self.graph.set_scroll(scroll);
        self.graph.tick(dt);
    }

    /// Whether anything on screen is still moving
    ///
    /// The ambient loops never stop, so they run at the idle tick rate and
    /// are left out.
    pub fn is_animating(&self) -> bool {
        if self.scroll.needs_update() {
            return true;
        }

        let value = |id| self.graph.get(id).unwrap_or(0.0);
        let velocity_moving = value(self.page.velocity).abs() > 1e-4
            || value(self.page.smooth_velocity).abs() > 1e-4;

        let pointer = self.graph.pointer();
        let follower_moving = self.pointer_visible
            && ((value(self.page.follower_x) - pointer.x).abs() > 0.01
                || (value(self.page.follower_y) - pointer.y).abs() > 0.01);

        let revealing = self.sections.iter().any(|binding| {
            REVEAL_WINDOW.contains(&value(binding.progress))
                && binding.reveals.iter().any(|&id| value(id) < 1.0)
        });

        velocity_moving || follower_moving || revealing
    }

    pub fn apply(&mut self, action: Action) {
        if !matches!(action, Action::PendingG | Action::PointerMoved(..)) {
            self.clear_pending_key();
        }

        let h = self.viewport_height();
        let max = self.max_scroll();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll.scroll_down(max),
            Action::ScrollUp => self.scroll.scroll_up(max),
            Action::ScrollHalfPageDown => self.scroll.scroll_half_page_down(h, max),
            Action::ScrollHalfPageUp => self.scroll.scroll_half_page_up(h, max),
            Action::ScrollPageDown => self.scroll.scroll_full_page_down(h, max),
            Action::ScrollPageUp => self.scroll.scroll_full_page_up(h, max),
            Action::JumpToTop => self.scroll.scroll_to(0.0, max),
            Action::JumpToBottom => self.scroll.scroll_to(max, max),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => {
                let next = (self.target_section() + 1).min(self.sections.len().saturating_sub(1));
                self.scroll.scroll_to(next as f64 * h, max);
            }
            Action::PrevSection => {
                let prev = self.target_section().saturating_sub(1);
                self.scroll.scroll_to(prev as f64 * h, max);
            }
            Action::ToggleReducedMotion => {
                let reduced = !self.config.motion.reduced_motion;
                self.config.motion.reduced_motion = reduced;
                self.graph.set_reduced_motion(reduced);
                self.scroll.set_config(scroll_config(&self.config));
                tracing::info!(reduced, "Toggled reduced motion");
                self.set_status(if reduced {
                    "Reduced motion on"
                } else {
                    "Reduced motion off"
                });
            }
            Action::PointerMoved(column, row) => {
                let y = row as f64 - CONTENT_TOP as f64;
                self.graph.set_pointer(column as f64, y);
                self.pointer_visible = true;
            }
            Action::None => {}
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    // Frame state for widgets

    pub fn section_frames(&self) -> Vec<SectionFrame> {
        let h = self.viewport_height();
        let scroll = self.scroll.current_scroll();
        let value = |id| self.graph.get(id).unwrap_or(0.0);

        self.sections
            .iter()
            .enumerate()
            .map(|(index, binding)| SectionFrame {
                index,
                top: index as f64 * h - scroll,
                progress: value(binding.progress),
                opacity: value(binding.opacity),
                offset: value(binding.offset),
                jitter: value(binding.jitter),
                reveal: binding.reveals.iter().map(|&id| value(id)).collect(),
                tilt: if self.pointer_visible {
                    (value(binding.tilt_x), value(binding.tilt_y))
                } else {
                    (0.0, 0.0)
                },
                pulse: binding.pulse.map(value).unwrap_or(0.0),
            })
            .collect()
    }

    /// Background glows, positioned for the current story area
    pub fn glows(&self) -> Vec<GlowFrame> {
        let (w, h) = (self.width(), self.viewport_height());
        let value = |id| self.graph.get(id).unwrap_or(0.0);

        GLOWS
            .iter()
            .zip(&self.page.glows)
            .map(|(glow, binding)| {
                let phase = value(binding.phase);
                let (rest, peak) = glow.radius;
                GlowFrame {
                    x: glow.anchor.0 * w + glow.drift.0 * phase,
                    y: glow.anchor.1 * h + glow.drift.1 * phase,
                    radius: (rest + (peak - rest) * phase) * w,
                    strength: value(binding.strength),
                }
            })
            .collect()
    }

    pub fn page_progress(&self) -> f64 {
        self.graph.get(self.page.progress).unwrap_or(0.0)
    }

    /// Skew in degrees driven by smoothed scroll velocity
    pub fn skew(&self) -> f64 {
        self.graph.get(self.page.skew).unwrap_or(0.0)
    }

    pub fn scroll_velocity(&self) -> f64 {
        self.graph.get(self.page.smooth_velocity).unwrap_or(0.0)
    }

    /// Smoothed pointer position relative to the story area
    pub fn follower(&self) -> Option<(f64, f64)> {
        if !self.pointer_visible {
            return None;
        }
        Some((
            self.graph.get(self.page.follower_x)?,
            self.graph.get(self.page.follower_y)?,
        ))
    }

    /// Section filling most of the screen
    pub fn current_section(&self) -> usize {
        self.section_at(self.scroll.current_scroll())
    }

    fn target_section(&self) -> usize {
        self.section_at(self.scroll.target_scroll())
    }

    fn section_at(&self, scroll: f64) -> usize {
        let index = (scroll / self.viewport_height()).round().max(0.0) as usize;
        index.min(self.sections.len().saturating_sub(1))
    }

    pub fn graph(&self) -> &MotionGraph {
        &self.graph
    }
}

fn scroll_config(config: &AppConfig) -> ScrollConfig {
    let mut scroll = config.ui.scroll.clone();
    if config.motion.reduced_motion {
        scroll.smooth_enabled = false;
    }
    scroll
}

fn bind_page(
    graph: &mut MotionGraph,
    scope: &Scope,
    config: &AppConfig,
) -> CoreResult<PageBinding> {
    let progress = graph.track_page(scope);
    let velocity = graph.velocity(scope, progress);
    let smooth_velocity = graph.smooth(scope, velocity, config.motion.velocity_spring);
    let skew = graph.map(
        scope,
        smooth_velocity,
        Keyframes::new([(-0.1, -5.0), (0.1, 5.0)])?,
    );

    let pointer_x = graph.track_pointer(scope, Axis::X, None);
    let pointer_y = graph.track_pointer(scope, Axis::Y, None);
    let follower_x = graph.smooth(scope, pointer_x, config.motion.pointer_spring);
    let follower_y = graph.smooth(scope, pointer_y, config.motion.pointer_spring);

    let glows = GLOWS
        .iter()
        .map(|glow| -> CoreResult<GlowBinding> {
            let drift = Tween::through(
                vec![0.0, 1.0, 0.0],
                Duration::from_secs_f64(glow.period_secs),
            )?
            .with_easing(Easing::EaseInOut)
            .with_delay(Duration::from_secs_f64(glow.delay_secs))
            .with_repeat(Repeat::Forever, RepeatMode::Loop);
            let [start, middle, end] = glow.strength;
            Ok(GlowBinding {
                phase: graph.tween(scope, drift),
                strength: graph.map(
                    scope,
                    progress,
                    Keyframes::new([(0.0, start), (0.5, middle), (1.0, end)])?,
                ),
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(PageBinding {
        progress,
        velocity,
        smooth_velocity,
        skew,
        follower_x,
        follower_y,
        glows,
    })
}

fn bind_section(
    graph: &mut MotionGraph,
    scope: &Scope,
    region: RegionId,
    index: usize,
    section: &Section,
    pointer_spring: SpringConfig,
) -> CoreResult<SectionBinding> {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };

    let progress = graph.track(scope, region, ScrollOffset::ENTER_EXIT);
    let opacity = graph.map(
        scope,
        progress,
        Keyframes::new([(0.0, 0.0), (0.2, 1.0), (0.8, 1.0), (1.0, 0.0)])?,
    );
    let offset = graph.map(
        scope,
        progress,
        Keyframes::new([(0.0, 2.0), (0.5, 0.0), (1.0, -2.0)])?,
    );
    let jitter = graph.map(
        scope,
        progress,
        Keyframes::new([
            (0.0, 0.0),
            (0.25, 2.0 * sign),
            (0.5, 0.0),
            (0.75, -3.0 * sign),
            (1.0, 0.0),
        ])?,
    );

    let reveals = (0..section.reveal_lines())
        .map(|line| {
            let tween = Tween::between(0.0, 1.0, Duration::from_secs_f64(REVEAL_SECS))
                .with_easing(REVEAL_EASING)
                .with_delay(Duration::from_secs_f64(line as f64 * REVEAL_STAGGER_SECS));
            graph.in_view(scope, progress, REVEAL_WINDOW, tween)
        })
        .collect();

    // Lean towards the pointer while it is over the section
    let pointer_x = graph.track_pointer(scope, Axis::X, Some(region));
    let pointer_y = graph.track_pointer(scope, Axis::Y, Some(region));
    let lean_x = graph.map(scope, pointer_x, Keyframes::new([(-30.0, -8.0), (30.0, 8.0)])?);
    let lean_y = graph.map(scope, pointer_y, Keyframes::new([(-12.0, 8.0), (12.0, -8.0)])?);
    let tilt_x = graph.smooth(scope, lean_x, pointer_spring);
    let tilt_y = graph.smooth(scope, lean_y, pointer_spring);

    let pulse = if section.pulse {
        let flicker = Tween::through(vec![0.1, 0.3, 0.1], Duration::from_millis(500))?
            .with_repeat(Repeat::Forever, RepeatMode::Mirror);
        Some(graph.tween(scope, flicker))
    } else {
        None
    };

    Ok(SectionBinding {
        region,
        progress,
        opacity,
        offset,
        jitter,
        reveals,
        tilt_x,
        tilt_y,
        pulse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn app() -> App {
        let mut app = App::new(AppConfig::default(), Story::builtin()).unwrap();
        app.resize(80, 24);
        app
    }

    fn reduced_app() -> App {
        let mut config = AppConfig::default();
        config.motion.reduced_motion = true;
        let mut app = App::new(config, Story::builtin()).unwrap();
        app.resize(80, 24);
        app
    }

    #[test]
    fn test_layout_one_viewport_per_section() {
        let app = app();
        assert_eq!(app.viewport_height(), 22.0);
        assert_eq!(app.max_scroll(), 6.0 * 22.0);

        let frames = app.section_frames();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[1].top, 22.0);
        // First section fills the screen at the top of the page
        assert!((frames[0].progress - 0.5).abs() < 1e-9);
        assert!((frames[0].opacity - 1.0).abs() < 1e-9);
        assert_eq!(frames[1].opacity, 0.0);
    }

    #[test]
    fn test_jump_to_bottom() {
        let mut app = reduced_app();
        app.apply(Action::JumpToBottom);
        app.tick(FRAME);

        assert_eq!(app.scroll.current_scroll(), app.max_scroll());
        assert!((app.page_progress() - 1.0).abs() < 1e-9);
        assert_eq!(app.current_section(), 6);

        let frames = app.section_frames();
        assert!((frames[6].opacity - 1.0).abs() < 1e-9);
        assert_eq!(frames[0].opacity, 0.0);
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let mut app = app();
        app.apply(Action::NextSection);
        app.tick(FRAME);
        assert!(app.is_animating());
        let partway = app.scroll.current_scroll();
        assert!(partway > 0.0 && partway < 22.0);

        for _ in 0..600 {
            app.tick(FRAME);
        }
        assert_eq!(app.scroll.current_scroll(), 22.0);
        assert_eq!(app.current_section(), 1);
        assert!(!app.is_animating());
    }

    #[test]
    fn test_section_navigation_clamps() {
        let mut app = reduced_app();
        app.apply(Action::PrevSection);
        app.tick(FRAME);
        assert_eq!(app.scroll.current_scroll(), 0.0);

        for _ in 0..20 {
            app.apply(Action::NextSection);
            app.tick(FRAME);
        }
        assert_eq!(app.current_section(), 6);
    }

    #[test]
    fn test_scrolling_down_skews_then_settles() {
        let mut app = app();
        for _ in 0..10 {
            app.apply(Action::ScrollDown);
            app.tick(FRAME);
        }
        assert!(app.skew() > 0.0);
        assert!(app.skew() <= 5.0);
        assert!(app.scroll_velocity() > 0.0);

        for _ in 0..600 {
            app.tick(FRAME);
        }
        assert!(app.skew().abs() < 1e-3);
        assert!(!app.is_animating());
    }

    #[test]
    fn test_pointer_follower_converges() {
        let mut app = app();
        assert_eq!(app.follower(), None);

        app.apply(Action::PointerMoved(30, 11));
        assert!(app.is_animating());
        for _ in 0..600 {
            app.tick(FRAME);
        }
        let (x, y) = app.follower().unwrap();
        assert!((x - 30.0).abs() < 0.01);
        assert!((y - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_set_story_releases_old_bindings() {
        let mut app = app();
        let before = app.graph().len();

        let mut story = Story::builtin();
        story.sections.truncate(2);
        let fresh = App::new(AppConfig::default(), story.clone()).unwrap();
        app.set_story(story).unwrap();

        assert_eq!(app.section_frames().len(), 2);
        assert!(app.graph().len() < before);
        assert_eq!(app.graph().len(), fresh.graph().len());
        assert_eq!(app.graph().layout().len(), 2);
    }

    #[test]
    fn test_lines_reveal_in_turn_once_in_view() {
        let mut app = app();
        let frames = app.section_frames();
        assert_eq!(frames[0].reveal.len(), 5);
        assert!(frames[0].reveal.iter().all(|&r| r == 0.0));

        for _ in 0..6 {
            app.tick(FRAME);
        }
        let reveal = &app.section_frames()[0].reveal;
        assert!(reveal[0] > 0.0);
        assert_eq!(reveal[2], 0.0);

        for _ in 0..120 {
            app.tick(FRAME);
        }
        let frames = app.section_frames();
        assert!(frames[0].reveal.iter().all(|&r| (r - 1.0).abs() < 1e-9));
        // The next section has not come into view yet
        assert!(frames[1].reveal.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn test_reveal_replays_after_leaving_view() {
        let mut app = app();
        for _ in 0..120 {
            app.tick(FRAME);
        }
        app.apply(Action::NextSection);
        for _ in 0..600 {
            app.tick(FRAME);
        }
        let frames = app.section_frames();
        assert!(frames[0].reveal.iter().all(|&r| r == 0.0));
        assert!(frames[1].reveal.iter().all(|&r| (r - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_reveal_keeps_frames_coming() {
        let mut app = app();
        app.tick(FRAME);
        assert!(app.is_animating());
        for _ in 0..120 {
            app.tick(FRAME);
        }
        assert!(!app.is_animating());
    }

    #[test]
    fn test_reduced_motion_shows_lines_at_once() {
        let app = reduced_app();
        let frames = app.section_frames();
        assert!(frames[0].reveal.iter().all(|&r| r == 1.0));
    }

    #[test]
    fn test_glows_drift_on_their_own_clock() {
        let mut app = app();
        let glows = app.glows();
        assert_eq!(glows.len(), 2);
        assert_eq!((glows[0].x, glows[0].y), (16.0, 5.5));
        assert!((glows[0].strength - 0.3).abs() < 1e-9);

        // Half of the first glow's loop: furthest from its anchor
        for _ in 0..450 {
            app.tick(FRAME);
        }
        let glows = app.glows();
        assert!((glows[0].x - 22.0).abs() < 1e-3);
        assert!((glows[0].radius - 0.455 * 80.0).abs() < 1e-2);
        assert!(glows[1].x < 64.0);
    }

    #[test]
    fn test_glow_strength_follows_page_progress() {
        let mut app = reduced_app();
        app.apply(Action::JumpToBottom);
        app.tick(FRAME);
        let glows = app.glows();
        assert!((glows[0].strength - 0.2).abs() < 1e-9);
        assert!((glows[1].strength - 0.1).abs() < 1e-9);
        // Loops rest at their anchor with reduced motion
        assert_eq!(glows[0].x, 16.0);
    }

    #[test]
    fn test_pulse_mirrors_on_flagged_section() {
        let mut app = app();
        let frames = app.section_frames();
        assert_eq!(frames[0].pulse, 0.0);
        assert!((frames[1].pulse - 0.1).abs() < 1e-9);

        for _ in 0..15 {
            app.tick(FRAME);
        }
        assert!((app.section_frames()[1].pulse - 0.3).abs() < 1e-6);
        for _ in 0..15 {
            app.tick(FRAME);
        }
        assert!((app.section_frames()[1].pulse - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_section_leans_towards_pointer() {
        let mut app = app();
        assert_eq!(app.section_frames()[0].tilt, (0.0, 0.0));

        // 30 columns right of the section center, 11 rows above it
        app.apply(Action::PointerMoved(70, CONTENT_TOP));
        for _ in 0..600 {
            app.tick(FRAME);
        }
        let (x, y) = app.section_frames()[0].tilt;
        assert!((x - 8.0).abs() < 1e-3);
        assert!((y - 8.0 * 11.0 / 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_keeps_position() {
        let mut app = reduced_app();
        app.apply(Action::NextSection);
        app.apply(Action::NextSection);
        app.tick(FRAME);
        assert_eq!(app.current_section(), 2);

        app.resize(100, 42);
        assert_eq!(app.viewport_height(), 40.0);
        assert_eq!(app.scroll.current_scroll(), 80.0);
        assert_eq!(app.current_section(), 2);
    }

    #[test]
    fn test_pending_g_cleared_by_other_actions() {
        let mut app = app();
        app.apply(Action::PendingG);
        assert_eq!(app.pending_key, Some('g'));
        app.apply(Action::ScrollDown);
        assert_eq!(app.pending_key, None);
    }

    #[test]
    fn test_toggle_reduced_motion() {
        let mut app = app();
        app.apply(Action::ToggleReducedMotion);
        assert!(app.config.motion.reduced_motion);
        assert!(app.status_message.is_some());

        app.apply(Action::ScrollPageDown);
        assert_eq!(app.scroll.current_scroll(), 22.0);
    }
}
