//! Smooth scrolling of the story
//!
//! Key and wheel input move a target scroll position. Deltas arriving
//! within one frame are batched, then the visible position eases towards
//! the target over the configured duration. Time is supplied by the caller
//! as the frame delta, so the animator never reads a clock itself.

use std::time::Duration;

use parallax_core::{ScrollConfig, Tween};

/// Durations and switches derived from the raw scroll settings
pub trait ScrollConfigExt {
    /// How long one scroll ease takes
    fn animation_duration(&self) -> Duration;

    /// Poll interval while the story is moving, never below 1 ms
    fn animation_tick_duration(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        match self.animation_fps {
            // Unset rate: poll at 60 frames per second
            0 => Duration::from_millis(16),
            fps => Duration::from_millis((1000 / fps as u64).max(1)),
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    tween: Tween,
    elapsed: f64,
    to: f64,
}

/// Scroll animation controller
///
/// Call `scroll_by` or `scroll_to` on input, then `update` once per frame
/// with the frame time to get the visible scroll position.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: f64,
    /// Scroll delta batched until the next frame
    pending_delta: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work; use this to pick the frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final position once the running animation ends
    pub fn target_scroll(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> f64 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: f64) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0.0;
    }

    /// Animate to an absolute position
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64) {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        self.pending_delta = 0.0;

        if !self.config.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        self.start(target);
    }

    /// Scroll by a delta (positive is down)
    ///
    /// Multiple calls before the next `update` are batched.
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        if !self.config.is_smooth() {
            self.current_scroll = (self.current_scroll + delta).clamp(0.0, max_scroll.max(0.0));
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    /// Scroll down by the configured line count
    pub fn scroll_down(&mut self, max_scroll: f64) {
        self.scroll_by(self.config.scroll_lines as f64, max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: f64) {
        self.scroll_by(-(self.config.scroll_lines as f64), max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by((viewport_height / 2.0).floor().max(1.0), max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(-(viewport_height / 2.0).floor().max(1.0), max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(viewport_height, max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(-viewport_height, max_scroll);
    }

    /// Advance by `dt` seconds and return the visible scroll position
    pub fn update(&mut self, dt: f64, max_scroll: f64) -> f64 {
        let max_scroll = max_scroll.max(0.0);

        if self.pending_delta != 0.0 {
            let target = (self.target_scroll() + self.pending_delta).clamp(0.0, max_scroll);
            self.pending_delta = 0.0;
            self.start(target);
        }

        if let Some(anim) = self.animation.as_mut() {
            if dt.is_finite() && dt > 0.0 {
                anim.elapsed += dt;
            }
            if anim.tween.is_complete(anim.elapsed) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                self.current_scroll = anim.tween.value_at(anim.elapsed).min(max_scroll);
            }
        }

        self.current_scroll
    }

    /// Stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.animation = None;
        self.current_scroll = 0.0;
        self.pending_delta = 0.0;
    }

    fn start(&mut self, target: f64) {
        if (target - self.current_scroll).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }
        let tween = Tween::between(self.current_scroll, target, self.config.animation_duration())
            .with_easing(self.config.easing);
        self.animation = Some(ActiveAnimation {
            tween,
            elapsed: 0.0,
            to: target,
        });
    }
}
