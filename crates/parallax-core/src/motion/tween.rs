//! Time-driven keyframe animation
//!
//! A `Tween` plays keyframes over a fixed duration, optionally after a delay
//! and with repetition. It is a pure function of elapsed time: the caller
//! owns the clock and asks for the value at any moment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::keyframes::{KeyframeError, Keyframes};

/// How many extra times a tween plays after the first run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Repeat {
    #[default]
    Never,
    Times(u32),
    Forever,
}

/// Direction of repeated runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatMode {
    /// Restart from the first keyframe
    #[default]
    Loop,
    /// Alternate direction on each run
    Mirror,
}

/// Keyframes played over time
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    keyframes: Keyframes<f64>,
    duration: f64,
    delay: f64,
    repeat: Repeat,
    mode: RepeatMode,
}

impl Tween {
    /// Animate from `from` to `to` over `duration`
    pub fn between(from: f64, to: f64, duration: Duration) -> Self {
        let keyframes = Keyframes::from_parts(vec![0.0, 1.0], vec![from, to])
            .unwrap_or_else(|_| Keyframes::constant(to));
        Self::new(keyframes, duration)
    }

    /// Animate through `values` spaced evenly over `duration`
    pub fn through(values: Vec<f64>, duration: Duration) -> Result<Self, KeyframeError> {
        Ok(Self::new(Keyframes::evenly_spaced(values)?, duration))
    }

    /// Animate along keyframes whose inputs are fractions of the duration
    pub fn new(keyframes: Keyframes<f64>, duration: Duration) -> Self {
        Self {
            keyframes,
            duration: duration.as_secs_f64(),
            delay: 0.0,
            repeat: Repeat::Never,
            mode: RepeatMode::Loop,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay.as_secs_f64();
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.keyframes = self.keyframes.with_easing(easing);
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat, mode: RepeatMode) -> Self {
        self.repeat = repeat;
        self.mode = mode;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration)
    }

    /// Total running time including delay, `None` when repeating forever
    pub fn total_duration(&self) -> Option<Duration> {
        let runs = match self.repeat {
            Repeat::Never => 1,
            Repeat::Times(n) => n as u64 + 1,
            Repeat::Forever => return None,
        };
        Some(Duration::from_secs_f64(self.delay + self.duration * runs as f64))
    }

    /// Check if the tween has played to its end
    pub fn is_complete(&self, elapsed: f64) -> bool {
        match self.total_duration() {
            Some(total) => elapsed >= total.as_secs_f64(),
            None => false,
        }
    }

    /// Value at `elapsed` seconds since the tween started
    pub fn value_at(&self, elapsed: f64) -> f64 {
        self.keyframes.sample(self.progress_at(elapsed))
    }

    /// Position within the keyframes at `elapsed` seconds, in [0, 1]
    pub fn progress_at(&self, elapsed: f64) -> f64 {
        // Infinite elapsed time means "skip to the end", even for loops
        let active = if elapsed.is_finite() {
            (elapsed - self.delay).max(0.0)
        } else if elapsed > 0.0 {
            return self.final_progress();
        } else {
            0.0
        };

        if self.duration <= 0.0 {
            return self.final_progress();
        }

        let max_runs = match self.repeat {
            Repeat::Never => Some(1u64),
            Repeat::Times(n) => Some(n as u64 + 1),
            Repeat::Forever => None,
        };

        let runs_done = (active / self.duration).floor();
        if let Some(max) = max_runs {
            if runs_done >= max as f64 {
                return self.final_progress();
            }
        }

        let local = (active - runs_done * self.duration) / self.duration;
        let reversed = self.mode == RepeatMode::Mirror && runs_done as u64 % 2 == 1;
        if reversed {
            1.0 - local
        } else {
            local
        }
    }

    /// Where the tween comes to rest once finished
    fn final_progress(&self) -> f64 {
        let last_run = match self.repeat {
            Repeat::Never | Repeat::Forever => 0,
            Repeat::Times(n) => n,
        };
        if self.mode == RepeatMode::Mirror && last_run % 2 == 1 {
            0.0
        } else {
            1.0
        }
    }
}
