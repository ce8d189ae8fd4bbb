//! Second-order spring filter
//!
//! A `Spring` chases a target value the way a damped mass on a spring would.
//! Each step integrates the closed-form solution of the spring equation over
//! the elapsed time, so results do not depend on the step size and a
//! critically damped spring never overshoots.

use serde::{Deserialize, Serialize};

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Spring constant; higher values pull harder towards the target
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Friction opposing velocity
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance from target below which the spring may settle
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    /// Speed below which the spring may settle
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
        }
    }
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    10.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest_delta() -> f64 {
    0.01
}

fn default_rest_speed() -> f64 {
    0.01
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Default::default()
        }
    }

    /// A spring damped exactly at the critical threshold for `stiffness`
    pub fn critically_damped(stiffness: f64) -> Self {
        let mass = default_mass();
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt())
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Damping ratio ζ: below 1 oscillates, 1 is critical, above 1 is sluggish
    pub fn damping_ratio(&self) -> f64 {
        let (stiffness, damping, mass) = self.physical();
        damping / (2.0 * (stiffness * mass).sqrt())
    }

    /// Undamped angular frequency ω₀ in radians per second
    pub fn natural_frequency(&self) -> f64 {
        let (stiffness, _, mass) = self.physical();
        (stiffness / mass).sqrt()
    }

    /// The parameters a `Spring` actually runs with
    ///
    /// Non-physical stiffness, damping or mass fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let (stiffness, damping, mass) = self.physical();
        Self {
            stiffness,
            damping,
            mass,
            ..*self
        }
    }

    fn physical(&self) -> (f64, f64, f64) {
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        let damping = if self.damping.is_finite() && self.damping >= 0.0 {
            self.damping
        } else {
            default_damping()
        };
        (
            positive(self.stiffness, default_stiffness()),
            damping,
            positive(self.mass, default_mass()),
        )
    }
}

/// Spring state following a target
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Create a spring resting at `value`
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the value being chased; velocity carries over
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` and stop moving
    pub fn snap_to(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
            self.velocity = 0.0;
        }
    }

    /// Check if the spring has settled on its target
    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Advance the spring by `dt` seconds and return the new value
    pub fn step(&mut self, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0) || self.is_at_rest() {
            return self.value;
        }

        let (stiffness, damping, mass) = self.config.physical();
        let omega = (stiffness / mass).sqrt();
        let zeta = damping / (2.0 * (stiffness * mass).sqrt());

        let x0 = self.value - self.target;
        let v0 = self.velocity;

        let (x, v) = if (zeta - 1.0).abs() < 1e-6 {
            let b = v0 + omega * x0;
            let decay = (-omega * dt).exp();
            ((x0 + b * dt) * decay, (v0 - omega * b * dt) * decay)
        } else if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * dt).exp();
            let (sin, cos) = (omega_d * dt).sin_cos();
            let x = decay * (x0 * cos + (v0 + zeta * omega * x0) / omega_d * sin);
            let v = decay * (v0 * cos - (omega * omega * x0 + zeta * omega * v0) / omega_d * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * dt).exp(), (r2 * dt).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        };

        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = self.target + x;
            self.velocity = v;
        }
        self.value
    }
}
