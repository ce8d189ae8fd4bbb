//! Rate of change of a sampled value

/// Tracks the velocity of a value sampled once per tick
///
/// Velocity is expressed in units per second. When the value stops changing
/// the reported velocity drops to zero on the next sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocityTracker {
    previous: Option<f64>,
    velocity: f64,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample taken `dt` seconds after the previous one
    pub fn update(&mut self, value: f64, dt: f64) -> f64 {
        if !value.is_finite() {
            return self.velocity;
        }
        if let Some(previous) = self.previous {
            if dt.is_finite() && dt > 0.0 {
                self.velocity = (value - previous) / dt;
            }
        }
        self.previous = Some(value);
        self.velocity
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.update(5.0, 0.1), 0.0);
    }

    #[test]
    fn test_units_per_second() {
        let mut tracker = VelocityTracker::new();
        tracker.update(0.0, 0.0);
        assert!((tracker.update(0.5, 0.25) - 2.0).abs() < 1e-9);
        assert!((tracker.update(0.25, 0.25) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_drops_to_zero_when_still() {
        let mut tracker = VelocityTracker::new();
        tracker.update(0.0, 0.0);
        tracker.update(1.0, 0.1);
        assert_eq!(tracker.update(1.0, 0.1), 0.0);
    }

    #[test]
    fn test_zero_dt_keeps_last_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.update(0.0, 0.0);
        tracker.update(1.0, 0.5);
        assert!((tracker.update(3.0, 0.0) - 2.0).abs() < 1e-9);
    }
}
