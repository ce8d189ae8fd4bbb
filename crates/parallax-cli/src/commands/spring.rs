use anyhow::{bail, Result};
use serde::Serialize;

use parallax_core::{Spring, SpringConfig};

/// Most samples a single run may print
const MAX_FRAMES: f64 = 1_000_000.0;

pub struct SpringArgs {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub from: f64,
    pub target: f64,
    pub duration: f64,
    pub fps: u32,
}

#[derive(Debug, Serialize)]
struct Step {
    time: f64,
    value: f64,
    velocity: f64,
}

pub fn run(args: SpringArgs, json: bool) -> Result<()> {
    let config = SpringConfig::new(args.stiffness, args.damping).with_mass(args.mass);
    let steps = simulate(config, &args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    println!("{}", header(&config));
    println!("{:>8}  {:>12}  {:>12}", "time", "value", "velocity");
    for step in &steps {
        println!("{:>8.3}  {:>12.4}  {:>12.4}", step.time, step.value, step.velocity);
    }

    Ok(())
}

/// Summary line describing the spring as it will run
fn header(config: &SpringConfig) -> String {
    let effective = config.sanitized();
    let ratio = effective.damping_ratio();
    let kind = if (ratio - 1.0).abs() < 1e-6 {
        "critically damped"
    } else if ratio < 1.0 {
        "underdamped"
    } else {
        "overdamped"
    };
    format!(
        "# stiffness {} damping {} mass {}: ratio {:.3} ({}), {:.2} rad/s",
        effective.stiffness,
        effective.damping,
        effective.mass,
        ratio,
        kind,
        effective.natural_frequency()
    )
}

/// Step response: released at `from`, chasing `target`
fn simulate(config: SpringConfig, args: &SpringArgs) -> Result<Vec<Step>> {
    if args.fps == 0 {
        bail!("--fps must be positive");
    }
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        bail!("--duration must be a non-negative number of seconds");
    }
    if !(args.from.is_finite() && args.target.is_finite()) {
        bail!("--from and --target must be finite");
    }

    let frames = (args.duration * args.fps as f64).round();
    if frames > MAX_FRAMES {
        bail!(
            "--duration {} at --fps {} gives {} samples, the limit is {}",
            args.duration,
            args.fps,
            frames,
            MAX_FRAMES
        );
    }
    let frames = frames as usize;
    let dt = 1.0 / args.fps as f64;

    let mut spring = Spring::new(config, args.from);
    spring.set_target(args.target);

    let mut steps = Vec::with_capacity(frames + 1);
    steps.push(Step {
        time: 0.0,
        value: spring.value(),
        velocity: spring.velocity(),
    });
    for frame in 1..=frames {
        spring.step(dt);
        steps.push(Step {
            time: frame as f64 * dt,
            value: spring.value(),
            velocity: spring.velocity(),
        });
    }
    tracing::debug!(frames, at_rest = spring.is_at_rest(), "Simulated spring");

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(stiffness: f64, damping: f64) -> SpringArgs {
        SpringArgs {
            stiffness,
            damping,
            mass: 1.0,
            from: 0.0,
            target: 1.0,
            duration: 3.0,
            fps: 60,
        }
    }

    #[test]
    fn test_step_response_settles() {
        let args = args(200.0, 25.0);
        let config = SpringConfig::new(args.stiffness, args.damping);
        let steps = simulate(config, &args).unwrap();

        assert_eq!(steps.len(), 181);
        assert_eq!(steps[0].value, 0.0);
        let last = steps.last().unwrap();
        assert!((last.value - 1.0).abs() < 1e-6);
        assert!((last.time - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_critical_damping_never_overshoots() {
        let args = args(100.0, 20.0);
        let config = SpringConfig::new(args.stiffness, args.damping);
        let steps = simulate(config, &args).unwrap();
        assert!(steps.iter().all(|s| s.value <= 1.0 + 1e-9));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let config = SpringConfig::default();
        let mut bad = args(100.0, 10.0);
        bad.fps = 0;
        assert!(simulate(config, &bad).is_err());

        let mut bad = args(100.0, 10.0);
        bad.duration = f64::NAN;
        assert!(simulate(config, &bad).is_err());
    }

    #[test]
    fn test_rejects_huge_durations() {
        let config = SpringConfig::default();
        let mut long = args(100.0, 10.0);
        long.duration = 1e30;
        let err = simulate(config, &long).unwrap_err();
        assert!(err.to_string().contains("limit"));

        long.duration = 1e6;
        long.fps = 1000;
        assert!(simulate(config, &long).is_err());
    }

    #[test]
    fn test_header_uses_effective_parameters() {
        let config = SpringConfig::new(-50.0, 10.0).with_mass(0.0);
        assert_eq!(
            header(&config),
            "# stiffness 100 damping 10 mass 1: ratio 0.500 (underdamped), 10.00 rad/s"
        );

        let critical = SpringConfig::new(100.0, 20.0);
        assert!(header(&critical).contains("critically damped"));
    }
}
