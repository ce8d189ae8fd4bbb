use anyhow::{Context, Result};
use serde::Serialize;

use parallax_core::{Easing, Keyframes};

#[derive(Debug, Serialize, PartialEq)]
struct Sample {
    progress: f64,
    value: f64,
}

pub fn run(keyframes: &str, ease: Option<&str>, json: bool, progress: &[f64]) -> Result<()> {
    let samples = sample_all(keyframes, ease, progress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        println!("{:>10}  {:>12}", "progress", "value");
        for sample in &samples {
            println!("{:>10.4}  {:>12.4}", sample.progress, sample.value);
        }
    }

    Ok(())
}

fn sample_all(keyframes: &str, ease: Option<&str>, progress: &[f64]) -> Result<Vec<Sample>> {
    let mut keyframes: Keyframes = keyframes.parse().context("Invalid --keyframes")?;
    if let Some(ease) = ease {
        let easing: Easing = ease.parse().context("Invalid --ease")?;
        keyframes = keyframes.with_easing(easing);
    }
    tracing::debug!(points = keyframes.len(), "Sampling keyframes");

    Ok(progress
        .iter()
        .map(|&p| Sample {
            progress: p,
            value: keyframes.sample(p),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let samples = sample_all("0:0,0.5:1,1:0", None, &[-1.0, 0.25, 0.75, 2.0]).unwrap();
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_eased() {
        let samples = sample_all("0:0,1:1", Some("cubic"), &[0.5]).unwrap();
        assert!((samples[0].value - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input() {
        let err = sample_all("0:0,0.5", None, &[0.0]).unwrap_err();
        assert!(err.to_string().contains("--keyframes"));
        assert!(sample_all("1:0,0:1", None, &[0.0]).is_err());
        assert!(sample_all("0:0,1:1", Some("wobbly"), &[0.0]).is_err());
    }

    #[test]
    fn test_json_shape() {
        let samples = sample_all("0:10,1:20", None, &[0.5]).unwrap();
        let json = serde_json::to_value(&samples).unwrap();
        assert_eq!(json, serde_json::json!([{ "progress": 0.5, "value": 15.0 }]));
    }
}
