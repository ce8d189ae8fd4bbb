use parallax_core::motion::Interpolate;
use parallax_core::Rgba;
use ratatui::{layout::Rect, style::Style, Frame};

use crate::app::{App, GlowFrame};

/// Share of the accent a glow at full strength mixes into the background
const GLOW_MIX: f64 = 0.25;
const PULSE_MIX: f64 = 0.5;

/// A flickering section band: rows `top..bottom` tinted by `color`
#[derive(Debug, Clone, Copy, PartialEq)]
struct PulseBand {
    top: f64,
    bottom: f64,
    color: Rgba,
    amount: f64,
}

/// Background of the story area: ambient glows and pulsing sections
pub struct GlowWidget;

impl GlowWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let glows = app.glows();
        let height = area.height as f64;
        let bands: Vec<PulseBand> = app
            .section_frames()
            .iter()
            .filter(|f| f.pulse > 0.0 && f.opacity > 0.0)
            .map(|f| PulseBand {
                top: f.top,
                bottom: f.top + height,
                color: app
                    .story
                    .sections
                    .get(f.index)
                    .and_then(|s| s.accent)
                    .unwrap_or(theme.accent),
                amount: f.pulse * f.opacity,
            })
            .collect();

        let buf = frame.buffer_mut();
        for row in 0..area.height {
            for column in 0..area.width {
                let color = cell_color(
                    theme.background,
                    theme.accent,
                    &glows,
                    &bands,
                    column as f64,
                    row as f64,
                );
                buf[(area.x + column, area.y + row)]
                    .set_style(Style::default().bg(theme.color(color)));
            }
        }
    }
}

/// How much of a glow reaches the cell at `x`, `y`, from 1 at its center
/// to 0 at its radius
fn falloff(glow: &GlowFrame, x: f64, y: f64) -> f64 {
    if glow.radius <= 0.0 {
        return 0.0;
    }
    // Cells are about twice as tall as they are wide
    let dx = x - glow.x;
    let dy = (y - glow.y) * 2.0;
    let distance = (dx * dx + dy * dy).sqrt() / glow.radius;
    (1.0 - distance).max(0.0).powi(2)
}

fn cell_color(
    background: Rgba,
    accent: Rgba,
    glows: &[GlowFrame],
    bands: &[PulseBand],
    x: f64,
    y: f64,
) -> Rgba {
    let strength: f64 = glows.iter().map(|g| g.strength * falloff(g, x, y)).sum();
    let mut color = background.interpolate(&accent, (strength * GLOW_MIX).clamp(0.0, 1.0));
    for band in bands.iter().filter(|b| y >= b.top && y < b.bottom) {
        color = color.interpolate(&band.color, (band.amount * PULSE_MIX).clamp(0.0, 1.0));
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glow() -> GlowFrame {
        GlowFrame {
            x: 10.0,
            y: 5.0,
            radius: 8.0,
            strength: 1.0,
        }
    }

    #[test]
    fn test_falloff() {
        let glow = glow();
        assert_eq!(falloff(&glow, 10.0, 5.0), 1.0);
        assert_eq!(falloff(&glow, 14.0, 5.0), 0.25);
        // Two rows down is as far as four columns across
        assert_eq!(falloff(&glow, 10.0, 7.0), 0.25);
        assert_eq!(falloff(&glow, 30.0, 5.0), 0.0);
        assert_eq!(falloff(&GlowFrame { radius: 0.0, ..glow }, 10.0, 5.0), 0.0);
    }

    #[test]
    fn test_cell_color() {
        let black = Rgba::BLACK;
        let white = Rgba::WHITE;
        let red = Rgba::rgb(255, 0, 0);

        assert_eq!(cell_color(black, white, &[], &[], 0.0, 0.0), black);

        let lit = cell_color(black, white, &[glow()], &[], 10.0, 5.0);
        assert!(lit.r > 0 && lit.r == lit.g);

        let band = PulseBand {
            top: 2.0,
            bottom: 4.0,
            color: red,
            amount: 0.3,
        };
        let inside = cell_color(black, white, &[], &[band], 0.0, 3.0);
        assert!(inside.r > 0);
        assert_eq!((inside.g, inside.b), (0, 0));
        assert_eq!(cell_color(black, white, &[], &[band], 0.0, 4.0), black);
    }
}
