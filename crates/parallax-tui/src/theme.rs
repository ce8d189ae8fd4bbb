use parallax_core::motion::Interpolate;
use parallax_core::{Rgba, ThemeConfig};
use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub foreground: Rgba,
    pub accent: Rgba,
    pub muted: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            background: config.background,
            foreground: config.foreground,
            accent: config.accent,
            muted: config.muted,
        }
    }

    pub fn bg(&self) -> Color {
        self.color(self.background)
    }

    pub fn fg(&self) -> Color {
        self.color(self.foreground)
    }

    pub fn accent(&self) -> Color {
        self.color(self.accent)
    }

    pub fn muted(&self) -> Color {
        self.color(self.muted)
    }

    /// Terminal color for `color`, composited over the background
    pub fn color(&self, color: Rgba) -> Color {
        to_color(color.over(self.background))
    }

    /// `color` faded towards the background; opacity 0 is invisible
    pub fn fade(&self, color: Rgba, opacity: f64) -> Color {
        to_color(self.background.interpolate(&color, opacity.clamp(0.0, 1.0)))
    }
}

pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
