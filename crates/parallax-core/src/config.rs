use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::motion::{Easing, Rgba, SpringConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Spring presets used when binding motion values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// General purpose smoothing
    #[serde(default)]
    pub spring: SpringConfig,
    /// Smoothing of scroll velocity before it drives skew and stretch
    #[serde(default = "default_velocity_spring")]
    pub velocity_spring: SpringConfig,
    /// Smoothing of pointer-following elements
    #[serde(default = "default_pointer_spring")]
    pub pointer_spring: SpringConfig,
    /// Snap springs and skip tweens
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            velocity_spring: default_velocity_spring(),
            pointer_spring: default_pointer_spring(),
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Scrolling behaviour
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Colors
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll position changes instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one scroll animation in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing of scroll animations
    #[serde(default = "default_scroll_easing")]
    pub easing: Easing,
    /// Lines per scroll step
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while anything is moving
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: default_scroll_easing(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_background")]
    pub background: Rgba,
    #[serde(default = "default_foreground")]
    pub foreground: Rgba,
    #[serde(default = "default_accent")]
    pub accent: Rgba,
    /// Secondary text
    #[serde(default = "default_muted")]
    pub muted: Rgba,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            accent: default_accent(),
            muted: default_muted(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parallax")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_velocity_spring() -> SpringConfig {
    SpringConfig::new(400.0, 50.0)
}

fn default_pointer_spring() -> SpringConfig {
    SpringConfig::new(200.0, 25.0)
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    150
}

fn default_scroll_easing() -> Easing {
    Easing::Cubic
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_background() -> Rgba {
    Rgba::rgb(0x05, 0x05, 0x05)
}

fn default_foreground() -> Rgba {
    Rgba::rgb(0xf4, 0xf4, 0xf5)
}

fn default_accent() -> Rgba {
    Rgba::rgb(0x3b, 0x82, 0xf6)
}

fn default_muted() -> Rgba {
    Rgba::rgb(0x71, 0x71, 0x7a)
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, defaults if it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Ok(config)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/parallax/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("parallax")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("parallax.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.ui.scroll.smooth_enabled);
        assert_eq!(config.ui.scroll.animation_duration_ms, 150);
        assert_eq!(config.ui.scroll.easing, Easing::Cubic);
        assert_eq!(config.ui.scroll.animation_fps, 60);
        assert_eq!(config.motion.velocity_spring, SpringConfig::new(400.0, 50.0));
        assert_eq!(config.motion.pointer_spring, SpringConfig::new(200.0, 25.0));
        assert!(!config.motion.reduced_motion);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [motion]
            reduced_motion = true

            [motion.pointer_spring]
            stiffness = 300.0

            [ui.scroll]
            easing = "ease-in-out"

            [ui.theme]
            accent = "#ff0000"
            "##,
        )
        .unwrap();

        assert!(config.motion.reduced_motion);
        assert_eq!(config.motion.pointer_spring.stiffness, 300.0);
        assert_eq!(config.motion.pointer_spring.damping, 10.0);
        assert_eq!(config.ui.scroll.easing, Easing::EaseInOut);
        assert_eq!(config.ui.scroll.animation_fps, 60);
        assert_eq!(config.ui.theme.accent, Rgba::rgb(255, 0, 0));
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_bezier_easing_from_toml() {
        let config: ScrollConfig = toml::from_str(
            r#"easing = { cubic-bezier = [0.16, 1.0, 0.3, 1.0] }"#,
        )
        .unwrap();
        assert_eq!(config.easing, Easing::CubicBezier([0.16, 1.0, 0.3, 1.0]));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result = toml::from_str::<ThemeConfig>(r##"accent = "#zz0000""##);
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.motion.spring, config.motion.spring);
        assert_eq!(parsed.ui.theme.background, config.ui.theme.background);
        assert_eq!(parsed.general.data_dir, config.general.data_dir);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = std::env::temp_dir().join(format!("parallax-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[motion\nreduced_motion = yes").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)), "{:?}", err);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("/tmp/parallax");
        assert_eq!(expand_tilde(&plain), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/data")), home.join("data"));
        }
    }
}
