//! Stories: the scrollable content a host animates
//!
//! A story is an ordered list of sections. Each section becomes one
//! viewport-tall region whose appearance is bound to its scroll progress.
//!
//! Story files are TOML:
//!
//! ```toml
//! title = "Portfolio"
//!
//! [[sections]]
//! id = "hero"
//! title = "Visual ideas, fast interfaces"
//! body = ["First line", "Second line"]
//! accent = "#3b82f6"
//! pulse = false
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use parallax_core::Rgba;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default = "default_title")]
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    /// Title color; the theme accent when absent
    #[serde(default)]
    pub accent: Option<Rgba>,
    /// Flicker the section's background while it is on screen
    #[serde(default)]
    pub pulse: bool,
}

fn default_title() -> String {
    "Parallax".to_string()
}

impl Section {
    fn new(id: &str, title: &str, body: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.iter().map(|line| line.to_string()).collect(),
            accent: None,
            pulse: false,
        }
    }

    fn pulsing(mut self) -> Self {
        self.pulse = true;
        self
    }

    fn with_accent(mut self, accent: Rgba) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Lines that reveal one after another: the title, then each body line
    pub fn reveal_lines(&self) -> usize {
        1 + self.body.len()
    }

    /// Number of rows the section's text occupies
    pub fn text_height(&self) -> usize {
        if self.body.is_empty() {
            1
        } else {
            self.body.len() + 2
        }
    }
}

impl Story {
    /// Load a story from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read story {}", path.display()))?;
        let story = Self::parse(&content)
            .with_context(|| format!("Invalid story {}", path.display()))?;
        tracing::info!(path = %path.display(), sections = story.sections.len(), "Loaded story");
        Ok(story)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let story: Story = toml::from_str(content)?;
        if story.sections.is_empty() {
            bail!("A story needs at least one section");
        }
        Ok(story)
    }

    /// The story shown when no file is given
    pub fn builtin() -> Self {
        Self {
            title: "Parallax".to_string(),
            sections: vec![
                Section::new(
                    "hero",
                    "Turning visual ideas into fast interfaces",
                    &[
                        "Dashboards and web apps with clean logic,",
                        "strong performance and a polished feel.",
                        "",
                        "Scroll with j/k, the mouse wheel or space.",
                    ],
                ),
                Section::new(
                    "problem",
                    "Most interfaces feel static",
                    &[
                        "Content appears all at once and nothing",
                        "responds to how fast you move through it.",
                    ],
                )
                .with_accent(Rgba::rgb(0xef, 0x44, 0x44))
                .pulsing(),
                Section::new(
                    "bridge",
                    "Motion as a function of position",
                    &[
                        "Every property here is a keyframe mapping",
                        "of how far its section has travelled",
                        "through the screen.",
                    ],
                ),
                Section::new(
                    "methodology",
                    "Visual to code, logic and state, performance",
                    &[
                        "Design details survive the trip to the terminal.",
                        "State stays predictable as the story grows.",
                        "Nothing waits on anything; every frame is cheap.",
                    ],
                ),
                Section::new(
                    "projects",
                    "Selected work",
                    &[
                        "01  Publishing dashboards: logistics for 80,000 students",
                        "02  Motion strategy: animated identities for brands",
                        "03  Digital assets: accessible international branding",
                    ],
                )
                .with_accent(Rgba::rgb(0xa8, 0x55, 0xf7)),
                Section::new(
                    "about",
                    "Designer-minded fullstack developer",
                    &[
                        "Frontend developer and coordinator, 2022 to now.",
                        "Motion graphic designer before that.",
                    ],
                ),
                Section::new(
                    "contact",
                    "Let's build something that moves",
                    &["Press q to leave."],
                )
                .with_accent(Rgba::rgb(0x22, 0xc5, 0x5e)),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
