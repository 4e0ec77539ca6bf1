// User configuration loaded from ~/.config/photopoet/config.toml.
// Falls back to sensible defaults when the file or any field is missing.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, deserialized from `~/.config/photopoet/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Target TUI refresh rate in frames per second (default: 30).
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Color theme name: "dark" or "light".
    #[serde(default = "default_theme")]
    pub theme: String,
    /// How long a notice stays on screen.
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// URL of the poem generation flow.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token; `PHOTOPOET_API_KEY` is used when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Wrap requests as `{"data": …}` like Genkit flow servers expect.
    #[serde(default = "default_envelope")]
    pub envelope: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    #[serde(default = "default_share_title")]
    pub title: String,
    /// Ask "copy or share?" before sharing. When false, `s` shares directly.
    #[serde(default = "default_confirm")]
    pub confirm: bool,
    /// Share command argv. Empty means auto-detect.
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub format: ShareFormat,
}

/// What a share command receives on stdin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareFormat {
    /// The poem text only.
    #[default]
    Text,
    /// `{"title", "text", "url"}` as JSON.
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    /// Copy command argv. Empty means auto-detect.
    #[serde(default)]
    pub command: Vec<String>,
}

fn default_frame_rate() -> f64 {
    30.0
}

fn default_theme() -> String {
    crate::theme::THEME_DARK.to_string()
}

fn default_notice_secs() -> u64 {
    5
}

fn default_endpoint() -> String {
    "http://127.0.0.1:3400/generatePoem".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_envelope() -> bool {
    true
}

fn default_share_title() -> String {
    "Photo Poet".to_string()
}

fn default_confirm() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            theme: default_theme(),
            notice_secs: default_notice_secs(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            envelope: default_envelope(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: default_share_title(),
            confirm: default_confirm(),
            command: Vec::new(),
            format: ShareFormat::default(),
        }
    }
}

impl Config {
    /// Read config from the default location, or return defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("photopoet")
            .join("config.toml")
    }
}
