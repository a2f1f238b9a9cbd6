//! Configuration file management for stereobars.
//!
//! Every setting has a built-in default, so the config file is optional and may
//! override any subset of values.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    BAR_COUNT, BG_COLOR, FPS, FRAME_SIZE, LEFT_COLOR, RIGHT_COLOR, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::visualizer::Rgb;

/// Largest accepted canvas side, so bar geometry fits comfortably in `i32`.
pub const MAX_CANVAS_SIDE: u32 = u16::MAX as u32;

/// Canvas geometry and timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logical canvas width in pixels
    pub width: u32,
    /// Logical canvas height in pixels
    pub height: u32,
    /// Bars per channel
    pub bar_count: usize,
    /// Target ticks per second
    pub fps: u32,
    /// Samples per channel consumed each tick
    pub frame_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            bar_count: BAR_COUNT,
            fps: FPS,
            frame_size: FRAME_SIZE,
        }
    }
}

/// Colours as `[r, g, b]` triples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub background: Rgb,
    pub left: Rgb,
    pub right: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: BG_COLOR,
            left: LEFT_COLOR,
            right: RIGHT_COLOR,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisualizerConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

impl VisualizerConfig {
    /// Loads configuration, falling back to defaults.
    ///
    /// With an explicit `path` the file must exist. Without one the default
    /// location is tried and silently skipped when absent.
    ///
    /// # Errors
    /// - If an explicit config file is missing or unreadable
    /// - If the TOML is malformed
    /// - If a display value is zero
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => match get_config_path() {
                Some(default_path) if default_path.exists() => default_path,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config = Self::from_toml_str(&config_content)
            .with_context(|| format!("Invalid config file {}", config_path.display()))?;

        tracing::info!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: VisualizerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the display loop meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        let display = &self.display;
        let checks = [
            ("width", display.width as usize),
            ("height", display.height as usize),
            ("bar_count", display.bar_count),
            ("fps", display.fps as usize),
            ("frame_size", display.frame_size),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(anyhow!("display.{name} must be greater than 0"));
            }
        }

        for (name, value) in [("width", display.width), ("height", display.height)] {
            if value > MAX_CANVAS_SIDE {
                return Err(anyhow!(
                    "display.{name} must be at most {MAX_CANVAS_SIDE}, got {value}"
                ));
            }
        }

        Ok(())
    }
}

/// Default config file location, `~/.config/stereobars/stereobars.toml`.
///
/// Returns `None` when the home directory cannot be determined.
pub fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("stereobars")
            .join("stereobars.toml")
    })
}
