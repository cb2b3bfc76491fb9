//! Session settings
//!
//! Read from an optional JSON file; anything missing keeps its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Appearance, Color, FLASH_FRAMES, ValueRange};
use crate::world::Spawner;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Explicit window size; the desktop size is used when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bodies spawned at start
    pub count: usize,
    pub radius: ValueRange,
    pub speed: ValueRange,

    // === Appearance ===
    pub flash_frames: u32,
    pub line_width: f64,
    pub font_size: u32,
    pub background: Color,
    pub flash_color: Color,
    pub label_color: Color,
    /// Font file for the labels; common system fonts are tried otherwise
    pub font: Option<PathBuf>,

    // === Window ===
    pub window: Option<WindowSize>,
    /// Pace frames to the display refresh
    pub vsync: bool,
    pub frame_limit: Option<u32>,

    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let appearance = Appearance::default();
        let spawner = Spawner::default();

        Self {
            count: 10,
            radius: spawner.radius,
            speed: spawner.speed,

            flash_frames: FLASH_FRAMES,
            line_width: appearance.line_width,
            font_size: appearance.font_size,
            background: Color::PALE_YELLOW,
            flash_color: appearance.flash_color,
            label_color: appearance.label_color,
            font: None,

            window: None,
            vsync: true,
            frame_limit: None,

            seed: None,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;

        let settings = Self::from_json(&json)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if !(self.radius.min > 0.0) {
            return invalid(format!("radius.min must be positive, got {}", self.radius.min));
        }
        if self.radius.is_empty() {
            return invalid(format!(
                "radius range [{}, {}) is empty",
                self.radius.min, self.radius.max
            ));
        }
        if !(self.speed.min >= 0.0) {
            return invalid(format!("speed.min must not be negative, got {}", self.speed.min));
        }
        if self.speed.is_empty() {
            return invalid(format!(
                "speed range [{}, {}) is empty",
                self.speed.min, self.speed.max
            ));
        }
        if !(self.line_width > 0.0) {
            return invalid(format!("line_width must be positive, got {}", self.line_width));
        }
        if self.font_size == 0 {
            return invalid("font_size must be positive".into());
        }
        if let Some(WindowSize { width, height }) = self.window {
            if width == 0 || height == 0 {
                return invalid(format!("window size {width}x{height} has a zero dimension"));
            }
        }

        Ok(())
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            flash_color: self.flash_color,
            label_color: self.label_color,
            flash_frames: self.flash_frames,
            line_width: self.line_width,
            font_size: self.font_size,
        }
    }

    pub fn spawner(&self) -> Spawner {
        Spawner {
            radius: self.radius,
            speed: self.speed,
        }
    }
}
