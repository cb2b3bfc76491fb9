use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Frames a body keeps its flash colour after a resolved collision.
pub const FLASH_FRAMES: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PALE_YELLOW: Color = Color::rgb(255, 255, 136);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Accepts `#rgb` and `#rrggbb`, case-insensitive.
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("colour {s:?} must start with '#'"))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("colour {s:?} is not hexadecimal"));
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|e| e.to_string());

        match hex.len() {
            3 => {
                // #f80 == #ff8800
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(format!("colour {s:?} must have 3 or 6 hex digits")),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The viewport every body must stay fully inside. Fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Half-open `[min, max)` sampling interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }

    pub fn is_empty(&self) -> bool {
        !(self.min < self.max)
    }
}

/// How bodies are drawn and how long a collision flash lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub flash_color: Color,
    pub label_color: Color,
    pub flash_frames: u32,
    pub line_width: f64,
    pub font_size: u32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            flash_color: Color::BLUE,
            label_color: Color::BLACK,
            flash_frames: FLASH_FRAMES,
            line_width: 2.0,
            font_size: 20,
        }
    }
}
