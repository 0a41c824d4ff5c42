//! RGBA colours.
//!
//! Colours arrive either as CSS strings (`#9edb9e`, `darkred`,
//! `rgba(255,255,0,0.1)`, `transparent`) or as Esri JSON arrays
//! `[r, g, b, a]` with alpha in `0..=255`. Both forms parse into the same
//! [`Color`], which serializes back to the array form.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error parsing a colour string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}'")]
pub struct ColorParseError(pub String);

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` hex form, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "transparent" => Self::TRANSPARENT,
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "darkred" => Self::DARK_RED,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "darkorange" => Self::rgb(255, 140, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "magenta" => Self::rgb(255, 0, 255),
            "cyan" => Self::rgb(0, 255, 255),
            _ => return None,
        };
        Some(color)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    fn parse_functional(s: &str) -> Option<Self> {
        static RGBA: OnceLock<Regex> = OnceLock::new();
        let re = RGBA.get_or_init(|| {
            Regex::new(
                r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
            )
            .expect("valid colour regex")
        });
        let caps = re.captures(s)?;
        let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
        let alpha = match caps.get(4) {
            Some(m) => {
                let a: f64 = m.as_str().parse().ok()?;
                if !(0.0..=1.0).contains(&a) {
                    return None;
                }
                (a * 255.0).round() as u8
            }
            None => 255,
        };
        Some(Self::rgba(channel(1)?, channel(2)?, channel(3)?, alpha))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let parsed = if let Some(hex) = normalized.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if normalized.starts_with("rgb") {
            Self::parse_functional(&normalized)
        } else {
            Self::named(&normalized)
        };
        parsed.ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, self.opacity())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.r, self.g, self.b, self.a].serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Channels(Vec<u8>),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            ColorRepr::Channels(c) => match c.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(format!(
                    "expected 3 or 4 colour channels, got {}",
                    c.len()
                ))),
            },
        }
    }
}
