//! Colour values used by items and configuration.
//!
//! Colours are serialised as `#RRGGBB` / `#RRGGBBAA` strings so item files
//! and config files stay hand-editable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimelineError;

/// An sRGB colour with straight (unmultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a new alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Result<Self, TimelineError> {
        let invalid = || TimelineError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Rgba {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ── Palette ──────────────────────────────────────────────────────────────────

pub const DEFAULT_PALETTE: [Rgba; 6] = [
    Rgba::rgb(0xf2, 0x4f, 0x4f), // red
    Rgba::rgb(0xff, 0xff, 0x32), // yellow
    Rgba::rgb(0xf7, 0x98, 0x25), // orange
    Rgba::rgb(0x7c, 0xf4, 0xe6), // aqua
    Rgba::rgb(0xff, 0xa4, 0x8e), // salmon
    Rgba::rgb(0xbf, 0x00, 0xff), // violet
];

/// Palette entry for an item index, cycling through the palette.
///
/// An empty palette falls back to [`DEFAULT_PALETTE`].
pub fn palette_color(index: usize, palette: &[Rgba]) -> Rgba {
    if palette.is_empty() {
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
    } else {
        palette[index % palette.len()]
    }
}

/// The explicit override if present, otherwise the palette colour.
pub fn item_color(explicit: Option<Rgba>, index: usize, palette: &[Rgba]) -> Rgba {
    explicit.unwrap_or_else(|| palette_color(index, palette))
}
