//! Color values for the document model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// An RGBA color with 8-bit channels.
///
/// Parses CSS-style hex strings (`#rrggbb`, `#rrggbbaa`) and a small set of
/// named colors; serializes back to the hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// An opaque color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Parse a CSS-style hex string or a named color.
    pub fn parse(s: &str) -> Result<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| -> Result<u8> {
                let digits = hex.get(range).ok_or_else(|| bad_color(s))?;
                u8::from_str_radix(digits, 16).map_err(|_| bad_color(s))
            };
            return match hex.len() {
                6 => Ok(Color {
                    r: channel(0..2)?,
                    g: channel(2..4)?,
                    b: channel(4..6)?,
                    a: 255,
                }),
                8 => Ok(Color {
                    r: channel(0..2)?,
                    g: channel(2..4)?,
                    b: channel(4..6)?,
                    a: channel(6..8)?,
                }),
                _ => Err(bad_color(s)),
            };
        }
        match s {
            "white" => Ok(Color::WHITE),
            "black" => Ok(Color::BLACK),
            "red" => Ok(Color::rgb(0xff, 0x00, 0x00)),
            "green" => Ok(Color::rgb(0x00, 0x80, 0x00)),
            "lime" => Ok(Color::rgb(0x00, 0xff, 0x00)),
            "blue" => Ok(Color::rgb(0x00, 0x00, 0xff)),
            "yellow" => Ok(Color::rgb(0xff, 0xff, 0x00)),
            "cyan" => Ok(Color::rgb(0x00, 0xff, 0xff)),
            "magenta" => Ok(Color::rgb(0xff, 0x00, 0xff)),
            "gray" | "grey" => Ok(Color::rgb(0x80, 0x80, 0x80)),
            _ => Err(bad_color(s)),
        }
    }

    /// RGBA byte order, matching the raster buffer layout.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS functional form used in SVG `fill`/`stroke` attributes.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Hex form used in the JSON model.
    pub fn hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha channel as a unit-interval opacity.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

fn bad_color(s: &str) -> Error {
    Error::InvalidArgument(format!("unrecognized color: {s}"))
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}
