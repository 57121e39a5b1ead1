//! Quantized colour identity.
//!
//! Every channel is rounded to 8 bits, so two colours that differ only by
//! sub-1/255 float noise share a key. Keys drive palette dedup and hue
//! override lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Rgba;
use crate::error::{Result, RetintError};

/// Canonical 8-bit RGBA identity of a colour, displayed as `"R,G,B,A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ColourKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColourKey {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantize unit-float channels.
    pub fn from_channels(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(quantize(r), quantize(g), quantize(b), quantize(a))
    }

    pub fn from_rgba(c: Rgba) -> Self {
        Self::from_channels(c.r, c.g, c.b, c.a)
    }

    /// Parse `"R,G,B,A"`, `"R,G,B"`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// Missing alpha means fully opaque.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains(',') {
            parse_components(s)
        } else {
            parse_hex(s)
        }
    }

    /// `#RRGGBB` for the RGB part of this key.
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for ColourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for ColourKey {
    type Err = RetintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<ColourKey> for String {
    fn from(key: ColourKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ColourKey {
    type Error = RetintError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

/// Format unit-float RGB as uppercase `#RRGGBB`.
pub fn to_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02X}{:02X}{:02X}", quantize(r), quantize(g), quantize(b))
}

/// Scale a unit float to 0-255, rounding to nearest. Out-of-range input saturates.
fn quantize(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn parse_components(s: &str) -> Result<ColourKey> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(RetintError::Parse {
            message: format!("Invalid colour key: {}", s),
            help: Some("Use R,G,B,A with 0-255 components".to_string()),
        });
    }

    let mut channels = [255u8; 4];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| RetintError::Parse {
            message: format!("Invalid colour key component '{}' in {}", part, s),
            help: Some("Components must be integers between 0 and 255".to_string()),
        })?;
    }

    let [r, g, b, a] = channels;
    Ok(ColourKey::new(r, g, b, a))
}

fn parse_hex(s: &str) -> Result<ColourKey> {
    use palette::Srgb;

    let hex = s.strip_prefix('#').unwrap_or(s);
    let (rgb_part, alpha_part) = match hex.len() {
        6 => (hex, None),
        8 if hex.is_char_boundary(6) => (&hex[..6], Some(&hex[6..])),
        _ => {
            return Err(RetintError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RRGGBB or #RRGGBBAA format".to_string()),
            })
        }
    };

    let rgb: Srgb<u8> = rgb_part.parse().map_err(|_| RetintError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: None,
    })?;

    let a = match alpha_part {
        Some(a) => u8::from_str_radix(a, 16).map_err(|_| RetintError::Parse {
            message: format!("Invalid hex alpha: {}", a),
            help: None,
        })?,
        None => 255,
    };

    Ok(ColourKey::new(rgb.red, rgb.green, rgb.blue, a))
}
