//! Colour values and colour-space utilities.
//!
//! - `Rgb` / `Rgba` - unit-float colour values as the scene stores them
//! - `model` - RGB <-> HSL conversion
//! - `key` - quantized colour identity and hex formatting
//! - `adjust` - the HSL-domain recolour function

pub mod adjust;
pub mod key;
pub mod model;

use serde::{Deserialize, Serialize};

pub use adjust::{adjust, Adjustment, PreserveOptions};
pub use key::{to_hex, ColourKey};
pub use model::{clamp, hsl_to_rgb, normalize_hue, rgb_to_hsl, Hsl};

/// An opaque colour with unit-float channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// A colour with unit-float channels and opacity.
///
/// Values are never mutated in place; every transform returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB channels.
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// The quantized identity of this colour.
    pub fn key(self) -> ColourKey {
        ColourKey::from_rgba(self)
    }

    /// `#RRGGBB`, alpha excluded.
    pub fn hex(self) -> String {
        to_hex(self.r, self.g, self.b)
    }

    /// Hue, saturation and lightness of the RGB channels.
    pub fn hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}
