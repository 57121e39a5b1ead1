//! HSL-domain recolouring.
//!
//! A pure function of `(colour, deltas, preserve policy)`. Hue, saturation
//! and lightness are always derived from the colour passed in, so applying
//! a zero adjustment is a no-op and repeated calls never accumulate state.

use serde::{Deserialize, Serialize};

use super::model::{clamp, hsl_to_rgb, normalize_hue, rgb_to_hsl, Hsl};
use super::Rgba;

/// Lightness above which `keep_white` preserves a colour.
pub const WHITE_LIGHTNESS: f64 = 0.98;
/// Lightness below which `keep_black` preserves a colour.
pub const BLACK_LIGHTNESS: f64 = 0.02;
/// Saturation below which `keep_gray` preserves a colour.
pub const GRAY_SATURATION: f64 = 0.03;
/// Saturation below which a colour has no meaningful hue.
pub const ACHROMATIC_SATURATION: f64 = 0.01;
/// A saturation delta at or below this forces full desaturation.
pub const FULL_DESATURATE: f64 = -0.99;

/// Which near-achromatic extremes are exempt from recolouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreserveOptions {
    #[serde(alias = "keep_white")]
    pub keep_white: bool,
    #[serde(alias = "keep_black")]
    pub keep_black: bool,
    #[serde(alias = "keep_gray")]
    pub keep_gray: bool,
}

impl PreserveOptions {
    /// First matching rule wins: white, then black, then gray.
    pub fn keeps(&self, hsl: Hsl) -> bool {
        (self.keep_white && hsl.l > WHITE_LIGHTNESS)
            || (self.keep_black && hsl.l < BLACK_LIGHTNESS)
            || (self.keep_gray && hsl.s < GRAY_SATURATION)
    }
}

/// A global recolour request.
///
/// Saturation and lightness deltas are additive in `[-1, 1]`; hue is a
/// rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustment {
    pub saturation: f64,
    pub lightness: f64,
    pub hue: f64,
}

impl Adjustment {
    pub const fn new(saturation: f64, lightness: f64, hue: f64) -> Self {
        Self {
            saturation,
            lightness,
            hue,
        }
    }

    /// The same adjustment with a different hue rotation.
    pub const fn with_hue(self, hue: f64) -> Self {
        Self { hue, ..self }
    }

    /// True when every delta is zero.
    pub fn is_identity(&self) -> bool {
        self.saturation == 0.0 && self.lightness == 0.0 && self.hue == 0.0
    }

    /// Recolour one colour.
    pub fn apply(&self, colour: Rgba, preserve: &PreserveOptions) -> Rgba {
        adjust(colour, self.saturation, self.lightness, self.hue, preserve)
    }
}

/// Rotate, saturate and lighten `colour` unless the preserve policy keeps it.
///
/// Preserved colours are returned unchanged. Alpha always passes through.
pub fn adjust(
    colour: Rgba,
    sat_delta: f64,
    light_delta: f64,
    hue_delta: f64,
    preserve: &PreserveOptions,
) -> Rgba {
    let hsl = rgb_to_hsl(colour.r, colour.g, colour.b);

    if preserve.keeps(hsl) {
        return colour;
    }

    let h = normalize_hue(hsl.h + hue_delta);

    // Rotating an undefined hue by zero must not invent chroma
    let achromatic = hsl.s < ACHROMATIC_SATURATION;
    let mut s = if achromatic && hue_delta == 0.0 {
        hsl.s
    } else {
        clamp(hsl.s + sat_delta, 0.0, 1.0)
    };
    if sat_delta <= FULL_DESATURATE {
        s = 0.0;
    }

    let l = clamp(hsl.l + light_delta, 0.0, 1.0);

    let (r, g, b) = hsl_to_rgb(h, s, l);
    Rgba::new(
        clamp(r, 0.0, 1.0),
        clamp(g, 0.0, 1.0),
        clamp(b, 0.0, 1.0),
        colour.a,
    )
}
