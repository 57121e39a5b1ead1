//! RGB <-> HSL conversion.
//!
//! All channels are unit floats. Hue is in degrees. The conversions run
//! through `palette`; this module pins the conventions the engines rely
//! on: achromatic colours report hue 0 and hue is always in `[0, 360)`.

use palette::encoding::Srgb as SrgbStandard;

type PaletteHsl = palette::Hsl<SrgbStandard, f64>;

/// A colour in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

/// Two-sided clamp.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Convert unit RGB to HSL.
///
/// Achromatic input (`max == min`) reports hue 0 and saturation 0.
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    use palette::{IntoColor, Srgb};

    let hsl: PaletteHsl = Srgb::new(r, g, b).into_color();

    if hsl.saturation == 0.0 {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: hsl.lightness,
        };
    }

    Hsl {
        h: normalize_hue(hsl.hue.into_degrees()),
        s: hsl.saturation,
        l: hsl.lightness,
    }
}

/// Convert HSL back to unit RGB.
///
/// `h` may lie outside `[0, 360)`; it is wrapped first. Zero saturation
/// yields the exact gray `(l, l, l)`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    use palette::{IntoColor, Srgb};

    if s == 0.0 {
        return (l, l, l);
    }

    let rgb: Srgb<f64> = PaletteHsl::new(normalize_hue(h), s, l).into_color();
    (rgb.red, rgb.green, rgb.blue)
}

/// Wrap a hue in degrees into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h % 360.0;
    if wrapped < 0.0 {
        // -1e-14 % 360 + 360 rounds to exactly 360.0
        let shifted = wrapped + 360.0;
        if shifted >= 360.0 {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}
