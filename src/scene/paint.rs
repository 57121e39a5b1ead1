//! Paint and effect variants.
//!
//! Sum types tagged by `type` on the wire. Properties the engine does not
//! interpret (blend modes, transforms, offsets) are kept in `extra`, and
//! kinds it does not know are kept whole in `Other`, so a document
//! survives a load/save round trip.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::colour::{Rgb, Rgba};

fn visible_default() -> bool {
    true
}

const PAINT_KINDS: &[&str] = &[
    "SOLID",
    "GRADIENT_LINEAR",
    "GRADIENT_RADIAL",
    "GRADIENT_ANGULAR",
    "GRADIENT_DIAMOND",
    "IMAGE",
];

const EFFECT_KINDS: &[&str] = &["DROP_SHADOW", "INNER_SHADOW", "LAYER_BLUR", "BACKGROUND_BLUR"];

fn has_kind(raw: &Map<String, Value>, kinds: &[&str]) -> bool {
    raw.get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kinds.contains(&kind))
}

fn raw_visible(raw: &Map<String, Value>) -> bool {
    raw.get("visible").and_then(Value::as_bool).unwrap_or(true)
}

/// A fill or stroke entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    /// Carries no colour of its own; passed through untouched.
    Image(ImagePaint),
    /// A kind the engine does not read (e.g. `PATTERN`, `VIDEO`), kept verbatim.
    #[serde(skip)]
    Other(Map<String, Value>),
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Paint::Other(raw) => raw.serialize(serializer),
            known => Paint::serialize(known, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        if has_kind(&raw, PAINT_KINDS) {
            Paint::deserialize(Value::Object(raw)).map_err(de::Error::custom)
        } else {
            Ok(Paint::Other(raw))
        }
    }
}

impl Paint {
    /// Solid paint with the given colour, fully opaque and visible.
    pub fn solid(color: Rgb) -> Self {
        Paint::Solid(SolidPaint {
            color,
            opacity: None,
            visible: true,
            extra: Map::new(),
        })
    }

    /// Linear gradient through the given stops, evenly spaced.
    pub fn linear_gradient(colors: &[Rgba]) -> Self {
        Paint::GradientLinear(GradientPaint::evenly_spaced(colors))
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid(p) => p.visible,
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => g.visible,
            Paint::Image(p) => p.visible,
            Paint::Other(raw) => raw_visible(raw),
        }
    }

    pub fn gradient(&self) -> Option<&GradientPaint> {
        match self {
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => Some(g),
            Paint::Solid(_) | Paint::Image(_) | Paint::Other(_) => None,
        }
    }

    /// Copy of this paint with its visibility changed.
    pub fn with_visible(mut self, visible: bool) -> Self {
        match &mut self {
            Paint::Solid(p) => p.visible = visible,
            Paint::GradientLinear(g)
            | Paint::GradientRadial(g)
            | Paint::GradientAngular(g)
            | Paint::GradientDiamond(g) => g.visible = visible,
            Paint::Image(p) => p.visible = visible,
            Paint::Other(raw) => {
                raw.insert("visible".to_string(), Value::Bool(visible));
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidPaint {
    pub color: Rgb,
    /// Paint opacity; absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SolidPaint {
    /// Colour with the paint opacity folded in as alpha.
    pub fn rgba(&self) -> Rgba {
        self.color.with_alpha(self.opacity.unwrap_or(1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<GradientStop>,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GradientPaint {
    pub fn evenly_spaced(colors: &[Rgba]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let gradient_stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| GradientStop {
                position: i as f64 / last,
                color,
            })
            .collect();

        Self {
            gradient_stops,
            visible: true,
            extra: Map::new(),
        }
    }
}

/// One colour sample along a gradient; alpha is embedded in the colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    #[serde(default)]
    pub position: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePaint {
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A non-paint visual attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    /// Colourless; ignored by scan and apply.
    LayerBlur(BlurEffect),
    /// Colourless; ignored by scan and apply.
    BackgroundBlur(BlurEffect),
    /// Any other kind, kept verbatim and ignored.
    #[serde(skip)]
    Other(Map<String, Value>),
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Effect::Other(raw) => raw.serialize(serializer),
            known => Effect::serialize(known, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        if has_kind(&raw, EFFECT_KINDS) {
            Effect::deserialize(Value::Object(raw)).map_err(de::Error::custom)
        } else {
            Ok(Effect::Other(raw))
        }
    }
}

impl Effect {
    pub fn drop_shadow(color: Rgba) -> Self {
        Effect::DropShadow(ShadowEffect::new(color))
    }

    pub fn inner_shadow(color: Rgba) -> Self {
        Effect::InnerShadow(ShadowEffect::new(color))
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Effect::DropShadow(s) | Effect::InnerShadow(s) => s.visible,
            Effect::LayerBlur(b) | Effect::BackgroundBlur(b) => b.visible,
            Effect::Other(raw) => raw_visible(raw),
        }
    }

    pub fn shadow(&self) -> Option<&ShadowEffect> {
        match self {
            Effect::DropShadow(s) | Effect::InnerShadow(s) => Some(s),
            Effect::LayerBlur(_) | Effect::BackgroundBlur(_) | Effect::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowEffect {
    pub color: Rgba,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShadowEffect {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            visible: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlurEffect {
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
