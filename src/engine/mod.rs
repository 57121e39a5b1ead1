//! Scan and apply engines.
//!
//! Both walk the first selected node once. Per-node failures are counted
//! and logged, never propagated: every call returns metrics describing
//! what happened, even when everything was skipped or failed.

mod apply;
mod overrides;
mod scan;

use serde::{Deserialize, Serialize};

use crate::colour::PreserveOptions;
use crate::scene::PaintSlot;

pub use apply::{apply, ApplyRequest, Progress, PROGRESS_INTERVAL};
pub use overrides::{HueOverrides, SwatchLink};
pub use scan::{scan, PaletteBuilder, PaletteEntry, ScanResult};

/// Counters for one scan or apply call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Every node the walk touched, colour-bearing or not.
    pub visited_nodes: usize,
    /// Attribute reads abandoned because the attribute was mixed.
    pub skipped: usize,
    /// Nodes whose processing raised an error.
    pub failed: usize,
    /// Paints whose colour changed (apply only).
    #[serde(default)]
    pub modified_paints: usize,
    /// Effects whose colour changed (apply only).
    #[serde(default)]
    pub modified_effects: usize,
}

/// Which attribute kind produced a palette colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColourSource {
    Fill,
    Stroke,
    GradientStop,
    Shadow,
}

impl ColourSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ColourSource::Fill => "fill",
            ColourSource::Stroke => "stroke",
            ColourSource::GradientStop => "gradient-stop",
            ColourSource::Shadow => "shadow",
        }
    }
}

fn enabled() -> bool {
    true
}

/// Attribute classes a scan inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    #[serde(default = "enabled", alias = "include_fills")]
    pub include_fills: bool,
    #[serde(default = "enabled", alias = "include_strokes")]
    pub include_strokes: bool,
    #[serde(default = "enabled", alias = "include_effects")]
    pub include_effects: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_fills: true,
            include_strokes: true,
            include_effects: true,
        }
    }
}

impl ScanOptions {
    pub fn includes(&self, slot: PaintSlot) -> bool {
        match slot {
            PaintSlot::Fills => self.include_fills,
            PaintSlot::Strokes => self.include_strokes,
        }
    }
}

/// Attribute classes an apply rewrites, plus the preserve policy.
///
/// `include_effects` decides whether effects are inspected at all; the
/// per-kind shadow flags then gate each kind and count as enabled when
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOptions {
    #[serde(default = "enabled", alias = "include_fills")]
    pub include_fills: bool,
    #[serde(default = "enabled", alias = "include_strokes")]
    pub include_strokes: bool,
    #[serde(default = "enabled", alias = "include_effects")]
    pub include_effects: bool,
    #[serde(default, alias = "include_inner_shadows", skip_serializing_if = "Option::is_none")]
    pub include_inner_shadows: Option<bool>,
    #[serde(default, alias = "include_drop_shadows", skip_serializing_if = "Option::is_none")]
    pub include_drop_shadows: Option<bool>,
    #[serde(flatten)]
    pub preserve: PreserveOptions,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            include_fills: true,
            include_strokes: true,
            include_effects: true,
            include_inner_shadows: None,
            include_drop_shadows: None,
            preserve: PreserveOptions::default(),
        }
    }
}

impl ApplyOptions {
    pub fn includes(&self, slot: PaintSlot) -> bool {
        match slot {
            PaintSlot::Fills => self.include_fills,
            PaintSlot::Strokes => self.include_strokes,
        }
    }

    pub fn includes_inner_shadows(&self) -> bool {
        self.include_inner_shadows != Some(false)
    }

    pub fn includes_drop_shadows(&self) -> bool {
        self.include_drop_shadows != Some(false)
    }

    /// The scan that sees the same attribute classes.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_fills: self.include_fills,
            include_strokes: self.include_strokes,
            include_effects: self.include_effects,
        }
    }
}
