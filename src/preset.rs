//! Recolour presets (retint.yaml).
//!
//! A preset stores a reusable apply request: global deltas, per-colour hue
//! overrides and the attribute/preserve options. Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colour::Adjustment;
use crate::engine::{ApplyOptions, ApplyRequest, HueOverrides};
use crate::error::{Result, RetintError};

/// Default preset file name looked up by the CLI.
pub const PRESET_FILE: &str = "retint.yaml";

/// Saved apply settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    /// Additive saturation delta, `[-1, 1]`.
    pub saturation: f64,

    /// Additive lightness delta, `[-1, 1]`.
    pub lightness: f64,

    /// Hue rotation in degrees.
    pub hue: f64,

    /// Per-colour hue rotations, keyed by `R,G,B,A` or `#RRGGBB[AA]`.
    pub overrides: HueOverrides,

    pub options: ApplyOptions,
}

impl Preset {
    /// Load a preset from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RetintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read preset: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `retint.yaml` from `dir` if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(PRESET_FILE);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse a preset from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let preset: Self = serde_yaml::from_str(content).map_err(|e| RetintError::Config {
            message: format!("Invalid preset: {}", e),
            help: Some("Check retint.yaml syntax".to_string()),
        })?;
        preset.validate()?;
        Ok(preset)
    }

    /// Reject deltas that cannot be applied.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("saturation", self.saturation),
            ("lightness", self.lightness),
            ("hue", self.hue),
        ] {
            if !value.is_finite() {
                return Err(RetintError::Config {
                    message: format!("{} must be a finite number", name),
                    help: None,
                });
            }
        }

        for (name, value) in [("saturation", self.saturation), ("lightness", self.lightness)] {
            if !(-1.0..=1.0).contains(&value) {
                return Err(RetintError::Config {
                    message: format!("{} must be between -1 and 1, got {}", name, value),
                    help: Some("Saturation and lightness are fractions; 0.2 means +20%".to_string()),
                });
            }
        }

        if let Some((key, _)) = self.overrides.iter().find(|(_, hue)| !hue.is_finite()) {
            return Err(RetintError::Config {
                message: format!("Override for {} must be a finite number", key),
                help: None,
            });
        }

        Ok(())
    }

    pub fn adjustment(&self) -> Adjustment {
        Adjustment::new(self.saturation, self.lightness, self.hue)
    }

    /// The apply request this preset describes.
    pub fn to_request(&self) -> ApplyRequest {
        ApplyRequest::new(self.adjustment(), self.options).with_overrides(self.overrides.clone())
    }
}
