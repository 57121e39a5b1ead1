//! Per-colour hue overrides.
//!
//! Swatches are linked to the global hue delta by default. Unlinking a
//! swatch gives every occurrence of that colour its own rotation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::colour::ColourKey;

/// Whether a palette swatch follows the global hue delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwatchLink {
    Linked,
    /// Rotated by its own delta in degrees.
    Unlinked(f64),
}

/// Hue deltas keyed by colour, used instead of the global delta.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HueOverrides(HashMap<ColourKey, f64>);

impl HueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build overrides from swatch link states; linked swatches are omitted.
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = (ColourKey, SwatchLink)>,
    {
        links
            .into_iter()
            .filter_map(|(key, link)| match link {
                SwatchLink::Linked => None,
                SwatchLink::Unlinked(hue) => Some((key, hue)),
            })
            .collect()
    }

    /// Give `key` its own hue delta.
    pub fn unlink(&mut self, key: ColourKey, hue: f64) {
        self.0.insert(key, hue);
    }

    /// Return `key` to the global hue delta.
    pub fn relink(&mut self, key: ColourKey) -> Option<f64> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: ColourKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn link(&self, key: ColourKey) -> SwatchLink {
        self.get(key).map_or(SwatchLink::Linked, SwatchLink::Unlinked)
    }

    /// The override for `key`, or `global` when it has none.
    pub fn effective(&self, key: ColourKey, global: f64) -> f64 {
        self.get(key).unwrap_or(global)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColourKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(ColourKey, f64)> for HueOverrides {
    fn from_iter<I: IntoIterator<Item = (ColourKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
