//! Palette extraction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ColourSource, Metrics, ScanOptions};
use crate::colour::{ColourKey, Rgba};
use crate::error::NodeError;
use crate::scene::{traverse, Attr, Effect, Paint, PaintSlot, SceneNode};

/// One deduplicated colour of the scanned subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub key: ColourKey,
    /// The first occurrence seen.
    pub rgba: Rgba,
    /// `#RRGGBB`, alpha excluded.
    pub hex: String,
    /// Occurrences folded into this entry.
    pub count: usize,
    /// Attribute kinds that produced this colour, first-seen order.
    pub sources: Vec<ColourSource>,
}

/// Palette and metrics of one scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub palette: Vec<PaletteEntry>,
    pub metrics: Metrics,
}

/// Folds colour occurrences into palette entries keyed by `ColourKey`.
#[derive(Debug, Clone, Default)]
pub struct PaletteBuilder {
    entries: Vec<PaletteEntry>,
    index: HashMap<ColourKey, usize>,
}

impl PaletteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `colour` from `source`.
    pub fn add(&mut self, colour: Rgba, source: ColourSource) {
        let key = colour.key();
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.entries.push(PaletteEntry {
                key,
                rgba: colour,
                hex: colour.hex(),
                count: 0,
                sources: Vec::new(),
            });
            self.entries.len() - 1
        });

        let entry = &mut self.entries[slot];
        entry.count += 1;
        if !entry.sources.contains(&source) {
            entry.sources.push(source);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn build(mut self) -> Vec<PaletteEntry> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries
    }
}

/// Collect every colour used by the first selected node's subtree.
///
/// An empty selection yields an empty palette without walking anything.
pub fn scan<N: SceneNode>(selection: &[N], options: &ScanOptions) -> ScanResult {
    let mut metrics = Metrics::default();
    let Some(root) = selection.first() else {
        return ScanResult::default();
    };

    let mut palette = PaletteBuilder::new();
    traverse(root, |node| {
        metrics.visited_nodes += 1;
        if let Err(err) = scan_node(node, options, &mut palette, &mut metrics) {
            metrics.failed += 1;
            tracing::warn!(node = node.name(), error = %err, "scan failed on node");
        }
    });

    tracing::debug!(
        visited = metrics.visited_nodes,
        colours = palette.len(),
        skipped = metrics.skipped,
        failed = metrics.failed,
        "scan complete"
    );

    ScanResult {
        palette: palette.build(),
        metrics,
    }
}

fn scan_node<N: SceneNode>(
    node: &N,
    options: &ScanOptions,
    palette: &mut PaletteBuilder,
    metrics: &mut Metrics,
) -> Result<(), NodeError> {
    for slot in PaintSlot::ALL {
        if !options.includes(slot) {
            continue;
        }
        match node.paints(slot)? {
            Attr::Absent => {}
            Attr::Mixed => metrics.skipped += 1,
            Attr::Concrete(paints) => {
                for paint in paints.iter().filter(|p| p.is_visible()) {
                    scan_paint(paint, slot, palette);
                }
            }
        }
    }

    if options.include_effects {
        match node.effects()? {
            Attr::Absent => {}
            Attr::Mixed => metrics.skipped += 1,
            Attr::Concrete(effects) => {
                for effect in effects.iter().filter(|e| e.is_visible()) {
                    match effect {
                        Effect::DropShadow(shadow) | Effect::InnerShadow(shadow) => {
                            palette.add(shadow.color, ColourSource::Shadow);
                        }
                        Effect::LayerBlur(_) | Effect::BackgroundBlur(_) | Effect::Other(_) => {}
                    }
                }
            }
        }
    }

    Ok(())
}

fn scan_paint(paint: &Paint, slot: PaintSlot, palette: &mut PaletteBuilder) {
    match paint {
        Paint::Solid(solid) => palette.add(solid.rgba(), slot.solid_source()),
        Paint::GradientLinear(gradient)
        | Paint::GradientRadial(gradient)
        | Paint::GradientAngular(gradient)
        | Paint::GradientDiamond(gradient) => {
            for stop in &gradient.gradient_stops {
                palette.add(stop.color, ColourSource::GradientStop);
            }
        }
        Paint::Image(_) | Paint::Other(_) => {}
    }
}
