//! Global recolour sweep.
//!
//! Two walks per call: one to count the subtree for progress reporting,
//! one to rewrite colours. Each attribute list that changed is written
//! back to its node once.

use serde::{Deserialize, Serialize};

use super::{ApplyOptions, HueOverrides, Metrics};
use crate::colour::{Adjustment, PreserveOptions, Rgba};
use crate::error::NodeError;
use crate::scene::{count_nodes, traverse_mut, Attr, Effect, Paint, PaintSlot, SceneNode};

/// Progress is reported every this many visited nodes.
pub const PROGRESS_INTERVAL: usize = 50;

/// Everything one apply call needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub options: ApplyOptions,
    /// Additive saturation delta, `[-1, 1]`.
    #[serde(default)]
    pub sat_delta: f64,
    /// Additive lightness delta, `[-1, 1]`.
    #[serde(default)]
    pub light_delta: f64,
    /// Global hue rotation in degrees.
    #[serde(default)]
    pub hue_delta: f64,
    /// Per-colour hue rotations replacing `hue_delta`.
    #[serde(default, rename = "colorMapping", alias = "hueOverrides")]
    pub hue_overrides: HueOverrides,
}

impl ApplyRequest {
    pub fn new(adjustment: Adjustment, options: ApplyOptions) -> Self {
        Self {
            options,
            sat_delta: adjustment.saturation,
            light_delta: adjustment.lightness,
            hue_delta: adjustment.hue,
            hue_overrides: HueOverrides::new(),
        }
    }

    pub fn with_overrides(mut self, hue_overrides: HueOverrides) -> Self {
        self.hue_overrides = hue_overrides;
        self
    }

    pub fn adjustment(&self) -> Adjustment {
        Adjustment::new(self.sat_delta, self.light_delta, self.hue_delta)
    }

    /// Recolour one occurrence, honouring its hue override.
    fn recolour(&self, colour: Rgba) -> Rgba {
        let hue = self.hue_overrides.effective(colour.key(), self.hue_delta);
        self.adjustment().with_hue(hue).apply(colour, &self.preserve())
    }

    fn preserve(&self) -> PreserveOptions {
        self.options.preserve
    }
}

/// A progress notification emitted during an apply walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

/// Recolour the first selected node's subtree in place.
///
/// `on_progress` is called synchronously every `PROGRESS_INTERVAL`
/// visited nodes. An empty selection returns zeroed metrics without
/// walking or reporting.
pub fn apply<N, F>(selection: &mut [N], request: &ApplyRequest, mut on_progress: F) -> Metrics
where
    N: SceneNode,
    F: FnMut(Progress),
{
    let mut metrics = Metrics::default();
    let Some(root) = selection.first_mut() else {
        return metrics;
    };

    let total = count_nodes(&*root);

    traverse_mut(root, |node| {
        metrics.visited_nodes += 1;
        if metrics.visited_nodes % PROGRESS_INTERVAL == 0 {
            on_progress(Progress {
                processed: metrics.visited_nodes,
                total,
            });
        }

        if let Err(err) = apply_node(node, request, &mut metrics) {
            metrics.failed += 1;
            tracing::warn!(node = node.name(), error = %err, "apply failed on node");
        }
    });

    tracing::debug!(
        visited = metrics.visited_nodes,
        paints = metrics.modified_paints,
        effects = metrics.modified_effects,
        skipped = metrics.skipped,
        failed = metrics.failed,
        "apply complete"
    );

    metrics
}

fn apply_node<N: SceneNode>(
    node: &mut N,
    request: &ApplyRequest,
    metrics: &mut Metrics,
) -> Result<(), NodeError> {
    for slot in PaintSlot::ALL {
        if !request.options.includes(slot) {
            continue;
        }
        let rewritten = match node.paints(slot)? {
            Attr::Absent => None,
            Attr::Mixed => {
                metrics.skipped += 1;
                None
            }
            Attr::Concrete(paints) => rewrite_paints(paints, request),
        };
        if let Some((paints, changed)) = rewritten {
            node.set_paints(slot, paints)?;
            metrics.modified_paints += changed;
        }
    }

    if request.options.include_effects {
        let rewritten = match node.effects()? {
            Attr::Absent => None,
            Attr::Mixed => {
                metrics.skipped += 1;
                None
            }
            Attr::Concrete(effects) => rewrite_effects(effects, request),
        };
        if let Some((effects, changed)) = rewritten {
            node.set_effects(effects)?;
            metrics.modified_effects += changed;
        }
    }

    Ok(())
}

/// New paint list and the number of entries that changed, or `None`
/// when nothing changed.
fn rewrite_paints(paints: &[Paint], request: &ApplyRequest) -> Option<(Vec<Paint>, usize)> {
    let mut changed = 0;
    let rewritten: Vec<Paint> = paints
        .iter()
        .map(|paint| {
            let out = rewrite_paint(paint, request);
            if out != *paint {
                changed += 1;
            }
            out
        })
        .collect();

    (changed > 0).then_some((rewritten, changed))
}

fn rewrite_paint(paint: &Paint, request: &ApplyRequest) -> Paint {
    if !paint.is_visible() {
        return paint.clone();
    }

    let mut out = paint.clone();
    match &mut out {
        Paint::Solid(solid) => {
            // Opacity feeds the key and the transform but is not written back
            let adjusted = request.recolour(solid.rgba());
            solid.color = adjusted.rgb();
        }
        Paint::GradientLinear(gradient)
        | Paint::GradientRadial(gradient)
        | Paint::GradientAngular(gradient)
        | Paint::GradientDiamond(gradient) => {
            for stop in &mut gradient.gradient_stops {
                stop.color = request.recolour(stop.color);
            }
        }
        Paint::Image(_) | Paint::Other(_) => {}
    }
    out
}

fn rewrite_effects(effects: &[Effect], request: &ApplyRequest) -> Option<(Vec<Effect>, usize)> {
    let mut changed = 0;
    let rewritten: Vec<Effect> = effects
        .iter()
        .map(|effect| {
            let out = rewrite_effect(effect, request);
            if out != *effect {
                changed += 1;
            }
            out
        })
        .collect();

    (changed > 0).then_some((rewritten, changed))
}

fn rewrite_effect(effect: &Effect, request: &ApplyRequest) -> Effect {
    if !effect.is_visible() {
        return effect.clone();
    }

    let mut out = effect.clone();
    match &mut out {
        Effect::DropShadow(shadow) if request.options.includes_drop_shadows() => {
            shadow.color = request.recolour(shadow.color);
        }
        Effect::InnerShadow(shadow) if request.options.includes_inner_shadows() => {
            shadow.color = request.recolour(shadow.color);
        }
        Effect::DropShadow(_)
        | Effect::InnerShadow(_)
        | Effect::LayerBlur(_)
        | Effect::BackgroundBlur(_)
        | Effect::Other(_) => {}
    }
    out
}
