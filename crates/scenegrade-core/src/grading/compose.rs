use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::consts::NEUTRAL_PERCENT;

use super::params::{GradingParameters, Knob};
use super::preset::{FilterPreset, ParameterOverlay};

/// Elementary visual operation understood by every rendering sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOpKind {
    Brightness,
    Contrast,
    Saturate,
    Sepia,
    Grayscale,
}

impl fmt::Display for FilterOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness => write!(f, "brightness"),
            Self::Contrast => write!(f, "contrast"),
            Self::Saturate => write!(f, "saturate"),
            Self::Sepia => write!(f, "sepia"),
            Self::Grayscale => write!(f, "grayscale"),
        }
    }
}

/// One step of a filter chain. `amount` is a multiplier (1.0 = unchanged) for
/// brightness/contrast/saturate and a blend factor in [0, 1] for sepia/grayscale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterOp {
    pub kind: FilterOpKind,
    pub amount: f32,
}

impl FilterOp {
    pub fn new(kind: FilterOpKind, amount: f32) -> Self {
        Self { kind, amount }
    }
}

/// Ordered list of filter operations. Order matters: the ops do not commute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterOp> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn kinds(&self) -> Vec<FilterOpKind> {
        self.ops.iter().map(|op| op.kind).collect()
    }

    fn push(&mut self, kind: FilterOpKind, amount: f32) {
        self.ops.push(FilterOp::new(kind, amount));
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a FilterOp;
    type IntoIter = std::slice::Iter<'a, FilterOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl From<Vec<FilterOp>> for FilterChain {
    fn from(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::css::to_css(self))
    }
}

/// Base parameters with a preset overlay merged on top.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveParameters(GradingParameters);

impl EffectiveParameters {
    pub fn into_inner(self) -> GradingParameters {
        self.0
    }
}

impl Deref for EffectiveParameters {
    type Target = GradingParameters;

    fn deref(&self) -> &GradingParameters {
        &self.0
    }
}

/// Shallow merge: overlay knobs win, absent knobs keep the base value.
pub fn merge(base: &GradingParameters, overlay: &ParameterOverlay) -> EffectiveParameters {
    let mut merged = base.clone();
    for (knob, value) in overlay.knobs() {
        merged.set(knob, value);
    }
    EffectiveParameters(merged)
}

/// Translate grading parameters (optionally overlaid by a preset) into an
/// ordered filter chain. Neither input is modified; only the warmth amount is
/// clamped.
pub fn compose(base: &GradingParameters, preset: Option<&FilterPreset>) -> FilterChain {
    let effective = match preset {
        Some(p) => merge(base, &p.overlay),
        None => EffectiveParameters(base.clone()),
    };
    chain_for(&effective)
}

fn chain_for(p: &GradingParameters) -> FilterChain {
    let mut chain = FilterChain::default();

    if p.brightness != Knob::Brightness.neutral() {
        chain.push(FilterOpKind::Brightness, p.brightness / NEUTRAL_PERCENT);
    }
    if p.contrast != Knob::Contrast.neutral() {
        chain.push(FilterOpKind::Contrast, p.contrast / NEUTRAL_PERCENT);
    }
    if p.saturation != Knob::Saturation.neutral() {
        chain.push(FilterOpKind::Saturate, p.saturation / NEUTRAL_PERCENT);
    }
    // Warming only: negative temperature has no cooling op.
    if p.temperature > 0.0 {
        chain.push(FilterOpKind::Sepia, (p.temperature / 100.0).clamp(0.0, 1.0));
    }
    if p.clarity > 0.0 {
        chain.push(FilterOpKind::Contrast, 1.0 + p.clarity / 100.0);
    }
    if p.saturation == 0.0 {
        chain.push(FilterOpKind::Grayscale, 1.0);
    }

    chain
}
