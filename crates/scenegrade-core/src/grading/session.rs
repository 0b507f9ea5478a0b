use tracing::{debug, info};

use crate::error::Result;

use super::compose::{compose, FilterChain};
use super::params::{GradingParameters, Knob};
use super::preset::PresetCatalog;

/// Grading state for one capture session: the user's base adjustments plus
/// the preset currently applied over them.
#[derive(Clone, Debug, Default)]
pub struct GradingSession {
    base: GradingParameters,
    active_preset: Option<String>,
}

impl GradingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(&self) -> &GradingParameters {
        &self.base
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// User adjustment of a single knob, clamped into the knob's range.
    pub fn adjust(&mut self, knob: Knob, value: f32) -> f32 {
        let clamped = knob.clamp(value);
        self.base.set(knob, clamped);
        debug!(knob = %knob, value = clamped, "Adjusted grading parameter");
        clamped
    }

    /// Back to neutral parameters with no preset.
    pub fn reset(&mut self) {
        self.base.reset();
        self.active_preset = None;
    }

    /// Select the preset to overlay. The id must exist in `catalog`; the
    /// canonical id from the catalog is stored.
    pub fn set_active_preset(&mut self, catalog: &PresetCatalog, id: &str) -> Result<()> {
        let preset = catalog.get(id)?;
        info!(preset = %preset.id, "Active preset changed");
        self.active_preset = Some(preset.id.clone());
        Ok(())
    }

    pub fn clear_preset(&mut self) {
        self.active_preset = None;
    }

    /// Filter chain for the current base and preset. An active preset that has
    /// since disappeared from `catalog` is ignored.
    pub fn filter_chain(&self, catalog: &PresetCatalog) -> FilterChain {
        let preset = self
            .active_preset
            .as_deref()
            .and_then(|id| catalog.get(id).ok());
        compose(&self.base, preset)
    }
}
