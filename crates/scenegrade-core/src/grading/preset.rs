use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScenegradeError};

use super::params::Knob;

/// Partial grading parameters: only the knobs a preset changes are `Some`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tint: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dehaze: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vignette: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise_reduction: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<f32>,
}

impl ParameterOverlay {
    pub fn get(&self, knob: Knob) -> Option<f32> {
        match knob {
            Knob::Brightness => self.brightness,
            Knob::Contrast => self.contrast,
            Knob::Saturation => self.saturation,
            Knob::Shadows => self.shadows,
            Knob::Highlights => self.highlights,
            Knob::Tint => self.tint,
            Knob::Temperature => self.temperature,
            Knob::Clarity => self.clarity,
            Knob::Dehaze => self.dehaze,
            Knob::Vignette => self.vignette,
            Knob::NoiseReduction => self.noise_reduction,
            Knob::GreenBoost => self.green_boost,
            Knob::Texture => self.texture,
        }
    }

    pub fn set(&mut self, knob: Knob, value: Option<f32>) {
        let slot = match knob {
            Knob::Brightness => &mut self.brightness,
            Knob::Contrast => &mut self.contrast,
            Knob::Saturation => &mut self.saturation,
            Knob::Shadows => &mut self.shadows,
            Knob::Highlights => &mut self.highlights,
            Knob::Tint => &mut self.tint,
            Knob::Temperature => &mut self.temperature,
            Knob::Clarity => &mut self.clarity,
            Knob::Dehaze => &mut self.dehaze,
            Knob::Vignette => &mut self.vignette,
            Knob::NoiseReduction => &mut self.noise_reduction,
            Knob::GreenBoost => &mut self.green_boost,
            Knob::Texture => &mut self.texture,
        };
        *slot = value;
    }

    pub fn with(mut self, knob: Knob, value: f32) -> Self {
        self.set(knob, Some(value));
        self
    }

    /// Knobs this overlay sets, in canonical order.
    pub fn knobs(&self) -> impl Iterator<Item = (Knob, f32)> + '_ {
        Knob::ALL
            .into_iter()
            .filter_map(move |k| self.get(k).map(|v| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.knobs().next().is_none()
    }
}

/// A named look: an identifier plus the knobs it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterPreset {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub overlay: ParameterOverlay,
}

impl FilterPreset {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, overlay: ParameterOverlay) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            overlay,
        }
    }
}

static BUILTIN: LazyLock<PresetCatalog> = LazyLock::new(|| PresetCatalog {
    presets: builtin_presets(),
});

/// Hand-tuned looks. Values are taste, not derived.
fn builtin_presets() -> Vec<FilterPreset> {
    use Knob::*;
    let preset = |id: &str, name: &str, knobs: &[(Knob, f32)]| {
        let overlay = knobs
            .iter()
            .fold(ParameterOverlay::default(), |o, &(k, v)| o.with(k, v));
        FilterPreset::new(id, name, overlay)
    };
    vec![
        preset(
            "golden_hour",
            "Golden Hour",
            &[(Brightness, 105.0), (Contrast, 110.0), (Saturation, 125.0), (Temperature, 30.0), (Highlights, -10.0)],
        ),
        preset(
            "vivid_foliage",
            "Vivid Foliage",
            &[(Saturation, 135.0), (GreenBoost, 40.0), (Clarity, 15.0), (Contrast, 105.0)],
        ),
        preset(
            "cool_breeze",
            "Cool Breeze",
            &[(Brightness, 108.0), (Saturation, 115.0), (Temperature, -25.0), (Dehaze, 20.0)],
        ),
        preset(
            "night_glow",
            "Night Glow",
            &[(Brightness, 125.0), (Contrast, 115.0), (Shadows, 30.0), (NoiseReduction, 50.0), (Saturation, 90.0)],
        ),
        preset(
            "soft_portrait",
            "Soft Portrait",
            &[(Brightness, 104.0), (Contrast, 92.0), (Saturation, 95.0), (Temperature, 10.0), (Texture, -20.0)],
        ),
        preset(
            "crisp_snow",
            "Crisp Snow",
            &[(Brightness, 112.0), (Contrast, 108.0), (Saturation, 90.0), (Temperature, -15.0), (Highlights, -20.0)],
        ),
        preset(
            "urban_contrast",
            "Urban Contrast",
            &[(Contrast, 130.0), (Saturation, 85.0), (Clarity, 30.0), (Vignette, 25.0)],
        ),
        preset(
            "warm_feast",
            "Warm Feast",
            &[(Brightness, 106.0), (Saturation, 120.0), (Temperature, 20.0), (Texture, 15.0)],
        ),
        preset(
            "noir",
            "Noir",
            &[(Saturation, 0.0), (Contrast, 135.0), (Vignette, 40.0), (Clarity, 20.0)],
        ),
        preset(
            "clear_sky",
            "Clear Sky",
            &[(Saturation, 118.0), (Dehaze, 35.0), (Highlights, -15.0), (Temperature, -5.0)],
        ),
    ]
}

/// Read-only lookup table of filter presets.
#[derive(Clone, Debug)]
pub struct PresetCatalog {
    presets: Vec<FilterPreset>,
}

impl PresetCatalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static PresetCatalog {
        &BUILTIN
    }

    /// Built-ins with `custom` layered on top. A custom preset whose id matches
    /// a built-in replaces it in place; new ids are appended.
    pub fn with_custom(custom: impl IntoIterator<Item = FilterPreset>) -> Self {
        let mut presets = builtin_presets();
        for preset in custom {
            match presets
                .iter_mut()
                .find(|p| p.id.eq_ignore_ascii_case(&preset.id))
            {
                Some(existing) => *existing = preset,
                None => presets.push(preset),
            }
        }
        Self { presets }
    }

    /// Case-insensitive lookup by id.
    pub fn get(&self, id: &str) -> Result<&FilterPreset> {
        self.presets
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| ScenegradeError::PresetNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    /// Match either the id or the display name, ignoring case and separators.
    pub fn find_by_name(&self, name: &str) -> Option<&FilterPreset> {
        let key = name_key(name);
        if key.is_empty() {
            return None;
        }
        self.presets
            .iter()
            .find(|p| name_key(&p.id) == key || name_key(&p.display_name) == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn name_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
