use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::grading::{FilterPreset, PresetCatalog};
use crate::scene::SceneObservation;

/// Message used when a rule has no template of its own, or when the label
/// names a preset directly.
pub const GENERIC_MESSAGE: &str = "{label} scene detected. Try the {preset} filter.";

/// Maps one scene label to a preset. `message` may use the `{label}` and
/// `{preset}` placeholders; `{preset}` expands to the preset's display name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRule {
    pub label: String,
    pub preset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SceneRule {
    pub fn new(label: &str, preset_id: &str, message: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            preset_id: preset_id.to_string(),
            message: message.map(str::to_string),
        }
    }
}

/// A time-boxed recommendation to apply a preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSuggestion {
    pub scene_label: String,
    pub preset_id: String,
    pub message: String,
}

/// Table-driven scene -> preset lookup.
#[derive(Clone, Debug)]
pub struct Recommender {
    catalog: Arc<PresetCatalog>,
    rules: Vec<SceneRule>,
}

impl Recommender {
    pub fn new(catalog: Arc<PresetCatalog>) -> Self {
        Self::with_rules(catalog, Self::builtin_rules())
    }

    pub fn with_rules(catalog: Arc<PresetCatalog>, rules: Vec<SceneRule>) -> Self {
        Self { catalog, rules }
    }

    /// Built-in rules followed by `extra`; an extra rule for an existing label
    /// replaces the built-in one.
    pub fn with_extra_rules(catalog: Arc<PresetCatalog>, extra: &[SceneRule]) -> Self {
        let mut rules = Self::builtin_rules();
        for rule in extra {
            match rules
                .iter_mut()
                .find(|r| r.label.eq_ignore_ascii_case(&rule.label))
            {
                Some(existing) => *existing = rule.clone(),
                None => rules.push(rule.clone()),
            }
        }
        Self::with_rules(catalog, rules)
    }

    pub fn builtin_rules() -> Vec<SceneRule> {
        vec![
            SceneRule::new(
                "Sunset",
                "golden_hour",
                Some("Golden hour detected! Try the {preset} filter for warm, glowing tones."),
            ),
            SceneRule::new(
                "Foliage",
                "vivid_foliage",
                Some("Lush greenery ahead. {preset} will make the leaves pop."),
            ),
            SceneRule::new(
                "Beach",
                "cool_breeze",
                Some("Beach vibes! {preset} keeps the sand bright and the water fresh."),
            ),
            SceneRule::new("Ocean", "cool_breeze", None),
            SceneRule::new(
                "Night",
                "night_glow",
                Some("Low light detected. {preset} lifts the shadows and calms the noise."),
            ),
            SceneRule::new(
                "Portrait",
                "soft_portrait",
                Some("Looks like a portrait. Try {preset} for flattering skin tones."),
            ),
            SceneRule::new("Snow", "crisp_snow", None),
            SceneRule::new(
                "City",
                "urban_contrast",
                Some("Street scene spotted. {preset} adds punch to the architecture."),
            ),
            SceneRule::new(
                "Food",
                "warm_feast",
                Some("Food shot! {preset} makes every dish look delicious."),
            ),
            SceneRule::new("Sky", "clear_sky", None),
        ]
    }

    pub fn catalog(&self) -> &Arc<PresetCatalog> {
        &self.catalog
    }

    pub fn rules(&self) -> &[SceneRule] {
        &self.rules
    }

    /// Suggestion for an observation, or `None` when the label is unknown or
    /// its rule references a preset missing from the catalog.
    pub fn recommend(&self, observation: &SceneObservation) -> Option<SceneSuggestion> {
        let label = observation.label.trim();

        if let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.label.eq_ignore_ascii_case(label))
        {
            let Ok(preset) = self.catalog.get(&rule.preset_id) else {
                warn!(
                    scene = %rule.label,
                    preset = %rule.preset_id,
                    "Scene rule references an unknown preset"
                );
                return None;
            };
            let template = rule.message.as_deref().unwrap_or(GENERIC_MESSAGE);
            return Some(suggestion(&rule.label, preset, template));
        }

        match self.catalog.find_by_name(label) {
            Some(preset) => Some(suggestion(label, preset, GENERIC_MESSAGE)),
            None => {
                debug!(label, "No preset for scene");
                None
            }
        }
    }
}

fn suggestion(label: &str, preset: &FilterPreset, template: &str) -> SceneSuggestion {
    SceneSuggestion {
        scene_label: label.to_string(),
        preset_id: preset.id.clone(),
        message: template
            .replace("{label}", label)
            .replace("{preset}", &preset.display_name),
    }
}
