pub mod classify;
pub mod compose;
pub mod config;
pub mod presets;
pub mod render;
pub mod suggest;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use scenegrade_core::config::AssistantConfig;
use scenegrade_core::grading::params::parse_assignment;
use scenegrade_core::grading::{FilterPreset, GradingParameters, PresetCatalog};

/// Grading options shared by `compose` and `render`.
#[derive(Args)]
pub struct GradingArgs {
    /// Preset to overlay on the base parameters
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Base parameter as knob=value (repeatable, e.g. --set saturation=140)
    #[arg(long = "set", value_name = "KNOB=VALUE")]
    pub set: Vec<String>,

    /// Config file (TOML) providing custom presets
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

impl GradingArgs {
    /// Base parameters from `--set`, clamped into each knob's range.
    pub fn base(&self) -> Result<GradingParameters> {
        let mut params = GradingParameters::neutral();
        for assignment in &self.set {
            let (knob, value) = parse_assignment(assignment)
                .with_context(|| format!("Invalid --set {assignment:?}"))?;
            params.set(knob, knob.clamp(value));
        }
        Ok(params)
    }

    pub fn catalog(&self) -> Result<PresetCatalog> {
        Ok(load_config(self.config.as_deref())?.catalog())
    }

    pub fn preset<'a>(&self, catalog: &'a PresetCatalog) -> Result<Option<&'a FilterPreset>> {
        self.preset
            .as_deref()
            .map(|id| catalog.get(id))
            .transpose()
            .context("Unknown preset (see `scenegrade presets`)")
    }
}

/// Load an `AssistantConfig` from TOML, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AssistantConfig> {
    let Some(path) = path else {
        return Ok(AssistantConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AssistantConfig = toml::from_str(&contents).context("Invalid scenegrade config")?;
    config.validate().context("Invalid scenegrade config")?;
    Ok(config)
}
