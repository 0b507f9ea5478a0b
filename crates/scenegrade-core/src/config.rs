use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    DEFAULT_DISPLAY_DURATION_MS, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH,
    DEFAULT_INITIAL_DELAY_MS, DEFAULT_JPEG_QUALITY, DEFAULT_SAMPLE_INTERVAL_MS,
    MAX_SAMPLER_DELAY_MS,
};
use crate::error::{Result, ScenegradeError};
use crate::grading::{FilterPreset, PresetCatalog};
use crate::scene::FrameEncoder;
use crate::suggest::SceneRule;

/// Timing and payload settings for the scene sampler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Minimum time between samples, and the sampling timer period.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Delay before the first attempt after start.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,
    #[serde(default = "default_frame_height")]
    pub frame_height: u32,
    /// JPEG quality, 1-100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}
fn default_initial_delay_ms() -> u64 {
    DEFAULT_INITIAL_DELAY_MS
}
fn default_frame_width() -> u32 {
    DEFAULT_FRAME_WIDTH
}
fn default_frame_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}
fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn encoder(&self) -> FrameEncoder {
        FrameEncoder::new(self.frame_width, self.frame_height, self.jpeg_quality)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(ScenegradeError::Config(
                "sampler.interval_ms must be greater than 0".into(),
            ));
        }
        if self.interval_ms > MAX_SAMPLER_DELAY_MS {
            return Err(ScenegradeError::Config(format!(
                "sampler.interval_ms must be at most {MAX_SAMPLER_DELAY_MS}, got {}",
                self.interval_ms
            )));
        }
        if self.initial_delay_ms > MAX_SAMPLER_DELAY_MS {
            return Err(ScenegradeError::Config(format!(
                "sampler.initial_delay_ms must be at most {MAX_SAMPLER_DELAY_MS}, got {}",
                self.initial_delay_ms
            )));
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ScenegradeError::Config(format!(
                "sampler frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ScenegradeError::Config(format!(
                "sampler.jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Suggestion display settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// How long a suggestion stays visible before expiring.
    #[serde(default = "default_display_duration_ms")]
    pub display_duration_ms: u64,
    /// Keep a dismissed scene from reappearing until a different scene is seen.
    #[serde(default = "default_suppress_dismissed")]
    pub suppress_dismissed: bool,
}

fn default_display_duration_ms() -> u64 {
    DEFAULT_DISPLAY_DURATION_MS
}
fn default_suppress_dismissed() -> bool {
    true
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            display_duration_ms: DEFAULT_DISPLAY_DURATION_MS,
            suppress_dismissed: true,
        }
    }
}

impl PresentationConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_duration_ms)
    }
}

/// Top-level configuration, typically loaded from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    /// User presets layered over the built-in catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<FilterPreset>,
    /// Extra scene rules; a rule for an existing label replaces it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<SceneRule>,
}

impl AssistantConfig {
    pub fn catalog(&self) -> PresetCatalog {
        PresetCatalog::with_custom(self.presets.iter().cloned())
    }

    /// Reject settings the sampler cannot run with. Scene rules naming unknown
    /// presets are only warned about; they fail closed at recommendation time.
    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        let catalog = self.catalog();
        for rule in &self.scenes {
            if !catalog.contains(&rule.preset_id) {
                warn!(
                    scene = %rule.label,
                    preset = %rule.preset_id,
                    "Scene rule references an unknown preset"
                );
            }
        }
        Ok(())
    }
}
