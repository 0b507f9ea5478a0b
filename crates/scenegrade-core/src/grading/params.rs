use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::NEUTRAL_PERCENT;
use crate::error::{Result, ScenegradeError};

/// One tunable grading control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    Brightness,
    Contrast,
    Saturation,
    Shadows,
    Highlights,
    Tint,
    Temperature,
    Clarity,
    Dehaze,
    Vignette,
    NoiseReduction,
    GreenBoost,
    Texture,
}

impl Knob {
    pub const ALL: [Knob; 13] = [
        Knob::Brightness,
        Knob::Contrast,
        Knob::Saturation,
        Knob::Shadows,
        Knob::Highlights,
        Knob::Tint,
        Knob::Temperature,
        Knob::Clarity,
        Knob::Dehaze,
        Knob::Vignette,
        Knob::NoiseReduction,
        Knob::GreenBoost,
        Knob::Texture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Shadows => "shadows",
            Self::Highlights => "highlights",
            Self::Tint => "tint",
            Self::Temperature => "temperature",
            Self::Clarity => "clarity",
            Self::Dehaze => "dehaze",
            Self::Vignette => "vignette",
            Self::NoiseReduction => "noise_reduction",
            Self::GreenBoost => "green_boost",
            Self::Texture => "texture",
        }
    }

    /// Valid (min, max) range of the knob, inclusive.
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Brightness | Self::Contrast => (50.0, 150.0),
            Self::Saturation => (0.0, 200.0),
            Self::Shadows
            | Self::Highlights
            | Self::Tint
            | Self::Temperature
            | Self::Clarity
            | Self::Texture => (-50.0, 50.0),
            Self::Dehaze | Self::Vignette | Self::NoiseReduction | Self::GreenBoost => {
                (0.0, 100.0)
            }
        }
    }

    /// Percentage knobs are neutral at 100, additive knobs at 0.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Self::Brightness | Self::Contrast | Self::Saturation)
    }

    pub fn neutral(self) -> f32 {
        if self.is_multiplicative() {
            NEUTRAL_PERCENT
        } else {
            0.0
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl fmt::Display for Knob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Knob {
    type Err = ScenegradeError;

    /// Accepts `noise_reduction`, `noise-reduction` and `NoiseReduction` alike.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Knob::ALL
            .into_iter()
            .find(|k| k.name().replace('_', "") == normalized)
            .ok_or_else(|| ScenegradeError::UnknownKnob(s.to_string()))
    }
}

/// The full set of grading controls for a photo. Every knob always has a value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradingParameters {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub shadows: f32,
    pub highlights: f32,
    pub tint: f32,
    pub temperature: f32,
    pub clarity: f32,
    pub dehaze: f32,
    pub vignette: f32,
    pub noise_reduction: f32,
    pub green_boost: f32,
    pub texture: f32,
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self::neutral()
    }
}

impl GradingParameters {
    /// The reset target: percentage knobs at 100, everything else at 0.
    pub fn neutral() -> Self {
        Self {
            brightness: NEUTRAL_PERCENT,
            contrast: NEUTRAL_PERCENT,
            saturation: NEUTRAL_PERCENT,
            shadows: 0.0,
            highlights: 0.0,
            tint: 0.0,
            temperature: 0.0,
            clarity: 0.0,
            dehaze: 0.0,
            vignette: 0.0,
            noise_reduction: 0.0,
            green_boost: 0.0,
            texture: 0.0,
        }
    }

    pub fn get(&self, knob: Knob) -> f32 {
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

    fn slot_mut(&mut self, knob: Knob) -> &mut f32 {
        match knob {
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
        }
    }

    /// Set a knob as-is. Out-of-range values are stored unchanged.
    pub fn set(&mut self, knob: Knob, value: f32) {
        *self.slot_mut(knob) = value;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, knob: Knob, value: f32) -> Self {
        self.set(knob, value);
        self
    }

    pub fn reset(&mut self) {
        *self = Self::neutral();
    }

    pub fn is_neutral(&self) -> bool {
        Knob::ALL.iter().all(|&k| self.get(k) == k.neutral())
    }

    /// Copy with every knob clamped into its valid range.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for knob in Knob::ALL {
            out.set(knob, knob.clamp(self.get(knob)));
        }
        out
    }
}

/// Parse a `knob=value` assignment such as `saturation=140`.
pub fn parse_assignment(s: &str) -> Result<(Knob, f32)> {
    let (name, value) = s.split_once('=').ok_or_else(|| ScenegradeError::InvalidValue {
        knob: s.to_string(),
        value: "expected knob=value".into(),
    })?;
    let knob: Knob = name.parse()?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| ScenegradeError::InvalidValue {
            knob: knob.to_string(),
            value: value.trim().to_string(),
        })?;
    if !value.is_finite() {
        return Err(ScenegradeError::InvalidValue {
            knob: knob.to_string(),
            value: value.to_string(),
        });
    }
    Ok((knob, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knob_from_str_variants() {
        assert_eq!("noise_reduction".parse::<Knob>().unwrap(), Knob::NoiseReduction);
        assert_eq!("noise-reduction".parse::<Knob>().unwrap(), Knob::NoiseReduction);
        assert_eq!("GreenBoost".parse::<Knob>().unwrap(), Knob::GreenBoost);
        assert!("exposure".parse::<Knob>().is_err());
    }

    #[test]
    fn test_parse_assignment() {
        let (knob, value) = parse_assignment("saturation = 140").unwrap();
        assert_eq!(knob, Knob::Saturation);
        assert_eq!(value, 140.0);
        assert!(parse_assignment("saturation").is_err());
        assert!(parse_assignment("saturation=lots").is_err());
        assert!(parse_assignment("saturation=NaN").is_err());
    }
}
