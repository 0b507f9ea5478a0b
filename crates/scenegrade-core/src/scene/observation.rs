use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_CONFIDENCE_SCORE, MEDIUM_CONFIDENCE_SCORE};
use crate::error::{Result, ScenegradeError};

/// Coarse confidence bucket reported with a scene label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Bucket a classifier score in [0, 1].
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE_SCORE {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for Confidence {
    type Err = ScenegradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ScenegradeError::InvalidValue {
                knob: "confidence".into(),
                value: other.to_string(),
            }),
        }
    }
}

/// What a classification transport returns for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: Confidence,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A classified sample. Superseded by the next one; never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObservation {
    pub label: String,
    pub confidence: Confidence,
    pub timestamp: SystemTime,
}

impl SceneObservation {
    pub fn new(label: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            confidence,
            timestamp: SystemTime::now(),
        }
    }

    pub fn from_classification(c: Classification, timestamp: SystemTime) -> Self {
        Self {
            label: c.label,
            confidence: c.confidence,
            timestamp,
        }
    }
}
