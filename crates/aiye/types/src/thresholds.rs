//! Health and funding thresholds.
//!
//! The gateway owns the authoritative symptom state; these policies let the
//! client derive a consistent display color and funding label on its own.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::organ::SymptomState;

const INFLAMED_COLOR: u32 = 0xFF3300;
const HEALING_COLOR: u32 = 0xFFAA00;
const HEALTHY_COLOR: u32 = 0x00FF88;

/// Score boundaries between symptom states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Below this score an organ is inflamed.
    #[serde(default = "default_critical")]
    pub critical: f64,

    /// Below this score (and at or above `critical`) an organ is healing.
    #[serde(default = "default_moderate")]
    pub moderate: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            moderate: default_moderate(),
        }
    }
}

impl HealthThresholds {
    /// Symptom state implied by a health score.
    pub fn symptom_state(&self, health_score: f64) -> SymptomState {
        if health_score < self.critical {
            SymptomState::Inflamed
        } else if health_score < self.moderate {
            SymptomState::Healing
        } else {
            SymptomState::Healthy
        }
    }

    /// Display color for a health score.
    pub fn health_color(&self, health_score: f64) -> Rgb {
        match self.symptom_state(health_score) {
            SymptomState::Inflamed => Rgb::from_hex(INFLAMED_COLOR),
            SymptomState::Healing => Rgb::from_hex(HEALING_COLOR),
            SymptomState::Healthy => Rgb::from_hex(HEALTHY_COLOR),
        }
    }
}

/// Funding progress label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingStatus {
    Urgent,
    Moderate,
    Good,
    Excellent,
}

impl std::fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundingStatus::Urgent => write!(f, "urgent"),
            FundingStatus::Moderate => write!(f, "moderate"),
            FundingStatus::Good => write!(f, "good"),
            FundingStatus::Excellent => write!(f, "excellent"),
        }
    }
}

/// Percentage boundaries between funding labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingThresholds {
    #[serde(default = "default_funding_low")]
    pub low: f64,
    #[serde(default = "default_funding_moderate")]
    pub moderate: f64,
    #[serde(default = "default_funding_good")]
    pub good: f64,
}

impl Default for FundingThresholds {
    fn default() -> Self {
        Self {
            low: default_funding_low(),
            moderate: default_funding_moderate(),
            good: default_funding_good(),
        }
    }
}

impl FundingThresholds {
    /// Label for a funding percentage.
    pub fn status(&self, percentage: f64) -> FundingStatus {
        if percentage < self.low {
            FundingStatus::Urgent
        } else if percentage < self.moderate {
            FundingStatus::Moderate
        } else if percentage < self.good {
            FundingStatus::Good
        } else {
            FundingStatus::Excellent
        }
    }
}

fn default_critical() -> f64 {
    30.0
}

fn default_moderate() -> f64 {
    70.0
}

fn default_funding_low() -> f64 {
    25.0
}

fn default_funding_moderate() -> f64 {
    50.0
}

fn default_funding_good() -> f64 {
    75.0
}
