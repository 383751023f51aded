//! Organ records as published by the gateway.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three ecosystem proxies rendered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrganType {
    /// Amazon rainforest.
    Lungs,
    /// Ocean currents.
    Veins,
    /// Atmosphere and soil.
    Skin,
}

impl OrganType {
    /// All organ types in display order.
    pub const ALL: [OrganType; 3] = [OrganType::Lungs, OrganType::Veins, OrganType::Skin];

    /// Real-world ecosystem this organ stands in for.
    pub fn ecosystem(self) -> &'static str {
        match self {
            OrganType::Lungs => "Amazon Rainforest",
            OrganType::Veins => "Ocean Currents",
            OrganType::Skin => "Atmosphere/Soil",
        }
    }

    /// Upstream data feed the backend scores this organ from.
    pub fn data_source(self) -> &'static str {
        match self {
            OrganType::Lungs => "NASA EONET",
            OrganType::Veins => "Copernicus Marine",
            OrganType::Skin => "Air Quality APIs",
        }
    }

    /// Damage event that drives the score down.
    pub fn trigger_event(self) -> &'static str {
        match self {
            OrganType::Lungs => "Deforestation",
            OrganType::Veins => "Acidification",
            OrganType::Skin => "Pollution",
        }
    }

    /// Key of the 3D model bound to this organ.
    pub fn model_key(self) -> &'static str {
        match self {
            OrganType::Lungs => "lungs",
            OrganType::Veins => "veins",
            OrganType::Skin => "skin",
        }
    }
}

impl std::fmt::Display for OrganType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganType::Lungs => write!(f, "Lungs"),
            OrganType::Veins => write!(f, "Veins"),
            OrganType::Skin => write!(f, "Skin"),
        }
    }
}

/// Error returned when parsing an unknown organ type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown organ type: {0}")]
pub struct ParseOrganTypeError(pub String);

impl std::str::FromStr for OrganType {
    type Err = ParseOrganTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lungs" => Ok(OrganType::Lungs),
            "veins" => Ok(OrganType::Veins),
            "skin" => Ok(OrganType::Skin),
            _ => Err(ParseOrganTypeError(s.to_string())),
        }
    }
}

/// Discrete health state derived server-side from the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymptomState {
    Healthy,
    Healing,
    Inflamed,
}

impl SymptomState {
    /// Lowercase label, as used for CSS-like status classes.
    pub fn as_str(self) -> &'static str {
        match self {
            SymptomState::Healthy => "healthy",
            SymptomState::Healing => "healing",
            SymptomState::Inflamed => "inflamed",
        }
    }
}

impl std::fmt::Display for SymptomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymptomState::Healthy => write!(f, "HEALTHY"),
            SymptomState::Healing => write!(f, "HEALING"),
            SymptomState::Inflamed => write!(f, "INFLAMED"),
        }
    }
}

/// One organ as returned by `GET /api/organs`.
///
/// The client never builds these itself; it only caches what the gateway
/// returns and replaces the whole set on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub organ_type: OrganType,
    /// 0-100.
    pub health_score: f64,
    pub symptom_state: SymptomState,
    #[serde(rename = "currentFundingUSD", default)]
    pub current_funding_usd: f64,
    #[serde(rename = "targetFundingUSD", default)]
    pub target_funding_usd: f64,
    /// 0-100.
    #[serde(default)]
    pub funding_percentage: f64,
}

impl OrganRecord {
    /// Health score normalized to [0, 1].
    pub fn normalized_health(&self) -> f32 {
        (self.health_score / 100.0).clamp(0.0, 1.0) as f32
    }

    pub fn is_inflamed(&self) -> bool {
        self.symptom_state == SymptomState::Inflamed
    }
}
