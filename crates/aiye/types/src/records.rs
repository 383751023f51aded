//! Payloads for quota, payment and verification endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::organ::SymptomState;

/// Last quota snapshot reported by the gateway.
///
/// The shape belongs to the backend; the client passes it through to the
/// panel and only peeks at a couple of well-known fields for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaStatus(pub Value);

impl QuotaStatus {
    /// Remaining diagnostic calls, if the backend reports them.
    pub fn calls_remaining(&self) -> Option<u64> {
        ["callsRemaining", "remainingCalls", "remaining"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_u64))
    }

    /// Whether the backend reports the diagnostic quota as exhausted.
    pub fn is_exceeded(&self) -> bool {
        ["quotaExceeded", "exceeded"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_bool))
            .unwrap_or(false)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/vials/initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub organ_id: String,
    pub amount: f64,
    pub currency: String,
    pub email: String,
    pub name: String,
}

/// Hosted checkout link returned by payment initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub payment_link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of an organ's payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VialRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub organ_id: String,
    /// `data:<mime>;base64,<payload>`.
    pub image_base64: String,
    pub ngo_name: String,
    pub description: String,
}

/// The gateway's judgement of a restoration photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub verified: bool,
    #[serde(default)]
    pub analysis: String,
    /// 0-100.
    #[serde(default)]
    pub confidence: f64,
}

/// Result of a verification submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub verification: Verdict,
    #[serde(default)]
    pub previous_state: Option<SymptomState>,
    #[serde(default)]
    pub new_state: Option<SymptomState>,
}
