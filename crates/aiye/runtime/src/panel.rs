//! The status/action panel collaborator.

use aiye_types::{OrganRecord, PaymentLink, QuotaStatus, VerificationOutcome, VialRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Panel controls that can be disabled while their request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    DiagnoseAll,
    Diagnose,
    Pay,
    Verify,
}

/// Whatever presents organ state to the user.
///
/// Every method is synchronous and called from the synchronizer after the
/// relevant gateway call has completed; implementations must not block.
pub trait Panel: Send + Sync {
    /// The organ list, in gateway order.
    fn update_organs(&self, organs: &[OrganRecord]);

    fn update_quota(&self, quota: &QuotaStatus);

    /// Detail view for the newly selected organ. Also enables the
    /// pay/verify actions.
    fn show_selection(&self, organ: &OrganRecord);

    fn notify(&self, notification: Notification);

    fn set_busy(&self, action: PanelAction, busy: bool);

    /// Hand the hosted checkout link to the user.
    fn open_payment_link(&self, organ_id: &str, link: &PaymentLink);

    fn show_verification(&self, organ_id: &str, outcome: &VerificationOutcome);

    fn show_vial_history(&self, _organ_id: &str, _vials: &[VialRecord]) {}

    /// Diagnostic report for one organ, or for all of them when `organ_id`
    /// is `None`.
    fn show_diagnosis(&self, _organ_id: Option<&str>, _report: &Value) {}
}
