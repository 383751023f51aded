//! Aiye shared types
//!
//! This crate holds the data model exchanged with the Aiye gateway and the
//! small policies the client derives from it:
//! - Organ records, organ types and symptom states
//! - Health and funding thresholds
//! - Display colors and formatting helpers
//! - Payment, verification and quota payloads

pub mod color;
pub mod envelope;
pub mod format;
pub mod organ;
pub mod records;
pub mod thresholds;

pub use color::Rgb;
pub use envelope::Envelope;
pub use format::{format_currency, format_percentage};
pub use organ::{OrganRecord, OrganType, ParseOrganTypeError, SymptomState};
pub use records::{
    HealthStatus, PaymentLink, PaymentRequest, QuotaStatus, Verdict, VerificationOutcome,
    VerificationRequest, VialRecord,
};
pub use thresholds::{FundingStatus, FundingThresholds, HealthThresholds};
