//! Aiye gateway client
//!
//! The backend owns all durable state: organ records, diagnostics quota,
//! payments and restoration verification. This crate exposes it as the
//! [`Gateway`] trait, with [`HttpGateway`] as the reqwest implementation.
//! Every response is wrapped in a `{success, data, message}` envelope;
//! `success: false` surfaces as [`GatewayError::Rejected`].

mod client;
mod error;
mod image;

pub use client::{GatewayOptions, HttpGateway, DEFAULT_BASE_URL};
pub use error::{GatewayError, GatewayResult};
pub use image::encode_image_data_url;

use aiye_types::{
    HealthStatus, OrganRecord, PaymentLink, PaymentRequest, QuotaStatus, VerificationOutcome,
    VerificationRequest, VialRecord,
};
use async_trait::async_trait;
use serde_json::Value;

/// Operations offered by the backend gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET /health`
    async fn health_check(&self) -> GatewayResult<HealthStatus>;

    /// `GET /api/organs`
    async fn list_organs(&self) -> GatewayResult<Vec<OrganRecord>>;

    /// `GET /api/organs/{id}`
    async fn get_organ(&self, organ_id: &str) -> GatewayResult<OrganRecord>;

    /// `POST /api/organs/{id}/diagnose`. The report is backend-defined.
    async fn diagnose_organ(&self, organ_id: &str) -> GatewayResult<Value>;

    /// `POST /api/organs/diagnose-all`. Costly and rate limited upstream.
    async fn diagnose_all(&self) -> GatewayResult<Value>;

    /// `GET /api/organs/quota-status`
    async fn quota_status(&self) -> GatewayResult<QuotaStatus>;

    /// `POST /api/vials/initialize`
    async fn initialize_payment(&self, request: &PaymentRequest) -> GatewayResult<PaymentLink>;

    /// `GET /api/vials/{organId}`
    async fn vials_for_organ(&self, organ_id: &str) -> GatewayResult<Vec<VialRecord>>;

    /// `POST /api/verify`
    async fn verify_restoration(
        &self,
        request: &VerificationRequest,
    ) -> GatewayResult<VerificationOutcome>;
}
