//! HTTP implementation of the gateway

use std::time::Duration;

use aiye_types::{
    Envelope, HealthStatus, OrganRecord, PaymentLink, PaymentRequest, QuotaStatus,
    VerificationOutcome, VerificationRequest, VialRecord,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::Gateway;

/// Production backend.
pub const DEFAULT_BASE_URL: &str = "https://aiye-backend-gemini-hackathon.onrender.com";

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts for idempotent reads that fail at the network level.
    pub retry_attempts: u32,
    /// Delay before retry `n` is `n * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Gateway client over HTTP/JSON.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl HttpGateway {
    /// Create a client from options.
    pub fn new(options: GatewayOptions) -> GatewayResult<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        let trimmed = options.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", options.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(options.base_url));
        }

        Ok(Self {
            client,
            base_url,
            retry_attempts: options.retry_attempts.max(1),
            retry_backoff: options.retry_backoff,
        })
    }

    /// Create a client for `base_url` with default timeouts.
    pub fn with_base_url(base_url: &str) -> GatewayResult<Self> {
        Self::new(GatewayOptions {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========== Internal HTTP helpers ==========

    fn url(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let url = self.url(segments)?;
        let body = self.get_with_retry(&url).await?;
        take_data(url.path(), body)
    }

    async fn post<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let url = self.url(segments)?;
        let body = self.exchange(url.path(), self.client.post(url.clone())).await?;
        take_data(url.path(), body)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> GatewayResult<T> {
        let url = self.url(segments)?;
        let body = self
            .exchange(url.path(), self.client.post(url.clone()).json(payload))
            .await?;
        take_data(url.path(), body)
    }

    async fn get_with_retry(&self, url: &Url) -> GatewayResult<Value> {
        let mut attempt = 1;
        loop {
            match self.exchange(url.path(), self.client.get(url.clone())).await {
                Err(e) if e.is_unreachable() && attempt < self.retry_attempts => {
                    warn!(
                        endpoint = url.path(),
                        attempt = attempt,
                        error = %e,
                        "Gateway unreachable, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Send a request and return the full envelope body once `success` is
    /// confirmed.
    async fn exchange(&self, endpoint: &str, request: RequestBuilder) -> GatewayResult<Value> {
        debug!(endpoint = endpoint, "Gateway request");

        let result = self.exchange_inner(endpoint, request).await;
        match &result {
            Ok(_) => debug!(endpoint = endpoint, "Gateway response"),
            Err(e) => error!(endpoint = endpoint, error = %e, "Gateway error"),
        }
        result
    }

    async fn exchange_inner(&self, endpoint: &str, request: RequestBuilder) -> GatewayResult<Value> {
        let unreachable = |source| GatewayError::Unreachable {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = request.send().await.map_err(unreachable)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(unreachable)?;
        decode_envelope(endpoint, status, &bytes)
    }
}

/// Check the `{success, data, message}` envelope and hand back the whole
/// body. Bodies that are not envelopes fall back to the HTTP status.
fn decode_envelope(endpoint: &str, status: StatusCode, bytes: &[u8]) -> GatewayResult<Value> {
    let body: Value = match serde_json::from_slice(bytes) {
        Ok(body) => body,
        Err(e) if status.is_success() => {
            return Err(GatewayError::Malformed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
        }
        Err(_) => {
            return Err(GatewayError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: String::from_utf8_lossy(bytes).into_owned(),
            })
        }
    };

    match Envelope::<IgnoredAny>::deserialize(&body) {
        Ok(envelope) if envelope.success => Ok(body),
        Ok(envelope) => Err(GatewayError::Rejected {
            endpoint: endpoint.to_string(),
            message: envelope
                .message
                .unwrap_or_else(|| "API request failed".to_string()),
        }),
        Err(e) if status.is_success() => Err(GatewayError::Malformed {
            endpoint: endpoint.to_string(),
            reason: format!("response is not an envelope: {}", e),
        }),
        Err(_) => Err(GatewayError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: body.to_string(),
        }),
    }
}

/// Pull `data` out of a successful envelope. A missing `data` decodes as
/// `null`, which is fine for loosely-typed reports and an error otherwise.
fn take_data<T: DeserializeOwned>(endpoint: &str, body: Value) -> GatewayResult<T> {
    let malformed = |e: serde_json::Error| GatewayError::Malformed {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    };
    let envelope: Envelope<Value> = serde_json::from_value(body).map_err(malformed)?;
    serde_json::from_value(envelope.data.unwrap_or(Value::Null)).map_err(malformed)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn health_check(&self) -> GatewayResult<HealthStatus> {
        let url = self.url(&["health"])?;
        let body = self.get_with_retry(&url).await?;
        // the probe reports its fields next to `success`, not under `data`
        serde_json::from_value(body).map_err(|e| GatewayError::Malformed {
            endpoint: url.path().to_string(),
            reason: e.to_string(),
        })
    }

    async fn list_organs(&self) -> GatewayResult<Vec<OrganRecord>> {
        self.get(&["api", "organs"]).await
    }

    async fn get_organ(&self, organ_id: &str) -> GatewayResult<OrganRecord> {
        self.get(&["api", "organs", organ_id]).await
    }

    async fn diagnose_organ(&self, organ_id: &str) -> GatewayResult<Value> {
        self.post(&["api", "organs", organ_id, "diagnose"]).await
    }

    async fn diagnose_all(&self) -> GatewayResult<Value> {
        self.post(&["api", "organs", "diagnose-all"]).await
    }

    async fn quota_status(&self) -> GatewayResult<QuotaStatus> {
        self.get(&["api", "organs", "quota-status"]).await
    }

    async fn initialize_payment(&self, request: &PaymentRequest) -> GatewayResult<PaymentLink> {
        self.post_json(&["api", "vials", "initialize"], request).await
    }

    async fn vials_for_organ(&self, organ_id: &str) -> GatewayResult<Vec<VialRecord>> {
        self.get(&["api", "vials", organ_id]).await
    }

    async fn verify_restoration(
        &self,
        request: &VerificationRequest,
    ) -> GatewayResult<VerificationOutcome> {
        self.post_json(&["api", "verify"], request).await
    }
}
