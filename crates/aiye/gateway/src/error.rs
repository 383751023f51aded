//! Gateway error types

use thiserror::Error;

/// Errors raised while talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("gateway unreachable at {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The gateway answered with `success: false`.
    #[error("gateway rejected {endpoint}: {message}")]
    Rejected { endpoint: String, message: String },

    /// Non-2xx status without a readable envelope.
    #[error("gateway returned HTTP {status} for {endpoint}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The body was not the expected envelope or payload.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },

    /// The configured base URL cannot be used.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl GatewayError {
    /// Network-level failure, as opposed to an answer we did not like.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GatewayError::Unreachable { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, GatewayError::Rejected { .. })
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
