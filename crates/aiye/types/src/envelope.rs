//! Response envelope wrapping every gateway payload.

use serde::{Deserialize, Serialize};

/// `{ success, data, message }` as returned by every gateway endpoint.
///
/// Endpoints that add fields next to `data` (the liveness probe does) are
/// tolerated; those fields are ignored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A failure envelope with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
