//! Runtime error types

use aiye_gateway::GatewayError;
use thiserror::Error;

/// A form failed client-side checks before anything was sent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("amount {amount} is outside {min}..={max}")]
    AmountOutOfRange { amount: f64, min: f64, max: f64 },

    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("image is {size} bytes, limit is {limit}")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("image is empty")]
    EmptyImage,
}

/// Errors raised by runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The action needs a selected organ and none is selected.
    #[error("no organ selected")]
    NoSelection,

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
