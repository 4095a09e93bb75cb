//! Error types for liveness checking.

use thiserror::Error;

/// Result type alias for liveness operations.
pub type Result<T> = std::result::Result<T, LivenessError>;

/// Errors that can occur while setting up or persisting a liveness run.
///
/// DNS failures for individual domains are not errors: they are folded into
/// [`DomainStatus::Unknown`](crate::DomainStatus::Unknown).
#[derive(Error, Debug)]
pub enum LivenessError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A resolver address could not be parsed.
    #[error("invalid resolver address: {0}")]
    InvalidResolver(String),

    /// Persisted state could not be decoded.
    #[error("state error: {0}")]
    State(String),

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
