//! Error types for MindAtlas.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed caller input. Message is surfaced verbatim.
    #[error("{0}")]
    InvalidInput(String),

    /// Caller identity missing where required.
    #[error("{0}")]
    Unauthenticated(String),

    /// Upload exceeds the accepted size bound.
    #[error("File too large. Maximum size is 16MB")]
    PayloadTooLarge,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate email on registration).
    #[error("{0}")]
    Duplicate(String),

    /// Operator-facing server misconfiguration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider model list could not be obtained. Carries a remediation hint.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Transport-level failure after retries. Converted to the fallback
    /// response before it can reach a caller.
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error status from the provider. Converted to the fallback
    /// response before it can reach a caller.
    #[error("Provider rejected request with status {status}")]
    UpstreamRejected { status: u16 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
