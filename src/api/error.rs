//! API-specific error types
//!
//! Every failure talking to the registry collapses into one of three
//! classes: transport failure, non-success HTTP status, or a response whose
//! shape does not match the expected envelope. Callers that face the user
//! normalize all three into a single "data unavailable" message; the
//! variants exist for logging and tests, not for user-facing distinctions.

use thiserror::Error;

/// API error type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised at the registry API boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The configured base URL could not be used
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}
