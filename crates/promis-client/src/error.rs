//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Assessment Center API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Registration or token was empty; checked before any request.
    #[error("both registration and token are required")]
    MissingCredentials,

    /// An operation was called without a form OID.
    #[error("form OID must be provided")]
    EmptyFormOid,

    /// Authentication failed (invalid registration/token pair).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested form was not found.
    #[error("form not found: {0}")]
    FormNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body was not valid JSON.
    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),
}

impl ApiError {
    /// Returns `true` for errors caused by the request itself rather
    /// than by transient service conditions.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ApiError::MissingCredentials
                | ApiError::EmptyFormOid
                | ApiError::AuthenticationFailed(_)
                | ApiError::FormNotFound(_)
        )
    }
}
