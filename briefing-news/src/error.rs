//! Error types for the news module

use thiserror::Error;

/// Errors that can occur while talking to a news provider
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit or plan quota exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credential rejected by the provider
    #[error("Invalid API key")]
    Unauthorized,

    /// Provider did not answer within the per-call budget
    #[error("{provider} timed out after {secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// No credential configured for the provider
    #[error("No API key configured for {0}")]
    MissingCredential(String),
}

impl NewsError {
    /// Map a non-success HTTP status onto the error taxonomy
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => NewsError::Unauthorized,
            426 | 429 => NewsError::RateLimited,
            _ => NewsError::ApiError { status, message },
        }
    }
}
