use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::infrastructure::logging::scrub_secrets;

/// Errors that can occur when calling an OpenAI-compatible endpoint
#[derive(Error, Debug)]
pub enum OpenAiApiError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Unknown model or wrong API path
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Upstream server error (5xx)
    #[error("API server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Response carried no generated text
    #[error("Completion response contained no choices")]
    EmptyResponse,

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl OpenAiApiError {
    /// Create error from HTTP status code and response body
    ///
    /// - 400, 422: Invalid request
    /// - 401, 403: Authentication failed
    /// - 404: Not found
    /// - 429: Rate limit exceeded
    /// - 5xx: Server error
    /// - Other: Unknown error
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 | 422 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimitExceeded(body),
            code @ 500..=599 => Self::ServerError { status: code, body },
            _ => Self::Unknown(format!("HTTP {status}: {body}")),
        }
    }
}

impl From<OpenAiApiError> for DomainError {
    fn from(err: OpenAiApiError) -> Self {
        Self::UpstreamCall(scrub_secrets(&err.to_string()))
    }
}
