// src/error.rs
// Error taxonomy for comment classification

use thiserror::Error;

/// Fixed diagnostic for completions that are not JSON
pub const MALFORMED_RESPONSE_DETAIL: &str = "Model did not return valid JSON";

/// Main error type for the tonecheck library
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider answered with a non-success status; `body` is the raw response text
    #[error("provider returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Network-level failure talking to the provider, including timeouts
    #[error("API request failed: {0}")]
    UpstreamTransport(String),

    #[error("unexpected provider response: {0}")]
    UnexpectedEnvelope(String),

    #[error("Model did not return valid JSON")]
    MalformedResponse,

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for Result using ClassifyError
pub type Result<T> = std::result::Result<T, ClassifyError>;

impl ClassifyError {
    /// True for errors caused by the caller rather than the service or provider
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClassifyError::InvalidInput(_))
    }

    /// Diagnostic text exposed to callers in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            // The raw upstream body is the most useful thing a caller can see
            ClassifyError::UpstreamStatus { body, .. } => body.clone(),
            ClassifyError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        ClassifyError::UpstreamTransport(err.to_string())
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::Internal(err.to_string())
    }
}
