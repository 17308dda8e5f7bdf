// src/web/error.rs
// Error -> HTTP response mapping for the API boundary

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::error::ClassifyError;

/// Error response with a free-text `detail` body
#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub detail: String,
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::custom(StatusCode::BAD_REQUEST, detail)
    }

    /// Create a new internal server error
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::custom(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::custom(StatusCode::NOT_FOUND, detail)
    }

    /// Create a new custom error with specific status code
    pub fn custom(status_code: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status_code,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status_code, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        if err.is_client_error() {
            warn!(error = %err, "Rejected classification request");
            Self::bad_request(err.detail())
        } else {
            error!(error = %err, "Classification failed");
            Self::internal(err.detail())
        }
    }
}

// Malformed bodies keep axum's status (400, 415 or 422)
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), "Invalid request body: {}", rejection.body_text());
        Self::custom(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
