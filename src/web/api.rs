// src/web/api.rs
// REST API handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::json;

use crate::sentiment::{ClassificationResult, CommentRequest};
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

// ═══════════════════════════════════════
// HEALTH & HOME
// ═══════════════════════════════════════

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "API is running" }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

// ═══════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════

/// POST /comment
pub async fn classify_comment(
    State(state): State<AppState>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<Json<ClassificationResult>> {
    let Json(request) = payload?;
    let result = state.classifier.classify(&request.comment).await?;
    Ok(Json(result))
}
