// src/llm/openai_compat/response.rs
// OpenAI-compatible chat response envelope parsing

use crate::error::{ClassifyError, Result};
use crate::llm::{ChatResult, Usage};
use serde::Deserialize;

/// Non-streaming chat response (OpenAI-compatible format)
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ResponseChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseChoice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    /// Set instead of `content` when a structured-output request is declined
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Parse an OpenAI-compatible chat response into a ChatResult.
///
/// Anything that is not a usable envelope (wrong shape, no choices, null
/// content, a refusal) is an `UnexpectedEnvelope` error. Empty or blank
/// text is passed through; judging it is up to the completion parser.
pub fn parse_chat_response(
    response_body: &str,
    request_id: &str,
    duration_ms: u64,
) -> Result<ChatResult> {
    let data: ChatResponse = serde_json::from_str(response_body).map_err(|e| {
        ClassifyError::UnexpectedEnvelope(format!("failed to parse chat response: {}", e))
    })?;

    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ClassifyError::UnexpectedEnvelope("response has no choices".into()))?;

    if let Some(refusal) = choice.message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(ClassifyError::UnexpectedEnvelope(format!(
            "model refused: {}",
            refusal
        )));
    }

    let content = choice
        .message
        .content
        .ok_or_else(|| {
            ClassifyError::UnexpectedEnvelope("completion has no text content".into())
        })?;

    Ok(ChatResult {
        request_id: request_id.to_owned(),
        content,
        finish_reason: choice.finish_reason,
        usage: data.usage,
        duration_ms,
    })
}
