// src/llm/provider.rs
// LLM provider abstraction layer

use async_trait::async_trait;

use super::openai_compat::ResponseFormat;
use super::{ChatResult, Message};
use crate::error::Result;

/// Trait for chat completion clients.
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request, optionally constraining the output shape
    async fn chat(
        &self,
        messages: Vec<Message>,
        response_format: Option<ResponseFormat>,
    ) -> Result<ChatResult>;

    /// Model identifier requested from the provider
    fn model_name(&self) -> String;
}
