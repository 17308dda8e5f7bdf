// src/llm/completions.rs
// Chat completion client for any OpenAI-compatible endpoint

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::openai_compat::{ChatRequest, ResponseFormat, parse_chat_response};
use crate::llm::provider::LlmClient;
use crate::llm::{ChatResult, Message};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

/// Classification wants the most deterministic decoding available
const TEMPERATURE: f32 = 0.0;

/// Client for the configured chat completion URL
pub struct CompletionsClient {
    api_key: String,
    url: String,
    model: String,
    http: LlmHttpClient,
}

impl CompletionsClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api_key: config.api_token.clone(),
            url: config.chat_url.to_string(),
            model: config.model.clone(),
            http: LlmHttpClient::new(config.request_timeout)?,
        })
    }

    #[instrument(skip(self, messages, response_format), fields(request_id, model = %self.model, message_count = messages.len()))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        response_format: Option<ResponseFormat>,
    ) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        Span::current().record("request_id", &request_id);

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            structured = response_format.is_some(),
            model = %self.model,
            "Starting chat completion request"
        );

        let request = ChatRequest::new(&self.model, messages)
            .with_temperature(TEMPERATURE)
            .with_response_format(response_format);

        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, "Completion request: {}", body);

        let response_body = self
            .http
            .post_json(&request_id, &self.url, &self.api_key, body)
            .await?;

        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref u) = result.usage {
            crate::llm::logging::log_usage(&request_id, "Completions", u);
        }
        crate::llm::logging::log_completion(
            &request_id,
            "Completions",
            duration_ms,
            result.content.len(),
            result.finish_reason.as_deref(),
        );

        Ok(result)
    }
}

#[async_trait]
impl LlmClient for CompletionsClient {
    async fn chat(
        &self,
        messages: Vec<Message>,
        response_format: Option<ResponseFormat>,
    ) -> Result<ChatResult> {
        // Delegate to the inherent implementation
        CompletionsClient::chat(self, messages, response_format).await
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassifierArgs, ProviderEnv};

    fn config() -> ServiceConfig {
        config_for("http://127.0.0.1:1/v1/chat/completions")
    }

    fn config_for(url: &str) -> ServiceConfig {
        let env = ProviderEnv::from_values(Some("sk-test".into()), Some(url.into())).unwrap();
        ServiceConfig::from_parts(env, &ClassifierArgs::default()).unwrap()
    }

    #[test]
    fn test_client_uses_config() {
        let client = CompletionsClient::new(&config()).unwrap();
        assert_eq!(LlmClient::model_name(&client), "gpt-4.1-mini");
        assert_eq!(client.url, "http://127.0.0.1:1/v1/chat/completions");
        assert_eq!(client.http.request_timeout.as_secs(), 30);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_upstream_error() {
        let client = CompletionsClient::new(&config()).unwrap();
        let err = client
            .chat(vec![Message::user("hi")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::ClassifyError::UpstreamTransport(_)));
    }

    #[tokio::test]
    async fn test_chat_reports_content_and_elapsed_time() {
        let app = axum::Router::new().route(
            "/v1/chat/completions",
            axum::routing::post(|| async {
                axum::Json(serde_json::json!({
                    "choices": [{"message": {"content": "ok"}, "finish_reason": "stop"}]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client =
            CompletionsClient::new(&config_for(&format!("http://{}/v1/chat/completions", addr)))
                .unwrap();
        let result = client
            .chat(vec![Message::user("hi")], None)
            .await
            .unwrap();
        assert_eq!(result.content, "ok");
        assert_eq!(result.finish_reason.as_deref(), Some("stop"));
        assert!(result.duration_ms < 30_000);
        assert!(!result.request_id.is_empty());
    }
}
