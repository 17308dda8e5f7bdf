// src/llm/http_client.rs
// Shared HTTP transport for the chat completion provider

use crate::error::{ClassifyError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on establishing the TCP/TLS connection
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Long-lived, concurrency-safe HTTP client with fixed timeouts.
///
/// Exactly one attempt per call: non-success statuses and transport
/// failures are returned to the caller as-is.
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let connect_timeout = request_timeout.min(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ClassifyError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            request_timeout,
            connect_timeout,
        })
    }

    /// POST a JSON body with Bearer auth.
    /// Returns the response body as text on a 2xx status.
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(request_id, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(request_id, e))?;

        if !status.is_success() {
            warn!(
                request_id = %request_id,
                status = %status,
                body_len = text.len(),
                "Provider returned non-success status"
            );
            return Err(ClassifyError::UpstreamStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(request_id = %request_id, body_len = text.len(), "Provider response received");
        Ok(text)
    }

    fn transport_error(&self, request_id: &str, e: reqwest::Error) -> ClassifyError {
        if e.is_timeout() {
            warn!(
                request_id = %request_id,
                timeout_secs = self.request_timeout.as_secs(),
                "Provider request timed out"
            );
            ClassifyError::UpstreamTransport(format!(
                "request timed out after {}s",
                self.request_timeout.as_secs()
            ))
        } else {
            warn!(request_id = %request_id, error = %e, "Provider request failed");
            ClassifyError::UpstreamTransport(e.to_string())
        }
    }
}
