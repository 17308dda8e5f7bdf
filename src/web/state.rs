// src/web/state.rs
// Web server state

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::llm::{CompletionsClient, LlmClient};
use crate::sentiment::SentimentClassifier;

/// Shared application state; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub classifier: SentimentClassifier,
}

impl AppState {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }

    /// Build the production state: one provider client shared by all requests
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(CompletionsClient::new(config)?);
        Ok(Self::new(SentimentClassifier::new(llm, config.output_mode)))
    }
}
