// src/sentiment/mod.rs
// Sentiment classification: validate, prompt, call provider, parse

pub mod parse;
pub mod prompt;
pub mod types;

pub use parse::{parse_classification, strip_code_fences};
pub use types::{ClassificationResult, CommentRequest, Rating, Sentiment};

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::OutputMode;
use crate::error::{ClassifyError, Result};
use crate::llm::LlmClient;

/// Classifies comments through a chat completion provider.
///
/// Stateless apart from the shared client handle; safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct SentimentClassifier {
    llm: Arc<dyn LlmClient>,
    output_mode: OutputMode,
}

impl SentimentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, output_mode: OutputMode) -> Self {
        Self { llm, output_mode }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn model_name(&self) -> String {
        self.llm.model_name()
    }

    /// Classify a single comment. All-or-nothing: any failure is returned
    /// as a typed error and no partial result is produced.
    pub async fn classify(&self, comment: &str) -> Result<ClassificationResult> {
        validate_comment(comment)?;

        let messages = prompt::build_messages(comment);
        let response_format = match self.output_mode {
            OutputMode::JsonSchema => Some(prompt::response_format()),
            OutputMode::Prompt => None,
        };

        let completion = self.llm.chat(messages, response_format).await?;
        let result = parse_classification(&completion.content).inspect_err(|e| {
            warn!(
                request_id = %completion.request_id,
                error = %e,
                content_len = completion.content.len(),
                "Completion rejected"
            );
        })?;

        if !result.is_consistent() {
            warn!(
                request_id = %completion.request_id,
                sentiment = %result.sentiment,
                rating = %result.rating,
                "Rating and sentiment disagree"
            );
        }

        info!(
            request_id = %completion.request_id,
            model = %self.model_name(),
            sentiment = %result.sentiment,
            rating = %result.rating,
            duration_ms = completion.duration_ms,
            "Comment classified"
        );

        Ok(result)
    }
}

/// A comment must contain something other than whitespace
pub fn validate_comment(comment: &str) -> Result<()> {
    if comment.trim().is_empty() {
        return Err(ClassifyError::InvalidInput(
            "comment must not be empty".into(),
        ));
    }
    Ok(())
}
