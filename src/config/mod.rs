// src/config/mod.rs
// Process-wide configuration: CLI flags, env overrides and provider secrets

pub mod env;

pub use env::ProviderEnv;

use clap::{Args, ValueEnum};
use std::fmt;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::error::{ClassifyError, Result};

/// Model requested when nothing else is configured
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
/// Hard bound on a single provider call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the result shape is communicated to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Strict `response_format` JSON schema, enforced by the provider
    #[default]
    JsonSchema,
    /// Format instructions in the prompt only; reply is cleaned and parsed defensively
    Prompt,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonSchema => write!(f, "json-schema"),
            Self::Prompt => write!(f, "prompt"),
        }
    }
}

/// Classifier settings that may be overridden per deployment
#[derive(Debug, Clone, Args)]
pub struct ClassifierArgs {
    /// Model identifier sent to the provider
    #[arg(long, global = true, env = "TONECHECK_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Structured-output strategy
    #[arg(long, global = true, env = "TONECHECK_OUTPUT_MODE", value_enum, default_value_t = OutputMode::JsonSchema)]
    pub output_mode: OutputMode,

    /// Provider request timeout in seconds
    #[arg(long, global = true, env = "TONECHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Default for ClassifierArgs {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            output_mode: OutputMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Immutable configuration shared by every request handler
#[derive(Clone)]
pub struct ServiceConfig {
    pub api_token: String,
    pub chat_url: Url,
    pub model: String,
    pub output_mode: OutputMode,
    pub request_timeout: Duration,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_token", &"<redacted>")
            .field("chat_url", &self.chat_url.as_str())
            .field("model", &self.model)
            .field("output_mode", &self.output_mode)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ServiceConfig {
    /// Load from the process environment (call once at startup)
    pub fn load(args: &ClassifierArgs) -> Result<Self> {
        let config = Self::from_parts(ProviderEnv::from_env()?, args)?;
        info!(
            chat_url = %config.chat_url,
            model = %config.model,
            output_mode = %config.output_mode,
            timeout_secs = config.request_timeout.as_secs(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate and combine already-loaded pieces
    pub fn from_parts(provider: ProviderEnv, args: &ClassifierArgs) -> Result<Self> {
        let chat_url = Url::parse(&provider.chat_url).map_err(|e| {
            ClassifyError::Config(format!("{} is not a valid URL: {}", env::CHAT_URL_VAR, e))
        })?;
        if !matches!(chat_url.scheme(), "http" | "https") {
            return Err(ClassifyError::Config(format!(
                "{} must use http or https, got '{}'",
                env::CHAT_URL_VAR,
                chat_url.scheme()
            )));
        }

        let model = args.model.trim();
        if model.is_empty() {
            return Err(ClassifyError::Config("model must not be empty".into()));
        }
        if args.timeout_secs == 0 {
            return Err(ClassifyError::Config(
                "timeout must be at least one second".into(),
            ));
        }

        Ok(Self {
            api_token: provider.api_token,
            chat_url,
            model: model.to_string(),
            output_mode: args.output_mode,
            request_timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_env(url: &str) -> ProviderEnv {
        ProviderEnv::from_values(Some("sk-test".into()), Some(url.into())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_parts(
            provider_env("https://api.openai.com/v1/chat/completions"),
            &ClassifierArgs::default(),
        )
        .unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.output_mode, OutputMode::JsonSchema);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.chat_url.path(), "/v1/chat/completions");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = ServiceConfig::from_parts(provider_env("not a url"), &ClassifierArgs::default())
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Config(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ServiceConfig::from_parts(
            provider_env("ftp://example.com/chat"),
            &ClassifierArgs::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = ClassifierArgs {
            timeout_secs: 0,
            ..ClassifierArgs::default()
        };
        let err = ServiceConfig::from_parts(provider_env("http://localhost:1/chat"), &args)
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_blank_model_rejected() {
        let args = ClassifierArgs {
            model: "  ".into(),
            ..ClassifierArgs::default()
        };
        assert!(ServiceConfig::from_parts(provider_env("http://localhost:1/chat"), &args).is_err());
    }

    #[test]
    fn test_output_mode_display() {
        assert_eq!(OutputMode::JsonSchema.to_string(), "json-schema");
        assert_eq!(OutputMode::Prompt.to_string(), "prompt");
    }
}
