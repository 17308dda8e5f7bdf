// src/config/env.rs
// Environment-sourced provider credentials - read once at startup

use crate::error::{ClassifyError, Result};
use tracing::debug;

/// Bearer token for the chat completion provider
pub const API_TOKEN_VAR: &str = "AI_API_TOKEN";
/// Chat completion endpoint URL
pub const CHAT_URL_VAR: &str = "CHAT_URL";

/// Required provider settings, straight from the environment
#[derive(Clone)]
pub struct ProviderEnv {
    pub api_token: String,
    pub chat_url: String,
}

impl ProviderEnv {
    /// Load both required variables, failing on the first one that is missing
    pub fn from_env() -> Result<Self> {
        Self::from_values(read_key(API_TOKEN_VAR), read_key(CHAT_URL_VAR))
    }

    /// Build from already-read values (blank values count as missing)
    pub fn from_values(api_token: Option<String>, chat_url: Option<String>) -> Result<Self> {
        let api_token = api_token
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ClassifyError::Config(format!("{} not set", API_TOKEN_VAR)))?;
        let chat_url = chat_url
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ClassifyError::Config(format!("{} not set", CHAT_URL_VAR)))?;

        debug!(chat_url = %chat_url, "Provider environment loaded");

        Ok(Self {
            api_token,
            chat_url: chat_url.trim().to_string(),
        })
    }
}

// Never print the token
impl std::fmt::Debug for ProviderEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEnv")
            .field("api_token", &"<redacted>")
            .field("chat_url", &self.chat_url)
            .finish()
    }
}

/// Read a single variable from the environment, filtering empty values
fn read_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|k| !k.trim().is_empty())
}
