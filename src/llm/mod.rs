// src/llm/mod.rs
// Chat completion provider client

mod completions;
mod http_client;
mod logging;
pub mod openai_compat;
mod provider;
mod types;

pub use completions::CompletionsClient;
pub use http_client::LlmHttpClient;
pub use openai_compat::{ChatRequest, ResponseFormat};
pub use provider::LlmClient;
pub use types::{ChatResult, Message, Usage};
