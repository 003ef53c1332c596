pub mod openai;
pub mod prompt_builder;
mod prompts;

use anyhow::Result;
use async_trait::async_trait;
use prompt_builder::PromptPair;

/// Trait for talking to a chat-completion model.
///
/// The credential is supplied per call because every HTTP request brings its own key.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a system + user prompt pair and return the reply text.
    ///
    /// An empty reply is returned as an empty string, not an error.
    async fn complete(&self, prompts: PromptPair, api_key: &str) -> Result<String>;
}
