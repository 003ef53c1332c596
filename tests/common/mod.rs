//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use kommiter::llm::LlmClient;
use kommiter::llm::prompt_builder::PromptPair;

/// A prompt and key as seen by the stub.
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub system: String,
    pub user: String,
    pub api_key: String,
}

/// Stand-in model that replays a fixed reply or error.
pub struct StubLlm {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<SeenCall>>,
}

impl StubLlm {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(StubLlm {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(StubLlm {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<SeenCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn complete(&self, prompts: PromptPair, api_key: &str) -> Result<String> {
        self.calls.lock().unwrap().push(SeenCall {
            system: prompts.system,
            user: prompts.user,
            api_key: api_key.to_string(),
        });
        self.reply.clone().map_err(|e| anyhow!(e))
    }
}
