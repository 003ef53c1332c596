use super::LlmClient;
use super::prompt_builder::PromptPair;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_TEMPERATURE: f64 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Minimal request/response structs for the Chat Completions API.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Model and transport settings shared by every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub api_base_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Client for any OpenAI-compatible chat completions endpoint (Groq by default).
pub struct OpenAiClient {
    client: Client,
    settings: ModelSettings,
}

impl OpenAiClient {
    pub fn new(settings: ModelSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let api_base_url = settings.api_base_url.trim_end_matches('/').to_string();

        Ok(OpenAiClient {
            client,
            settings: ModelSettings {
                api_base_url,
                ..settings
            },
        })
    }

    fn chat_url(&self) -> String {
        if self.settings.api_base_url.ends_with("/v1") {
            format!("{}/chat/completions", self.settings.api_base_url)
        } else {
            format!("{}/v1/chat/completions", self.settings.api_base_url)
        }
    }

    async fn call_chat(&self, req: &ChatRequest, api_key: &str) -> Result<String> {
        let url = self.chat_url();

        log::info!("Calling model {:?}", &req.model);

        let resp = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(req)
            .send()
            .await
            .context("failed to send request to the LLM API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "LLM API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .context("failed to parse LLM API response")?;

        if let Some(usage) = &chat_resp.usage {
            log::debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        let content = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            log::warn!("Model {:?} returned an empty reply", &req.model);
        }

        Ok(content)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, prompts: PromptPair, api_key: &str) -> Result<String> {
        log::trace!(
            "Commit-suggestion prompt:\n{}",
            truncate(&prompts.user, 3000)
        );

        let req = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: prompts.system,
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompts.user,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            stream: false,
        };

        self.call_chat(&req, api_key).await
    }
}

/// Truncate long strings for debug logging.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let cut = (0..=max_len).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...\n[truncated {} chars]", &s[..cut], s.len() - cut)
    }
}
