use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::convention::Convention;
use crate::gitmoji;
use crate::llm::LlmClient;
use crate::llm::prompt_builder;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_HISTORY: &str = "None";
pub const DEFAULT_CONVENTION: &str = "None";
pub const DEFAULT_LAST_SUGGEST: &str = "no one yet";

/// Everything needed for one round of suggestions.
#[derive(Clone)]
pub struct GenerationRequest {
    pub diff: String,
    pub branch_name: String,
    pub last_history: String,
    pub convention: Convention,
    pub last_suggest: String,
    pub api_key: String,
}

impl GenerationRequest {
    /// A request for `diff` with every optional field at its default.
    pub fn new(diff: impl Into<String>, api_key: impl Into<String>) -> Self {
        GenerationRequest {
            diff: diff.into(),
            branch_name: DEFAULT_BRANCH.to_string(),
            last_history: DEFAULT_HISTORY.to_string(),
            convention: Convention::from_name(DEFAULT_CONVENTION),
            last_suggest: DEFAULT_LAST_SUGGEST.to_string(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("diff_len", &self.diff.len())
            .field("branch_name", &self.branch_name)
            .field("convention", &self.convention.name())
            .field("last_suggest", &self.last_suggest)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Turns a [`GenerationRequest`] into newline-separated commit message candidates.
#[derive(Clone)]
pub struct MessageGenerator {
    llm: Arc<dyn LlmClient>,
}

impl MessageGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        MessageGenerator { llm }
    }

    pub async fn generate(&self, req: &GenerationRequest) -> Result<String> {
        let prompts = prompt_builder::commit_suggestions_prompt(req);

        log::debug!(
            "Generating suggestions for branch {:?} with convention {:?}",
            req.branch_name,
            req.convention.name()
        );

        let raw = self.llm.complete(prompts, &req.api_key).await?;

        if req.convention.is_gitmoji() {
            Ok(gitmoji::expand_all(&raw))
        } else {
            Ok(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompt_builder::PromptPair;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed reply and remembers what it was asked.
    struct CannedClient {
        reply: Result<String, String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl CannedClient {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(CannedClient {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn complete(&self, prompts: PromptPair, api_key: &str) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((prompts.system, api_key.to_string()));
            self.reply.clone().map_err(|e| anyhow!(e))
        }
    }

    #[tokio::test]
    async fn non_gitmoji_output_is_returned_verbatim() {
        let raw = ":sparkles: add thing\nfeat: add return value\n";
        let client = CannedClient::ok(raw);
        let generator = MessageGenerator::new(client.clone());

        let mut req = GenerationRequest::new("diff --git a b", "gsk-1");
        req.convention = Convention::from_name("Conventional Commits");

        assert_eq!(generator.generate(&req).await.unwrap(), raw);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, "gsk-1");
        assert!(seen[0].0.contains("'<type>(<optional scope>): <subject>'"));
    }

    #[tokio::test]
    async fn gitmoji_output_is_expanded_line_by_line() {
        let client = CannedClient::ok(":sparkles: add search\n:unicorn: odd one\nplain line");
        let generator = MessageGenerator::new(client);

        let mut req = GenerationRequest::new("diff", "key");
        req.convention = Convention::Gitmoji;

        assert_eq!(
            generator.generate(&req).await.unwrap(),
            ":sparkles:✨ add search\n odd one\nplain line"
        );
    }

    #[tokio::test]
    async fn empty_reply_stays_empty() {
        let generator = MessageGenerator::new(CannedClient::ok(""));
        let mut req = GenerationRequest::new("diff", "key");
        req.convention = Convention::Gitmoji;
        assert_eq!(generator.generate(&req).await.unwrap(), "");
    }

    #[tokio::test]
    async fn client_errors_propagate_unchanged() {
        let client = Arc::new(CannedClient {
            reply: Err("rate limit exceeded".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = MessageGenerator::new(client);

        let err = generator
            .generate(&GenerationRequest::new("diff", "key"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rate limit exceeded");
    }

    #[test]
    fn debug_output_hides_the_key() {
        let req = GenerationRequest::new("diff", "gsk-secret");
        let shown = format!("{req:?}");
        assert!(!shown.contains("gsk-secret"));
        assert!(shown.contains("<redacted>"));
    }
}
