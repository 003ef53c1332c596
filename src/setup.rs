use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::config::Config;
use crate::generator::MessageGenerator;
use crate::llm::openai::OpenAiClient;

/// Build the message generator based on CLI + config.
pub fn build_generator(cfg: &Config) -> Result<MessageGenerator> {
    debug!(
        "Using OpenAiClient with model {} at {}",
        cfg.model.model, cfg.model.api_base_url
    );

    let client = OpenAiClient::new(cfg.model.clone())?;
    Ok(MessageGenerator::new(Arc::new(client)))
}
