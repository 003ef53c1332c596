//! Tests for the chat-completions client against a mock server.

use kommiter::llm::LlmClient;
use kommiter::llm::openai::{ModelSettings, OpenAiClient};
use kommiter::llm::prompt_builder::PromptPair;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(ModelSettings {
        api_base_url: format!("{}/openai/v1", server.uri()),
        ..ModelSettings::default()
    })
    .expect("client builds")
}

fn prompts() -> PromptPair {
    PromptPair {
        system: "system text".to_string(),
        user: "user text".to_string(),
    }
}

#[tokio::test]
async fn sends_model_settings_and_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({
            "model": "meta-llama/llama-4-scout-17b-16e-instruct",
            "max_tokens": 1024,
            "stream": false,
            "messages": [
                { "role": "system", "content": "system text" },
                { "role": "user", "content": "user text" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "feat: add x\nfix: y" } }
            ],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server)
        .complete(prompts(), "gsk-test")
        .await
        .unwrap();

    assert_eq!(content, "feat: add x\nfix: y");
}

#[tokio::test]
async fn no_choices_means_empty_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let content = client_for(&server).complete(prompts(), "k").await.unwrap();
    assert_eq!(content, "");
}

#[tokio::test]
async fn null_content_means_empty_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": null } } ]
        })))
        .mount(&server)
        .await;

    let content = client_for(&server).complete(prompts(), "k").await.unwrap();
    assert_eq!(content, "");
}

#[tokio::test]
async fn error_status_becomes_an_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"error":{"message":"rate limit exceeded"}}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(prompts(), "k")
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("HTTP 429"), "{msg}");
    assert!(msg.contains("rate limit exceeded"), "{msg}");
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(prompts(), "k")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("failed to parse LLM API response"));
}
