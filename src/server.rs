use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::convention::Convention;
use crate::generator::{
    GenerationRequest, MessageGenerator, DEFAULT_BRANCH, DEFAULT_CONVENTION, DEFAULT_HISTORY,
    DEFAULT_LAST_SUGGEST,
};

pub const API_KEY_HEADER: &str = "x-api-key";

/// JSON body accepted by `POST /ai`.
///
/// Fields take any JSON value: strings are used as-is, `null` means absent and
/// anything else is rendered as JSON text.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestBody {
    #[serde(default, deserialize_with = "lenient_text")]
    pub diff: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_history: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub conventions: Option<String>,
    #[serde(default, alias = "lastSuggests", deserialize_with = "lenient_text")]
    pub last_suggests: Option<String>,
}

fn lenient_text<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub commit_messages: String,
}

/// Everything that can go wrong at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("{0}")]
    BadRequest(String),
    /// Rendered with the whole cause chain, outermost first.
    #[error("{0:#}")]
    Generation(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFields | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<MessageGenerator>,
}

pub fn router(generator: MessageGenerator) -> Router {
    Router::new()
        .route("/ai", post(suggest_handler))
        .with_state(AppState {
            generator: Arc::new(generator),
        })
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(host: &str, port: u16, generator: MessageGenerator) -> Result<()> {
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    log::info!("Listening on http://{addr}/ai");

    axum::serve(listener, router(generator))
        .await
        .context("server error")?;

    Ok(())
}

async fn suggest_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SuggestBody>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        log::info!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let req = into_generation_request(body, &headers)?;

    log::info!(
        "Suggesting commit messages for branch {:?} ({} byte diff)",
        req.branch_name,
        req.diff.len()
    );

    match state.generator.generate(&req).await {
        Ok(commit_messages) => Ok(Json(SuggestResponse { commit_messages })),
        Err(err) => {
            log::error!("Generation failed: {err:#}");
            Err(ApiError::Generation(err))
        }
    }
}

/// Validate the body and key header, filling defaults for the optional fields.
fn into_generation_request(
    body: SuggestBody,
    headers: &HeaderMap,
) -> Result<GenerationRequest, ApiError> {
    let diff = body.diff.filter(|d| !d.is_empty());
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|k| !k.is_empty());

    let (Some(diff), Some(api_key)) = (diff, api_key) else {
        return Err(ApiError::MissingFields);
    };

    Ok(GenerationRequest {
        diff,
        branch_name: body.branch_name.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        last_history: body
            .last_history
            .unwrap_or_else(|| DEFAULT_HISTORY.to_string()),
        convention: Convention::from_name(
            body.conventions.as_deref().unwrap_or(DEFAULT_CONVENTION),
        ),
        last_suggest: body
            .last_suggests
            .unwrap_or_else(|| DEFAULT_LAST_SUGGEST.to_string()),
        api_key: api_key.to_string(),
    })
}
