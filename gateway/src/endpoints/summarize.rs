use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::inference::types::GenerationRequest;
use crate::prompts::summarize_prompt;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub document_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// A handler for the document summarization endpoint
#[instrument(name = "summarize", skip_all)]
#[debug_handler(state = AppStateData)]
pub async fn summarize_handler(
    State(AppStateData {
        config,
        http_client,
    }): AppState,
    StructuredJson(params): StructuredJson<Params>,
) -> Result<Json<SummarizeResponse>, Error> {
    counter!("request_count", "endpoint" => "summarize").increment(1);

    let document_text = params
        .document_text
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(Error::InvalidRequest {
            message: "Missing documentText".to_string(),
        })?;

    let prompt = summarize_prompt(document_text);
    let request = GenerationRequest { prompt: &prompt };
    let response = config.generation.generate(&request, &http_client).await?;
    tracing::debug!(
        response_time_ms = response.response_time.as_millis() as u64,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "generated summary"
    );

    Ok(Json(SummarizeResponse {
        summary: response.content,
    }))
}
