use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::inference::types::GenerationRequest;
use crate::prompts::ask_prompt;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub document_text: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// A handler for the document Q&A endpoint
#[instrument(name = "ask", skip_all)]
#[debug_handler(state = AppStateData)]
pub async fn ask_handler(
    State(AppStateData {
        config,
        http_client,
    }): AppState,
    StructuredJson(params): StructuredJson<Params>,
) -> Result<Json<AskResponse>, Error> {
    counter!("request_count", "endpoint" => "ask").increment(1);

    // Both fields share one error so a client can't distinguish which is absent
    let missing = Error::InvalidRequest {
        message: "Missing documentText or question".to_string(),
    };
    let document_text = params
        .document_text
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing.clone())?;
    let question = params
        .question
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(missing)?;

    let prompt = ask_prompt(document_text, question);
    let request = GenerationRequest { prompt: &prompt };
    let response = config.generation.generate(&request, &http_client).await?;
    tracing::debug!(
        response_time_ms = response.response_time.as_millis() as u64,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "generated answer"
    );

    Ok(Json(AskResponse {
        answer: response.content,
    }))
}
