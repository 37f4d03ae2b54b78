use axum::debug_handler;
use axum::extract::State;
use axum::response::Json;
use base64::prelude::*;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Error;
use crate::gateway_util::{AppState, AppStateData, StructuredJson};
use crate::inference::types::OcrRequest;

const PDF_MIME_TYPE: &str = "application/pdf";

/// The expected payload is a JSON object with a `fileBase64` field holding the
/// base64-encoded bytes of a PDF.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub file_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// A handler for the text extraction endpoint
#[instrument(name = "extract_text", skip_all)]
#[debug_handler(state = AppStateData)]
pub async fn extract_text_handler(
    State(AppStateData {
        config,
        http_client,
    }): AppState,
    StructuredJson(params): StructuredJson<Params>,
) -> Result<Json<ExtractTextResponse>, Error> {
    counter!("request_count", "endpoint" => "extract_text").increment(1);

    let file_base64 = params
        .file_base64
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(Error::InvalidRequest {
            message: "Missing fileBase64".to_string(),
        })?;
    // Reject payloads that would fail at the upstream anyway
    BASE64_STANDARD
        .decode(file_base64)
        .map_err(|_| Error::InvalidRequest {
            message: "fileBase64 is not valid base64".to_string(),
        })?;

    let request = OcrRequest {
        file_base64,
        mime_type: PDF_MIME_TYPE,
    };
    let response = config.ocr.process(&request, &http_client).await?;
    tracing::debug!(
        response_time_ms = response.response_time.as_millis() as u64,
        text_len = response.text.len(),
        "extracted document text"
    );
    if response.text.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    Ok(Json(ExtractTextResponse {
        text: response.text,
    }))
}
