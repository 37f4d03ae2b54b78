use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::Error;
use crate::gcp::GCPCredentials;
use crate::inference::providers::provider_trait::GenerationProvider;
use crate::inference::types::{GenerationRequest, GenerationResponse, Usage};

/// Implements a subset of the GCP Vertex Gemini API as documented [here](https://cloud.google.com/vertex-ai/docs/reference/rest/v1/GenerateContentResponse)

const GCP_VERTEX_AUDIENCE: &str = "https://aiplatform.googleapis.com/";

#[derive(Debug)]
pub struct GCPVertexGeminiProvider {
    request_url: Option<String>,
    credentials: Option<GCPCredentials>,
}

impl GCPVertexGeminiProvider {
    pub fn new(
        project_id: Option<String>,
        location: &str,
        model: &str,
        credentials: Option<GCPCredentials>,
    ) -> Self {
        let request_url = project_id.map(|project_id| {
            format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:generateContent"
            )
        });
        Self {
            request_url,
            credentials,
        }
    }

    fn request_url(&self) -> Result<&str, Error> {
        self.request_url.as_deref().ok_or(Error::Config {
            message: "Missing PROJECT_ID for Vertex AI".to_string(),
        })
    }

    fn credentials(&self) -> Result<&GCPCredentials, Error> {
        self.credentials.as_ref().ok_or(Error::GCPCredentials {
            message: "Missing credentials. Set GCP_SERVICE_ACCOUNT_JSON or GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        })
    }
}

impl GenerationProvider for GCPVertexGeminiProvider {
    /// GCP Vertex Gemini non-streaming API request
    async fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
        http_client: &'a reqwest::Client,
    ) -> Result<GenerationResponse, Error> {
        let request_url = self.request_url()?;
        let credentials = self.credentials()?;
        let request_body = GCPVertexGeminiRequest::from(request);
        let token = credentials.get_jwt_token(GCP_VERTEX_AUDIENCE)?;
        let start_time = Instant::now();
        let res = http_client
            .post(request_url)
            .header("Authorization", format!("Bearer {token}"))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::InferenceClient {
                message: format!("Error sending request to GCP Vertex Gemini: {e}"),
            })?;
        let response_time = start_time.elapsed();
        let response_code = res.status();
        let raw_body = res.text().await.map_err(|e| Error::VertexServer {
            message: format!("Error reading response: {e}"),
        })?;
        // A misconfigured project typically answers with an HTML login or
        // consent page rather than a JSON error payload.
        if looks_like_html(&raw_body) {
            return Err(Error::VertexUnexpectedResponse);
        }
        if response_code.is_success() {
            let body: GCPVertexGeminiResponse =
                serde_json::from_str(&raw_body).map_err(|_| Error::VertexUnexpectedResponse)?;
            let body_with_latency = GCPVertexGeminiResponseWithLatency {
                body,
                response_time,
            };
            body_with_latency.try_into()
        } else {
            Err(handle_gcp_vertex_gemini_error(response_code, raw_body))
        }
    }
}

fn looks_like_html(body: &str) -> bool {
    let trimmed = body.trim_start();
    trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html")
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum GCPVertexGeminiRole {
    User,
}

#[derive(Serialize)]
struct GCPVertexGeminiContentPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GCPVertexGeminiContent<'a> {
    role: GCPVertexGeminiRole,
    parts: Vec<GCPVertexGeminiContentPart<'a>>,
}

#[derive(Serialize)]
struct GCPVertexGeminiRequest<'a> {
    contents: Vec<GCPVertexGeminiContent<'a>>,
}

impl<'a> From<&'a GenerationRequest<'a>> for GCPVertexGeminiRequest<'a> {
    fn from(request: &'a GenerationRequest<'a>) -> Self {
        GCPVertexGeminiRequest {
            contents: vec![GCPVertexGeminiContent {
                role: GCPVertexGeminiRole::User,
                parts: vec![GCPVertexGeminiContentPart {
                    text: request.prompt,
                }],
            }],
        }
    }
}

#[derive(Deserialize)]
struct GCPVertexGeminiResponseContentPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GCPVertexGeminiResponseContent {
    parts: Vec<GCPVertexGeminiResponseContentPart>,
}

#[derive(Deserialize)]
struct GCPVertexGeminiResponseCandidate {
    content: Option<GCPVertexGeminiResponseContent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GCPVertexGeminiUsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl From<GCPVertexGeminiUsageMetadata> for Usage {
    fn from(usage_metadata: GCPVertexGeminiUsageMetadata) -> Self {
        Usage {
            input_tokens: usage_metadata.prompt_token_count.unwrap_or_default(),
            output_tokens: usage_metadata.candidates_token_count.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GCPVertexGeminiResponse {
    candidates: Option<Vec<GCPVertexGeminiResponseCandidate>>,
    usage_metadata: Option<GCPVertexGeminiUsageMetadata>,
}

struct GCPVertexGeminiResponseWithLatency {
    body: GCPVertexGeminiResponse,
    response_time: Duration,
}

impl TryFrom<GCPVertexGeminiResponseWithLatency> for GenerationResponse {
    type Error = Error;
    fn try_from(response: GCPVertexGeminiResponseWithLatency) -> Result<Self, Self::Error> {
        let GCPVertexGeminiResponseWithLatency {
            body,
            response_time,
        } = response;
        // The response can contain multiple candidates and each of these can
        // contain multiple content parts. We only use the first candidate but
        // handle all text parts of the response therein.
        let first_candidate = body
            .candidates
            .into_iter()
            .flatten()
            .next()
            .ok_or(Error::VertexServer {
                message: "GCP Vertex Gemini response has no candidates".to_string(),
            })?;
        let mut content: Option<String> = None;
        for part in first_candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
        {
            if let Some(text) = part.text {
                match content {
                    Some(existing) => content = Some(format!("{existing}\n{text}")),
                    None => content = Some(text),
                }
            }
        }
        Ok(GenerationResponse {
            content: content.unwrap_or_default(),
            usage: body.usage_metadata.map(Usage::from).unwrap_or_default(),
            response_time,
        })
    }
}

fn handle_gcp_vertex_gemini_error(response_code: StatusCode, response_body: String) -> Error {
    match response_code {
        StatusCode::UNAUTHORIZED
        | StatusCode::BAD_REQUEST
        | StatusCode::PAYLOAD_TOO_LARGE
        | StatusCode::TOO_MANY_REQUESTS => Error::VertexClient {
            message: response_body,
            status_code: response_code,
        },
        // NOT_FOUND / FORBIDDEN / INTERNAL_SERVER_ERROR / 529: Overloaded
        // all share the same error behavior
        _ => Error::VertexServer {
            message: response_body,
        },
    }
}
