use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::Error;
use crate::gcp::GCPCredentials;
use crate::inference::providers::provider_trait::OcrProvider;
use crate::inference::types::{OcrRequest, OcrResponse};

/// Implements the `processDocument` method of the Google Document AI API as
/// documented [here](https://cloud.google.com/document-ai/docs/reference/rest/v1/projects.locations.processors/process)

const DOCUMENT_AI_AUDIENCE: &str = "https://documentai.googleapis.com/";

#[derive(Debug)]
pub struct DocumentAIProvider {
    processor_name: Option<String>,
    credentials: Option<GCPCredentials>,
}

impl DocumentAIProvider {
    pub fn new(processor_name: Option<String>, credentials: Option<GCPCredentials>) -> Self {
        Self {
            processor_name,
            credentials,
        }
    }

    fn processor_name(&self) -> Result<&str, Error> {
        self.processor_name.as_deref().ok_or(Error::Config {
            message: "Missing processor configuration. Set either PROCESSOR_ENDPOINT or PROJECT_ID/LOCATION/PROCESSOR_ID".to_string(),
        })
    }

    fn credentials(&self) -> Result<&GCPCredentials, Error> {
        self.credentials.as_ref().ok_or(Error::GCPCredentials {
            message: "Missing credentials. Set GCP_SERVICE_ACCOUNT_JSON or GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        })
    }
}

/// The processor resource name embeds its region, which selects the regional
/// API host (e.g. `eu-documentai.googleapis.com`).
fn processor_location(processor_name: &str) -> &str {
    processor_name
        .split('/')
        .skip_while(|segment| *segment != "locations")
        .nth(1)
        .unwrap_or("us")
}

fn request_url(processor_name: &str) -> String {
    let location = processor_location(processor_name);
    format!("https://{location}-documentai.googleapis.com/v1/{processor_name}:process")
}

impl OcrProvider for DocumentAIProvider {
    async fn process<'a>(
        &'a self,
        request: &'a OcrRequest<'a>,
        http_client: &'a reqwest::Client,
    ) -> Result<OcrResponse, Error> {
        let processor_name = self.processor_name()?;
        let credentials = self.credentials()?;
        let request_body = DocumentAIProcessRequest {
            raw_document: RawDocument {
                content: request.file_base64,
                mime_type: request.mime_type,
            },
        };
        let token = credentials.get_jwt_token(DOCUMENT_AI_AUDIENCE)?;
        let start_time = Instant::now();
        let res = http_client
            .post(request_url(processor_name))
            .header("Authorization", format!("Bearer {token}"))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::InferenceClient {
                message: format!("Error sending request to Document AI: {e}"),
            })?;
        let response_time = start_time.elapsed();
        if res.status().is_success() {
            let body =
                res.json::<DocumentAIProcessResponse>()
                    .await
                    .map_err(|e| Error::DocumentAIServer {
                        message: format!("Error parsing response: {e}"),
                    })?;
            let text = body
                .document
                .and_then(|document| document.text)
                .unwrap_or_default();
            Ok(OcrResponse {
                text,
                response_time,
            })
        } else {
            let response_code = res.status();
            let error_body = res.text().await.map_err(|e| Error::DocumentAIServer {
                message: format!("Error parsing response: {e}"),
            })?;
            Err(handle_document_ai_error(response_code, error_body))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentAIProcessRequest<'a> {
    raw_document: RawDocument<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument<'a> {
    content: &'a str,
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct DocumentAIProcessResponse {
    document: Option<Document>,
}

#[derive(Deserialize)]
struct Document {
    text: Option<String>,
}

fn handle_document_ai_error(response_code: StatusCode, response_body: String) -> Error {
    match response_code {
        // PERMISSION_DENIED / UNAUTHENTICATED
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::DocumentAIAuth,
        // INVALID_ARGUMENT, e.g. a malformed processor path
        StatusCode::BAD_REQUEST => Error::DocumentAIInvalidArgument,
        _ => Error::DocumentAIServer {
            message: response_body,
        },
    }
}
