//! Rust client for the Lexigate legal document gateway.
//!
//! [`Client`] is a thin HTTP wrapper over the gateway's endpoints, and
//! [`session::DocumentSession`] layers the upload workflow and chat state on
//! top of it.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub mod session;

pub use session::{
    ChatMessage, DocumentSession, MessageRole, UploadError, UploadState, MAX_FILE_SIZE_BYTES,
    PDF_MIME_TYPE, SUGGESTED_QUESTIONS,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
    #[error("Error sending request to gateway: {0}")]
    Http(#[from] reqwest::Error),
    /// The gateway answered with an `{"error": ...}` body.
    #[error("{message}")]
    Api {
        status_code: StatusCode,
        message: String,
    },
    #[error("Failed to parse gateway response: {0}")]
    InvalidResponse(String),
}

/// The gateway's document operations.
///
/// [`Client`] is the production implementation; tests substitute their own.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn extract_text(&self, file_base64: &str) -> Result<String, ClientError>;
    async fn summarize(&self, document_text: &str) -> Result<String, ClientError>;
    async fn ask(&self, document_text: &str, question: &str) -> Result<String, ClientError>;
}

#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http_client: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // A base URL without a trailing slash would drop its last path
        // segment in `Url::join`
        let mut base_url: Url = base_url
            .parse()
            .map_err(|e| ClientError::InvalidUrl(format!("{e}")))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            base_url,
            http_client: reqwest::Client::new(),
        })
    }

    async fn post<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<R, ClientError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{e}")))?;
        let response = self.http_client.post(url).json(body).send().await?;
        let status_code = response.status();
        if !status_code.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error_response) => error_response.error,
                Err(_) => format!("Request failed with status {status_code}"),
            };
            tracing::warn!(%status_code, message, "gateway request failed");
            return Err(ClientError::Api {
                status_code,
                message,
            });
        }
        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("{e}")))
    }
}

#[async_trait]
impl DocumentApi for Client {
    async fn extract_text(&self, file_base64: &str) -> Result<String, ClientError> {
        let response: ExtractTextResponse = self
            .post(
                "extract-text",
                &ExtractTextParams {
                    file_base64: Some(file_base64),
                },
            )
            .await?;
        Ok(response.text)
    }

    async fn summarize(&self, document_text: &str) -> Result<String, ClientError> {
        let response: SummarizeResponse = self
            .post(
                "summarize",
                &SummarizeParams {
                    document_text: Some(document_text),
                },
            )
            .await?;
        Ok(response.summary)
    }

    async fn ask(&self, document_text: &str, question: &str) -> Result<String, ClientError> {
        let response: AskResponse = self
            .post(
                "ask",
                &AskParams {
                    document_text: Some(document_text),
                    question: Some(question),
                },
            )
            .await?;
        Ok(response.answer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractTextParams<'a> {
    file_base64: Option<&'a str>,
}

#[derive(Deserialize)]
struct ExtractTextResponse {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeParams<'a> {
    document_text: Option<&'a str>,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskParams<'a> {
    document_text: Option<&'a str>,
    question: Option<&'a str>,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_client_normalizes_base_url() {
        let client = Client::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.base_url.join("extract-text").unwrap().as_str(),
            "http://localhost:3000/extract-text"
        );

        let client = Client::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            client.base_url.join("ask").unwrap().as_str(),
            "http://localhost:3000/api/ask"
        );
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_request_bodies_are_camel_case() {
        let params = ExtractTextParams {
            file_base64: Some("cGRmIGJ5dGVz"),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"fileBase64": "cGRmIGJ5dGVz"})
        );

        let params = AskParams {
            document_text: Some("lease"),
            question: Some("How much is rent?"),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"documentText": "lease", "question": "How much is rent?"})
        );
    }

    #[test]
    fn test_error_response_parsing() {
        let error_response: ErrorResponse =
            serde_json::from_str(r#"{"error": "Missing fileBase64"}"#).unwrap();
        assert_eq!(error_response.error, "Missing fileBase64");
    }
}
