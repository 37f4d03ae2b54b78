use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, FromRequest, Json, Request};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config_parser::Config;
use crate::error::Error;

/// State for the API
#[derive(Clone)]
pub struct AppStateData {
    pub config: Arc<Config>,
    pub http_client: Client,
}
pub type AppState = axum::extract::State<AppStateData>;

impl AppStateData {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }
}

/// Custom Axum extractor that validates the JSON body and deserializes it into a custom type
///
/// When this extractor is present, we don't check if the `Content-Type` header is `application/json`,
/// and instead simply assume that the request body is a JSON object.
pub struct StructuredJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for StructuredJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
    T: Send + Sync + DeserializeOwned,
{
    type Rejection = Error;

    #[instrument(skip_all, level = "trace", name = "StructuredJson::from_request")]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Retrieve the request body as Bytes before deserializing it
        let bytes =
            bytes::Bytes::from_request(req, state)
                .await
                .map_err(|e| Error::JsonRequest {
                    message: format!("{} ({})", e, e.status()),
                })?;

        // Convert the entire body into `serde_json::Value`
        let value = Json::<serde_json::Value>::from_bytes(&bytes)
            .map_err(|e| Error::JsonRequest {
                message: format!("{} ({})", e, e.status()),
            })?
            .0;

        // Now use `serde_path_to_error::deserialize` to attempt deserialization into `T`
        let deserialized: T =
            serde_path_to_error::deserialize(&value).map_err(|e| Error::JsonRequest {
                message: e.to_string(),
            })?;

        Ok(StructuredJson(deserialized))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    /// An app state wired to the dummy providers for handler tests.
    pub(crate) fn test_app_state(
        ocr_scenario: &str,
        generation_scenario: &str,
    ) -> AppStateData {
        let config = Config::from_lookup(|key| match key {
            "OCR_PROVIDER" | "GENERATION_PROVIDER" => Some("dummy".to_string()),
            "DUMMY_OCR_SCENARIO" => Some(ocr_scenario.to_string()),
            "DUMMY_GENERATION_SCENARIO" => Some(generation_scenario.to_string()),
            _ => None,
        })
        .unwrap();
        AppStateData::new(Arc::new(config))
    }

    #[derive(Deserialize)]
    struct TestParams {
        message: String,
    }

    #[tokio::test]
    async fn test_structured_json_valid() {
        let request = Request::builder()
            .body(Body::from(r#"{"message": "hello"}"#))
            .unwrap();
        let StructuredJson(params) = StructuredJson::<TestParams>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(params.message, "hello");
    }

    #[tokio::test]
    async fn test_structured_json_invalid_body() {
        let request = Request::builder()
            .body(Body::from("not json"))
            .unwrap();
        let error = StructuredJson::<TestParams>::from_request(request, &())
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(error, Error::JsonRequest { .. }));
    }

    #[tokio::test]
    async fn test_structured_json_reports_field_path() {
        let request = Request::builder()
            .body(Body::from(r#"{"message": 42}"#))
            .unwrap();
        let error = StructuredJson::<TestParams>::from_request(request, &())
            .await
            .map(|_| ())
            .unwrap_err();
        match error {
            Error::JsonRequest { message } => assert!(message.contains("message")),
            _ => panic!("expected JsonRequest error"),
        }
    }
}
