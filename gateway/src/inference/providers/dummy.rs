use std::sync::Mutex;
use std::time::Duration;

use lazy_static::lazy_static;

use crate::error::Error;
use crate::inference::providers::provider_trait::{GenerationProvider, OcrProvider};
use crate::inference::types::{
    GenerationRequest, GenerationResponse, OcrRequest, OcrResponse, Usage,
};

/// Test-only providers that never touch the network.
///
/// The `model_name` / `processor_name` selects a canned scenario: "error"
/// fails the request, "empty" returns empty output, and anything else
/// succeeds with fixed content.

#[derive(Debug, Default)]
pub struct DummyOcrProvider {
    processor_name: String,
    captured_documents: Mutex<Vec<String>>,
}

impl DummyOcrProvider {
    pub fn new(processor_name: String) -> Self {
        Self {
            processor_name,
            captured_documents: Mutex::new(Vec::new()),
        }
    }

    /// The base64 payloads received so far, in order.
    pub fn captured_documents(&self) -> Vec<String> {
        self.captured_documents
            .lock()
            .map(|documents| documents.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct DummyGenerationProvider {
    model_name: String,
    captured_prompts: Mutex<Vec<String>>,
}

impl DummyGenerationProvider {
    pub fn new(model_name: String) -> Self {
        Self {
            model_name,
            captured_prompts: Mutex::new(Vec::new()),
        }
    }

    /// The rendered prompts received so far, in order.
    pub fn captured_prompts(&self) -> Vec<String> {
        self.captured_prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

pub static DUMMY_EXTRACTED_TEXT: &str = "Rent is $1000/month due on the 1st";
pub static DUMMY_SUMMARY: &str = "• Rent: $1000/month, due on the 1st of each month";
pub static DUMMY_ANSWER: &str = "The rent is $1000 per month.";
lazy_static! {
    pub static ref DUMMY_USAGE: Usage = Usage {
        input_tokens: 10,
        output_tokens: 10,
    };
}
const DUMMY_RESPONSE_TIME: Duration = Duration::from_millis(100);

impl OcrProvider for DummyOcrProvider {
    async fn process<'a>(
        &'a self,
        request: &'a OcrRequest<'a>,
        _http_client: &'a reqwest::Client,
    ) -> Result<OcrResponse, Error> {
        if let Ok(mut documents) = self.captured_documents.lock() {
            documents.push(request.file_base64.to_string());
        }
        if self.processor_name == "error" {
            return Err(Error::InferenceClient {
                message: "Error sending request to Dummy provider.".to_string(),
            });
        }
        let text = if self.processor_name == "empty" {
            String::new()
        } else {
            DUMMY_EXTRACTED_TEXT.to_string()
        };
        Ok(OcrResponse {
            text,
            response_time: DUMMY_RESPONSE_TIME,
        })
    }
}

impl GenerationProvider for DummyGenerationProvider {
    async fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
        _http_client: &'a reqwest::Client,
    ) -> Result<GenerationResponse, Error> {
        if let Ok(mut prompts) = self.captured_prompts.lock() {
            prompts.push(request.prompt.to_string());
        }
        if self.model_name == "error" {
            return Err(Error::InferenceClient {
                message: "Error sending request to Dummy provider.".to_string(),
            });
        }
        let content = if self.model_name == "empty" {
            String::new()
        } else if request.prompt.contains("User Question:") {
            DUMMY_ANSWER.to_string()
        } else {
            DUMMY_SUMMARY.to_string()
        };
        Ok(GenerationResponse {
            content,
            usage: DUMMY_USAGE.clone(),
            response_time: DUMMY_RESPONSE_TIME,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_dummy_ocr_success() {
        let provider = DummyOcrProvider::new("good".to_string());
        let request = OcrRequest {
            file_base64: "cGRmIGJ5dGVz",
            mime_type: "application/pdf",
        };
        let response = provider
            .process(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.text, DUMMY_EXTRACTED_TEXT);
        assert_eq!(provider.captured_documents(), vec!["cGRmIGJ5dGVz"]);
    }

    #[tokio::test]
    async fn test_dummy_ocr_empty() {
        let provider = DummyOcrProvider::new("empty".to_string());
        let request = OcrRequest {
            file_base64: "cGRmIGJ5dGVz",
            mime_type: "application/pdf",
        };
        let response = provider
            .process(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.text, "");
    }

    #[tokio::test]
    async fn test_dummy_ocr_error() {
        let provider = DummyOcrProvider::new("error".to_string());
        let request = OcrRequest {
            file_base64: "cGRmIGJ5dGVz",
            mime_type: "application/pdf",
        };
        let error = provider
            .process(&request, &reqwest::Client::new())
            .await
            .unwrap_err();
        assert_eq!(
            error,
            Error::InferenceClient {
                message: "Error sending request to Dummy provider.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_dummy_generation_answers_questions() {
        let provider = DummyGenerationProvider::new("good".to_string());
        let request = GenerationRequest {
            prompt: "Document:\nlease\n\nUser Question: how much is rent?\n\nAnswer:",
        };
        let response = provider
            .generate(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.content, DUMMY_ANSWER);
        assert_eq!(response.usage, *DUMMY_USAGE);
        assert_eq!(provider.captured_prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_dummy_generation_summarizes() {
        let provider = DummyGenerationProvider::new("good".to_string());
        let request = GenerationRequest {
            prompt: "Summarize the following.\n\nDocument:\nlease",
        };
        let response = provider
            .generate(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.content, DUMMY_SUMMARY);
    }
}
