use reqwest::Client;

use crate::error::Error;
use crate::inference::providers::document_ai::DocumentAIProvider;
use crate::inference::providers::dummy::{DummyGenerationProvider, DummyOcrProvider};
use crate::inference::providers::gcp_vertex::GCPVertexGeminiProvider;
use crate::inference::providers::provider_trait::{GenerationProvider, OcrProvider};
use crate::inference::types::{GenerationRequest, GenerationResponse, OcrRequest, OcrResponse};

/// The configured upstream OCR service.
#[derive(Debug)]
pub enum OcrProviderConfig {
    DocumentAI(DocumentAIProvider),
    Dummy(DummyOcrProvider),
}

impl OcrProviderConfig {
    pub async fn process(
        &self,
        request: &OcrRequest<'_>,
        http_client: &Client,
    ) -> Result<OcrResponse, Error> {
        match self {
            OcrProviderConfig::DocumentAI(provider) => provider.process(request, http_client).await,
            OcrProviderConfig::Dummy(provider) => provider.process(request, http_client).await,
        }
    }
}

/// The configured upstream text generation service.
#[derive(Debug)]
pub enum GenerationProviderConfig {
    GCPVertexGemini(GCPVertexGeminiProvider),
    Dummy(DummyGenerationProvider),
}

impl GenerationProviderConfig {
    pub async fn generate(
        &self,
        request: &GenerationRequest<'_>,
        http_client: &Client,
    ) -> Result<GenerationResponse, Error> {
        match self {
            GenerationProviderConfig::GCPVertexGemini(provider) => {
                provider.generate(request, http_client).await
            }
            GenerationProviderConfig::Dummy(provider) => {
                provider.generate(request, http_client).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::inference::providers::dummy::{DUMMY_EXTRACTED_TEXT, DUMMY_SUMMARY};

    #[tokio::test]
    async fn test_ocr_dispatch_to_dummy() {
        let provider = OcrProviderConfig::Dummy(DummyOcrProvider::new("good".to_string()));
        let request = OcrRequest {
            file_base64: "cGRmIGJ5dGVz",
            mime_type: "application/pdf",
        };
        let response = provider
            .process(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.text, DUMMY_EXTRACTED_TEXT);
    }

    #[tokio::test]
    async fn test_generation_dispatch_to_dummy() {
        let provider =
            GenerationProviderConfig::Dummy(DummyGenerationProvider::new("good".to_string()));
        let request = GenerationRequest {
            prompt: "Summarize the following.",
        };
        let response = provider
            .generate(&request, &reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.content, DUMMY_SUMMARY);
    }
}
