//! Universal request/response types shared by the upstream providers.
//!
//! These isolate the endpoint handlers from the wire formats of the concrete
//! services (Document AI, Vertex AI Gemini, and the dummy test providers).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single OCR request: base64 PDF bytes plus their MIME type.
#[derive(Clone, Debug)]
pub struct OcrRequest<'a> {
    pub file_base64: &'a str,
    pub mime_type: &'a str,
}

/// The extracted plain text of a document.
///
/// `text` may be empty; the endpoint decides whether that is an error.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrResponse {
    pub text: String,
    pub response_time: Duration,
}

/// A single generation request: the fully-rendered prompt.
#[derive(Clone, Debug)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
}

/// The generated text of the model's first candidate, unmodified.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResponse {
    pub content: String,
    pub usage: Usage,
    pub response_time: Duration,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
