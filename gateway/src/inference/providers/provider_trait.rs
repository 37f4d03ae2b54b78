use futures::Future;
use reqwest::Client;

use crate::error::Error;
use crate::inference::types::{GenerationRequest, GenerationResponse, OcrRequest, OcrResponse};

/// A provider that turns PDF bytes into extracted plain text.
pub trait OcrProvider {
    fn process<'a>(
        &'a self,
        request: &'a OcrRequest<'a>,
        http_client: &'a Client,
    ) -> impl Future<Output = Result<OcrResponse, Error>> + Send + 'a;
}

/// A provider that turns a rendered prompt into generated text.
pub trait GenerationProvider {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
        http_client: &'a Client,
    ) -> impl Future<Output = Result<GenerationResponse, Error>> + Send + 'a;
}
