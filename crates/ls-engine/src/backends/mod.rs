//! Model backends consumed by the intent classifiers.
//!
//! Two capabilities, each a single HTTP round trip:
//! - [`TextGenerator`]: prompt in, free text out (Ollama, Gemini).
//! - [`TextClassifier`]: text in, `(label, confidence)` out (a Hugging Face
//!   style text-classification server).

pub mod classification;
pub mod gemini;
pub mod ollama;

use async_trait::async_trait;

use crate::error::{BackendError, BackendResult};

pub use classification::HttpTextClassifier;
pub use gemini::GeminiGenerator;
pub use ollama::OllamaGenerator;

/// A generative text service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> BackendResult<String>;

    /// Name of this backend (for logging).
    fn backend_name(&self) -> &str;
}

/// Output of a text-classification model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    /// Model-specific label (e.g. "POSITIVE").
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// A text-classification model.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> BackendResult<ModelPrediction>;

    /// Model identifier (for logging).
    fn model_name(&self) -> &str;
}

/// Turn a non-2xx response into a [`BackendError::Status`], keeping the body for diagnostics.
pub(crate) async fn check_status(response: reqwest::Response) -> BackendResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn build_http_client(timeout: std::time::Duration) -> BackendResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BackendError::Config(format!("failed to build HTTP client: {e}")))
}
