//! Ollama text generation via `/api/generate`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{TextGenerator, build_http_client, check_status};
use crate::error::{BackendError, BackendResult};

/// Ollama generate API request body.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama generate API response (only fields we need).
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for an Ollama HTTP endpoint.
pub struct OllamaGenerator {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(
        host: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> BackendResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            host: host.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        let url = format!("{}/api/generate", self.host);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let response = check_status(response).await?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(format!("ollama response body: {e}")))?;

        if parsed.response.trim().is_empty() {
            return Err(BackendError::Empty("ollama returned no text".into()));
        }
        Ok(parsed.response)
    }

    fn backend_name(&self) -> &str {
        "ollama"
    }
}
