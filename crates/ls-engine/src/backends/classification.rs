//! Text classification over HTTP (Hugging Face inference / TEI `/predict` shape).
//!
//! Request: `{"inputs": "<text>"}`.
//! Response: `[{"label": .., "score": ..}]` or `[[{"label": .., "score": ..}, ..]]`.
//! The highest-scoring entry wins.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ModelPrediction, TextClassifier, build_http_client, check_status};
use crate::error::{BackendError, BackendResult};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/predict";
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Nested(Vec<Vec<RawPrediction>>),
    Flat(Vec<RawPrediction>),
}

impl PredictResponse {
    fn best(self) -> Option<ModelPrediction> {
        let all: Vec<RawPrediction> = match self {
            PredictResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            PredictResponse::Flat(preds) => preds,
        };
        all.into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|p| ModelPrediction {
                label: p.label,
                confidence: p.score,
            })
    }
}

/// Client for a text-classification inference server.
pub struct HttpTextClassifier {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl HttpTextClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> BackendResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint: endpoint.into(),
            model: model.into(),
            api_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

#[async_trait]
impl TextClassifier for HttpTextClassifier {
    async fn classify(&self, text: &str) -> BackendResult<ModelPrediction> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let response = check_status(response).await?;

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(format!("classification response body: {e}")))?;

        parsed
            .best()
            .ok_or_else(|| BackendError::Empty("classifier returned no predictions".into()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
