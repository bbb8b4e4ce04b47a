//! Mock backends for testing without a model server.
//!
//! Both mocks return a canned outcome, optionally after a delay, and record
//! every input for assertion in tests. Clones share the recorded state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backends::{ModelPrediction, TextClassifier, TextGenerator};
use crate::error::{BackendError, BackendResult};

/// Mock implementation of [`TextGenerator`].
#[derive(Clone)]
pub struct MockGenerator {
    outcome: Result<String, BackendError>,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            delay: None,
            prompts: Arc::default(),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
            prompts: Arc::default(),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        self.prompts.lock().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Mock implementation of [`TextClassifier`].
///
/// Tracks how many calls are in flight at once so tests can check that
/// inference is serialized.
#[derive(Clone)]
pub struct MockTextClassifier {
    outcome: Result<ModelPrediction, BackendError>,
    delay: Option<Duration>,
    inputs: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockTextClassifier {
    /// Always predict `label` with `confidence`.
    pub fn predicting(label: impl Into<String>, confidence: f64) -> Self {
        Self::with_outcome(Ok(ModelPrediction {
            label: label.into(),
            confidence,
        }))
    }

    /// Always fail with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<ModelPrediction, BackendError>) -> Self {
        Self {
            outcome,
            delay: None,
            inputs: Arc::default(),
            in_flight: Arc::default(),
            max_in_flight: Arc::default(),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Texts received so far.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }

    /// Highest number of concurrent `classify` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for MockTextClassifier {
    async fn classify(&self, text: &str) -> BackendResult<ModelPrediction> {
        self.inputs.lock().push(text.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn model_name(&self) -> &str {
        "mock-sst2"
    }
}
