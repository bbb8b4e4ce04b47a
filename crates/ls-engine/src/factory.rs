//! Build a [`ScoringEngine`] from a [`ScoringConfig`].
//!
//! The classifier is chosen once here and never swapped at runtime.

use std::sync::Arc;

use crate::backends::{GeminiGenerator, HttpTextClassifier, OllamaGenerator, TextGenerator};
use crate::classifier::{IntentClassifier, LocalIntentClassifier, RemoteIntentClassifier};
use crate::config::{ClassifierKind, RemoteBackend, ScoringConfig};
use crate::engine::ScoringEngine;
use crate::error::{BackendError, ConfigError};
use crate::reasoning::ReasoningSynthesizer;

fn backend_config_error(e: BackendError) -> ConfigError {
    ConfigError::Invalid(e.to_string())
}

/// Construct the classifier selected by `config`.
pub fn build_classifier(config: &ScoringConfig) -> Result<Arc<dyn IntentClassifier>, ConfigError> {
    config.validate()?;

    let classifier: Arc<dyn IntentClassifier> = match config.classifier {
        ClassifierKind::Remote => {
            let remote = &config.remote;
            let generator: Box<dyn TextGenerator> = match remote.backend {
                RemoteBackend::Ollama => Box::new(
                    OllamaGenerator::new(remote.host(), remote.model(), remote.timeout())
                        .map_err(backend_config_error)?,
                ),
                RemoteBackend::Gemini => Box::new(
                    GeminiGenerator::new(
                        remote.host(),
                        remote.model(),
                        remote.api_key.clone().unwrap_or_default(),
                        remote.timeout(),
                    )
                    .map_err(backend_config_error)?,
                ),
            };
            tracing::info!(
                backend = generator.backend_name(),
                host = remote.host(),
                model = remote.model(),
                timeout_secs = remote.timeout_secs,
                "remote intent classifier configured"
            );
            Arc::new(RemoteIntentClassifier::new(generator).with_timeout(remote.timeout()))
        }
        ClassifierKind::Local => {
            let local = &config.local;
            let mut model = HttpTextClassifier::new(&local.endpoint, &local.model, local.timeout())
                .map_err(backend_config_error)?;
            if let Some(token) = &local.api_token {
                model = model.with_api_token(token);
            }
            let reasoning = match local.reasoning_seed {
                Some(seed) => ReasoningSynthesizer::with_seed(seed),
                None => ReasoningSynthesizer::new(),
            };
            tracing::info!(
                endpoint = %local.endpoint,
                model = %local.model,
                max_concurrent_inferences = local.max_concurrent_inferences,
                "local intent classifier configured"
            );
            Arc::new(
                LocalIntentClassifier::new(Box::new(model))
                    .with_reasoning(reasoning)
                    .with_max_concurrent_inferences(local.max_concurrent_inferences),
            )
        }
    };
    Ok(classifier)
}

/// Construct an engine with the configured classifier and concurrency cap.
pub fn build_engine(config: &ScoringConfig) -> Result<ScoringEngine, ConfigError> {
    let classifier = build_classifier(config)?;
    Ok(ScoringEngine::new(classifier).with_max_concurrency(config.max_concurrency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_local_engine() {
        let engine = build_engine(&ScoringConfig::default()).unwrap();
        assert_eq!(engine.classifier_variant(), "local");
    }

    #[test]
    fn remote_ollama_engine() {
        let config = ScoringConfig::from_toml_str(r#"classifier = "remote""#).unwrap();
        let engine = build_engine(&config).unwrap();
        assert_eq!(engine.classifier_variant(), "remote");
    }

    #[test]
    fn remote_gemini_engine_with_key() {
        let config = ScoringConfig::from_toml_str(
            r#"
classifier = "remote"
[remote]
backend = "gemini"
api_key = "AIza-test"
"#,
        )
        .unwrap();
        let engine = build_engine(&config).unwrap();
        assert_eq!(engine.classifier_variant(), "remote");
    }

    #[test]
    fn gemini_without_key_rejected() {
        let config = ScoringConfig::from_toml_str(
            r#"
classifier = "remote"
[remote]
backend = "gemini"
"#,
        )
        .unwrap();
        let err = build_classifier(&config).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let config = ScoringConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(build_engine(&config).is_err());
    }
}
