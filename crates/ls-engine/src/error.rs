//! Error types for backends, classifiers and configuration.

use thiserror::Error;

/// Failures talking to a text-generation or text-classification backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("undecodable response: {0}")]
    Decode(String),

    #[error("empty response: {0}")]
    Empty(String),

    #[error("backend configuration error: {0}")]
    Config(String),
}

/// Convenience alias for backend results.
pub type BackendResult<T> = Result<T, BackendError>;

/// Why a classifier could not produce a verdict.
///
/// The rendered message is what ends up in the reasoning of a fail-safe
/// result, so every variant carries the "analysis failed:" marker.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("AI analysis failed: {0}")]
    Generation(#[source] BackendError),

    #[error("Local model analysis failed: {0}")]
    Model(#[source] BackendError),

    #[error("Local model analysis failed: confidence {0} outside [0, 1]")]
    InvalidConfidence(f64),

    #[error("AI analysis failed: timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("AI analysis failed: scoring task aborted: {0}")]
    Aborted(String),
}

/// Convenience alias for classifier results.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors loading or validating a [`crate::config::ScoringConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid TOML: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
