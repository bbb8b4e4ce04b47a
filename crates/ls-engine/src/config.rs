//! Scoring configuration, loadable from TOML with environment overrides.

use std::time::Duration;

use serde::Deserialize;

use crate::backends::{classification, gemini};
use crate::engine::DEFAULT_MAX_CONCURRENCY;
use crate::error::ConfigError;

/// Which intent classifier the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Prompt a text-generation service.
    Remote,
    /// Run a text-classification model.
    #[default]
    Local,
}

impl ClassifierKind {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Some(Self::Remote),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Text-generation service behind the remote classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteBackend {
    #[default]
    Ollama,
    Gemini,
}

impl RemoteBackend {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn default_host(self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::Gemini => gemini::DEFAULT_BASE_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Ollama => "phi3:mini",
            Self::Gemini => gemini::DEFAULT_MODEL,
        }
    }
}

/// Settings for the remote (text-generation) classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub backend: RemoteBackend,
    /// Base URL. Defaults per backend.
    #[serde(default)]
    pub host: Option<String>,
    /// Model name. Defaults per backend.
    #[serde(default)]
    pub model: Option<String>,
    /// Required for Gemini.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Upper bound on one generation call, in seconds.
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_remote_timeout_secs() -> u64 {
    10
}

impl RemoteConfig {
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or_else(|| self.backend.default_host())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            backend: RemoteBackend::default(),
            host: None,
            model: None,
            api_key: None,
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

/// Settings for the local (text-classification) classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalConfig {
    /// Classification server URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier, for logging.
    #[serde(default = "default_local_model")]
    pub model: String,
    /// Bearer token for hosted inference endpoints.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_local_timeout_secs")]
    pub timeout_secs: u64,
    /// Concurrent model calls allowed per instance.
    #[serde(default = "default_max_concurrent_inferences")]
    pub max_concurrent_inferences: usize,
    /// Fixed seed for reasoning template selection. Unset in production.
    #[serde(default)]
    pub reasoning_seed: Option<u64>,
}

fn default_endpoint() -> String {
    classification::DEFAULT_ENDPOINT.into()
}
fn default_local_model() -> String {
    classification::DEFAULT_MODEL.into()
}
fn default_local_timeout_secs() -> u64 {
    10
}
fn default_max_concurrent_inferences() -> usize {
    1
}

impl LocalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_local_model(),
            api_token: None,
            timeout_secs: default_local_timeout_secs(),
            max_concurrent_inferences: default_max_concurrent_inferences(),
            reasoning_seed: None,
        }
    }
}

/// Top-level scoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub classifier: ClassifierKind,
    /// Leads scored at the same time within a batch.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            max_concurrency: default_max_concurrency(),
            remote: RemoteConfig::default(),
            local: LocalConfig::default(),
        }
    }
}

impl ScoringConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from process environment variables.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`:
    ///
    /// | variable | field |
    /// |---|---|
    /// | `LS_CLASSIFIER` | `classifier` (`remote` / `local`) |
    /// | `LS_MAX_CONCURRENCY` | `max_concurrency` |
    /// | `LS_REMOTE_BACKEND` | `remote.backend` (`ollama` / `gemini`) |
    /// | `OLLAMA_HOST` | `remote.host` when the backend is Ollama |
    /// | `GEMINI_API_KEY` | `remote.api_key` when unset |
    /// | `LS_CLASSIFIER_ENDPOINT` | `local.endpoint` |
    /// | `HF_API_TOKEN` | `local.api_token` when unset |
    ///
    /// Unparseable values are ignored with a warning.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("LS_CLASSIFIER") {
            match ClassifierKind::from_str_opt(&v) {
                Some(kind) => self.classifier = kind,
                None => tracing::warn!(value = %v, "ignoring unknown LS_CLASSIFIER"),
            }
        }
        if let Some(v) = lookup("LS_MAX_CONCURRENCY") {
            match v.parse() {
                Ok(n) => self.max_concurrency = n,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid LS_MAX_CONCURRENCY"),
            }
        }
        if let Some(v) = lookup("LS_REMOTE_BACKEND") {
            match RemoteBackend::from_str_opt(&v) {
                Some(backend) => self.remote.backend = backend,
                None => tracing::warn!(value = %v, "ignoring unknown LS_REMOTE_BACKEND"),
            }
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            if self.remote.backend == RemoteBackend::Ollama {
                self.remote.host = Some(host);
            }
        }
        if self.remote.api_key.is_none() {
            self.remote.api_key = lookup("GEMINI_API_KEY");
        }
        if let Some(endpoint) = lookup("LS_CLASSIFIER_ENDPOINT") {
            self.local.endpoint = endpoint;
        }
        if self.local.api_token.is_none() {
            self.local.api_token = lookup("HF_API_TOKEN");
        }
        self
    }

    /// Reject settings that cannot produce a working engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be at least 1".into()));
        }
        match self.classifier {
            ClassifierKind::Remote => {
                if self.remote.timeout_secs == 0 {
                    return Err(ConfigError::Invalid("remote.timeout_secs must be at least 1".into()));
                }
                if self.remote.backend == RemoteBackend::Gemini
                    && self.remote.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
                {
                    return Err(ConfigError::Invalid(
                        "remote.api_key (or GEMINI_API_KEY) is required for the gemini backend".into(),
                    ));
                }
            }
            ClassifierKind::Local => {
                if self.local.max_concurrent_inferences == 0 {
                    return Err(ConfigError::Invalid(
                        "local.max_concurrent_inferences must be at least 1".into(),
                    ));
                }
                if self.local.endpoint.trim().is_empty() {
                    return Err(ConfigError::Invalid("local.endpoint must not be empty".into()));
                }
            }
        }
        Ok(())
    }
}
