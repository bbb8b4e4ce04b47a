//! Lead scoring engine library crate.
//!
//! Combines a deterministic rule score with an intent classification
//! produced by one of two pluggable classifiers (remote text generation or
//! a local text-classification model). Re-exports all modules so the binary
//! and `ls-e2e-tests` can reach `ScoringEngine`, the classifiers and the
//! HTTP backends.

pub mod backends;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod mock;
pub mod reasoning;
pub mod rules;

pub use classifier::{Classification, IntentClassifier, LocalIntentClassifier, RemoteIntentClassifier};
pub use config::ScoringConfig;
pub use engine::ScoringEngine;
pub use error::{BackendError, BackendResult, ClassifierError, ClassifierResult, ConfigError};
pub use reasoning::ReasoningSynthesizer;
pub use rules::{RuleBreakdown, RuleScorer};
