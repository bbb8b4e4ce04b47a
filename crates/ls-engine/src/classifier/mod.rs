//! Intent classification for leads.
//!
//! Maps a lead + offer to a {High, Medium, Low} verdict with reasoning.
//!
//! Two variants, chosen at construction time:
//! - **Remote** ([`RemoteIntentClassifier`]): prompt a text-generation
//!   service and parse its `Intent:` / `Reasoning:` reply.
//! - **Local** ([`LocalIntentClassifier`]): run a text-classification model
//!   and derive the tier from its confidence plus role/industry keywords.
//!
//! Classifiers report failures as [`ClassifierError`]; turning those into a
//! Low verdict is the caller's job (see [`Classification::fail_safe`]).

pub mod local;
pub mod remote;

use async_trait::async_trait;
use ls_protocol::{IntentTier, LeadAttributes, OfferAttributes};

use crate::error::{ClassifierError, ClassifierResult};

pub use local::LocalIntentClassifier;
pub use remote::RemoteIntentClassifier;

/// A classifier verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: IntentTier,
    pub reasoning: String,
    /// Always `intent.model_score()`.
    pub model_score: u32,
}

impl Classification {
    pub fn new(intent: IntentTier, reasoning: impl Into<String>) -> Self {
        Self {
            intent,
            reasoning: reasoning.into(),
            model_score: intent.model_score(),
        }
    }

    /// Low verdict whose reasoning is the diagnostic for `error`.
    pub fn fail_safe(error: &ClassifierError) -> Self {
        Self::new(IntentTier::Low, error.to_string())
    }
}

/// Trait for intent classifiers.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(
        &self,
        lead: &LeadAttributes,
        offer: &OfferAttributes,
    ) -> ClassifierResult<Classification>;

    /// Name of this variant (for logging).
    fn variant_name(&self) -> &str;

    /// Like [`IntentClassifier::classify`] but never fails: errors become
    /// [`Classification::fail_safe`]. The engine scores every lead through this.
    async fn classify_or_fail_safe(
        &self,
        lead: &LeadAttributes,
        offer: &OfferAttributes,
    ) -> Classification {
        match self.classify(lead, offer).await {
            Ok(classification) => classification,
            Err(e) => {
                tracing::warn!(
                    lead = %lead.name,
                    variant = self.variant_name(),
                    error = %e,
                    "intent classification failed, scoring lead as Low"
                );
                Classification::fail_safe(&e)
            }
        }
    }
}

/// Render an attribute for a prompt, substituting `N/A` for missing values.
pub(crate) fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}
