//! Local intent classifier: text-classification model plus keyword heuristic.
//!
//! The model sees a short plain-text prompt and returns `(label, confidence)`.
//! Only the confidence feeds the tier decision; the label is logged and
//! otherwise ignored. Reasoning comes from the [`ReasoningSynthesizer`].
//!
//! A model instance may not be reentrant, so calls go through a semaphore
//! (one permit by default).

use async_trait::async_trait;
use tokio::sync::Semaphore;

use ls_protocol::{IntentTier, LeadAttributes, OfferAttributes};

use super::{Classification, IntentClassifier};
use crate::backends::TextClassifier;
use crate::error::{BackendError, ClassifierError, ClassifierResult};
use crate::reasoning::ReasoningSynthesizer;
use crate::rules::matches_any;

/// Model input bound, in characters.
pub const MAX_PROMPT_CHARS: usize = 512;

/// Roles that push a confident prediction to High.
pub const SENIOR_ROLES: &[&str] = &[
    "ceo", "cto", "vp", "director", "head", "founder", "manager",
];

/// Industries that push a very confident prediction to High.
pub const TECH_INDUSTRIES: &[&str] = &[
    "technology",
    "saas",
    "software",
    "ai",
    "artificial intelligence",
    "cloud",
];

const HIGH_WITH_ROLE_OR_INDUSTRY: f64 = 0.85;
const HIGH_WITH_ROLE: f64 = 0.75;
const MEDIUM: f64 = 0.6;

/// Classifier backed by a local text-classification model.
pub struct LocalIntentClassifier {
    model: Box<dyn TextClassifier>,
    reasoning: ReasoningSynthesizer,
    inference_slots: Semaphore,
}

impl LocalIntentClassifier {
    pub fn new(model: Box<dyn TextClassifier>) -> Self {
        Self {
            model,
            reasoning: ReasoningSynthesizer::new(),
            inference_slots: Semaphore::new(1),
        }
    }

    pub fn with_reasoning(mut self, reasoning: ReasoningSynthesizer) -> Self {
        self.reasoning = reasoning;
        self
    }

    /// Allow up to `n` concurrent model calls (minimum 1).
    pub fn with_max_concurrent_inferences(mut self, n: usize) -> Self {
        self.inference_slots = Semaphore::new(n.max(1));
        self
    }
}

#[async_trait]
impl IntentClassifier for LocalIntentClassifier {
    async fn classify(
        &self,
        lead: &LeadAttributes,
        offer: &OfferAttributes,
    ) -> ClassifierResult<Classification> {
        let prompt = build_prompt(lead, offer);

        let prediction = {
            let _permit = self.inference_slots.acquire().await.map_err(|e| {
                ClassifierError::Model(BackendError::Config(format!("inference slots closed: {e}")))
            })?;
            self.model
                .classify(&prompt)
                .await
                .map_err(ClassifierError::Model)?
        };

        let confidence = prediction.confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ClassifierError::InvalidConfidence(confidence));
        }

        let intent = decide_intent(lead, confidence);
        tracing::debug!(
            model = self.model.model_name(),
            label = %prediction.label,
            confidence,
            intent = %intent,
            "local classification complete"
        );

        let reasoning = self.reasoning.synthesize(lead, offer, intent);
        Ok(Classification::new(intent, reasoning))
    }

    fn variant_name(&self) -> &str {
        "local"
    }
}

/// Short plain-text model input, truncated to [`MAX_PROMPT_CHARS`].
pub fn build_prompt(lead: &LeadAttributes, offer: &OfferAttributes) -> String {
    let prompt = format!(
        "Analyze buying intent for this prospect:\nRole: {}\nIndustry: {}\nCompany: {}\nOffer: {}\n",
        lead.role, lead.industry, lead.company, offer.name
    );
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((cut, _)) => prompt[..cut].to_string(),
        None => prompt,
    }
}

/// Tier from model confidence and lead keywords. Rules are checked in order.
pub fn decide_intent(lead: &LeadAttributes, confidence: f64) -> IntentTier {
    let role = lead.role.to_lowercase();
    let industry = lead.industry.to_lowercase();
    let senior_role = matches_any(&role, SENIOR_ROLES);
    let tech_industry = matches_any(&industry, TECH_INDUSTRIES);

    if confidence > HIGH_WITH_ROLE_OR_INDUSTRY && (senior_role || tech_industry) {
        IntentTier::High
    } else if confidence > HIGH_WITH_ROLE && senior_role {
        IntentTier::High
    } else if confidence > MEDIUM {
        IntentTier::Medium
    } else {
        IntentTier::Low
    }
}
