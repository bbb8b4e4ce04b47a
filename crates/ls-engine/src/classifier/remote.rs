//! Remote intent classifier: prompts a text-generation service.
//!
//! The model is asked to answer in exactly two labeled lines:
//!
//! ```text
//! Intent: High
//! Reasoning: <1-2 sentences>
//! ```
//!
//! The parser is lenient: case-insensitive labels, extra whitespace, and
//! multi-line reasoning are all accepted. Anything unrecognized becomes Low.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::time::timeout;

use ls_protocol::{IntentTier, LeadAttributes, OfferAttributes};

use super::{Classification, IntentClassifier, or_na};
use crate::backends::TextGenerator;
use crate::error::{ClassifierError, ClassifierResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasoning used when the reply carries no `Reasoning:` line.
pub const NO_REASONING: &str = "No reasoning provided";

static RE_INTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Intent:\s*(High|Medium|Low)").unwrap());

static RE_REASONING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Reasoning:\s*(.+)").unwrap());

/// Classifier backed by a generative text service.
pub struct RemoteIntentClassifier {
    generator: Box<dyn TextGenerator>,
    timeout: Duration,
}

impl RemoteIntentClassifier {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound on one generation call. Exceeding it yields a fail-safe error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl IntentClassifier for RemoteIntentClassifier {
    async fn classify(
        &self,
        lead: &LeadAttributes,
        offer: &OfferAttributes,
    ) -> ClassifierResult<Classification> {
        let prompt = build_prompt(lead, offer);

        let text = match timeout(self.timeout, self.generator.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(ClassifierError::Generation(e)),
            Err(_) => {
                tracing::warn!(
                    backend = self.generator.backend_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "text generation timed out"
                );
                return Err(ClassifierError::Timeout {
                    millis: self.timeout.as_millis() as u64,
                });
            }
        };

        let (intent, reasoning) = parse_response(&text);
        tracing::debug!(
            backend = self.generator.backend_name(),
            intent = %intent,
            "remote classification complete"
        );
        Ok(Classification::new(intent, reasoning))
    }

    fn variant_name(&self) -> &str {
        "remote"
    }
}

/// Build the classification prompt. Missing values render as `N/A`.
pub fn build_prompt(lead: &LeadAttributes, offer: &OfferAttributes) -> String {
    format!(
        "Analyze the buying intent of this prospect for the given product offer.

PRODUCT OFFER:
- Name: {offer_name}
- Value Propositions: {value_props}
- Ideal Use Cases: {use_cases}

PROSPECT DATA:
- Name: {name}
- Role: {role}
- Company: {company}
- Industry: {industry}
- Location: {location}
- LinkedIn Bio: {bio}

Classify the buying intent as High, Medium, or Low and provide a brief reasoning (1-2 sentences).

Respond in exactly this format:
Intent: [High/Medium/Low]
Reasoning: [1-2 sentence explanation]
",
        offer_name = or_na(&offer.name),
        value_props = or_na(&offer.value_propositions.join(", ")),
        use_cases = or_na(&offer.ideal_use_cases.join(", ")),
        name = or_na(&lead.name),
        role = or_na(&lead.role),
        company = or_na(&lead.company),
        industry = or_na(&lead.industry),
        location = or_na(&lead.location),
        bio = or_na(&lead.bio),
    )
}

/// Extract `(intent, reasoning)` from a model reply.
pub fn parse_response(text: &str) -> (IntentTier, String) {
    let intent = RE_INTENT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| IntentTier::parse_or_low(m.as_str()))
        .unwrap_or(IntentTier::Low);

    let reasoning = RE_REASONING
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|r| !r.is_empty())
        .unwrap_or(NO_REASONING)
        .to_string();

    (intent, reasoning)
}
