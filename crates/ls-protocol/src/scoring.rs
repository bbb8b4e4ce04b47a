use serde::{Deserialize, Serialize};

use crate::intent::IntentTier;

/// Upper bound of the rule-based component.
pub const MAX_RULE_SCORE: u32 = 50;

/// Substring present in every reasoning text produced by the fail-safe path.
pub const FAIL_SAFE_MARKER: &str = "analysis failed:";

/// Final score for one lead against one offer.
///
/// Build with [`ScoringResult::new`] so `model_score` and `total_score`
/// always agree with `intent` and `rule_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub intent: IntentTier,
    /// Deterministic keyword/completeness points (0-50).
    pub rule_score: u32,
    /// Points attached to the intent tier (10, 30 or 50).
    pub model_score: u32,
    /// `rule_score + model_score` (10-100).
    pub total_score: u32,
    pub reasoning: String,
}

impl ScoringResult {
    pub fn new(intent: IntentTier, rule_score: u32, reasoning: impl Into<String>) -> Self {
        let rule_score = rule_score.min(MAX_RULE_SCORE);
        let model_score = intent.model_score();
        Self {
            intent,
            rule_score,
            model_score,
            total_score: rule_score + model_score,
            reasoning: reasoning.into(),
        }
    }

    /// Whether the intent came from the fail-safe path rather than a classifier verdict.
    pub fn is_fail_safe(&self) -> bool {
        self.intent == IntentTier::Low && self.reasoning.contains(FAIL_SAFE_MARKER)
    }
}
