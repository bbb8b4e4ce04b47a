use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::IntentTier;
use crate::lead::LeadAttributes;
use crate::scoring::ScoringResult;

/// A lead together with its score, flattened for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    #[serde(flatten)]
    pub lead: LeadAttributes,
    #[serde(flatten)]
    pub result: ScoringResult,
}

/// Number of leads per intent tier in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: IntentTier) {
        match tier {
            IntentTier::High => self.high += 1,
            IntentTier::Medium => self.medium += 1,
            IntentTier::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Outcome of scoring a set of leads against a single offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Batch ID (UUIDv7 for time-sortability).
    pub batch_id: Uuid,
    pub offer_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Results in the same order as the input leads.
    pub results: Vec<ScoredLead>,
    pub counts: TierCounts,
    /// Leads whose intent came from the fail-safe path.
    pub fail_safe_count: usize,
}

impl BatchReport {
    pub fn new(
        offer_name: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<ScoredLead>,
    ) -> Self {
        let mut counts = TierCounts::default();
        let mut fail_safe_count = 0;
        for scored in &results {
            counts.record(scored.result.intent);
            if scored.result.is_fail_safe() {
                fail_safe_count += 1;
            }
        }
        Self {
            batch_id: Uuid::now_v7(),
            offer_name: offer_name.into(),
            started_at,
            finished_at: Utc::now(),
            results,
            counts,
            fail_safe_count,
        }
    }

    /// Results sorted by total score, highest first. Ties keep input order.
    pub fn ranked(&self) -> Vec<&ScoredLead> {
        let mut ranked: Vec<&ScoredLead> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.result.total_score.cmp(&a.result.total_score));
        ranked
    }
}
