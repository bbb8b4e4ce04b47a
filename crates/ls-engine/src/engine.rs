//! Scoring engine: rule score plus intent classification.
//!
//! Classifier failures never escape: they become a Low verdict whose
//! reasoning carries the failure cause. Every lead gets a result.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;

use ls_protocol::{BatchReport, LeadAttributes, OfferAttributes, ScoredLead, ScoringResult};

use crate::classifier::{Classification, IntentClassifier};
use crate::error::ClassifierError;
use crate::rules::RuleScorer;

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Scores leads against an offer using a fixed classifier.
#[derive(Clone)]
pub struct ScoringEngine {
    rules: RuleScorer,
    classifier: Arc<dyn IntentClassifier>,
    max_concurrency: usize,
}

impl ScoringEngine {
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            rules: RuleScorer::new(),
            classifier,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Cap on leads scored at the same time in [`ScoringEngine::score_batch`] (minimum 1).
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    pub fn classifier_variant(&self) -> &str {
        self.classifier.variant_name()
    }

    /// Score one lead. Never fails.
    pub async fn score_lead(&self, lead: &LeadAttributes, offer: &OfferAttributes) -> ScoringResult {
        let rule_score = self.rules.score(lead);

        let classification = self.classifier.classify_or_fail_safe(lead, offer).await;

        let result = ScoringResult::new(classification.intent, rule_score, classification.reasoning);
        tracing::debug!(
            lead = %lead.name,
            intent = %result.intent,
            rule_score = result.rule_score,
            model_score = result.model_score,
            total_score = result.total_score,
            "lead scored"
        );
        result
    }

    /// Score every lead against `offer`, concurrently.
    ///
    /// Results come back in input order. A scoring task that dies is
    /// reported as a fail-safe result for its lead.
    pub async fn score_batch(&self, leads: Vec<LeadAttributes>, offer: &OfferAttributes) -> BatchReport {
        let started_at = Utc::now();
        tracing::info!(
            offer = %offer.name,
            leads = leads.len(),
            variant = self.classifier.variant_name(),
            max_concurrency = self.max_concurrency,
            "scoring batch"
        );

        let offer = Arc::new(offer.clone());
        let slots = Arc::new(Semaphore::new(self.max_concurrency));

        let handles: Vec<_> = leads
            .iter()
            .cloned()
            .map(|lead| {
                let engine = self.clone();
                let offer = offer.clone();
                let slots = slots.clone();
                tokio::spawn(async move {
                    // The semaphore is never closed.
                    let _permit = slots.acquire_owned().await.ok();
                    engine.score_lead(&lead, &offer).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(leads.len());
        for (lead, handle) in leads.into_iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(lead = %lead.name, error = %e, "scoring task aborted");
                    let fallback = Classification::fail_safe(&ClassifierError::Aborted(e.to_string()));
                    ScoringResult::new(fallback.intent, self.rules.score(&lead), fallback.reasoning)
                }
            };
            results.push(ScoredLead { lead, result });
        }

        let report = BatchReport::new(offer.name.clone(), started_at, results);
        tracing::info!(
            batch_id = %report.batch_id,
            high = report.counts.high,
            medium = report.counts.medium,
            low = report.counts.low,
            fail_safe = report.fail_safe_count,
            "batch scored"
        );
        report
    }
}
