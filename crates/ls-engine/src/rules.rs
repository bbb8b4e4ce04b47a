//! Rule-based lead scorer: keyword matching and completeness checks.
//!
//! Deterministic, side-effect free and infallible. Produces the 0-50 half of
//! the final score; the other half comes from the intent classifier.

use ls_protocol::{LeadAttributes, MAX_RULE_SCORE};

/// Roles with buying authority.
pub const DECISION_MAKER_ROLES: &[&str] = &[
    "ceo",
    "cfo",
    "cto",
    "cmo",
    "coo",
    "president",
    "vp",
    "vice president",
    "director",
    "head of",
    "manager",
    "founder",
    "owner",
];

/// Roles that shape a purchase without owning it.
pub const INFLUENCER_ROLES: &[&str] = &[
    "specialist",
    "analyst",
    "coordinator",
    "assistant",
    "associate",
];

const EXACT_INDUSTRIES: &[&str] = &["saas", "tech", "software"];
const ADJACENT_INDUSTRIES: &[&str] = &["business", "services"];

const ROLE_DECISION_MAKER_POINTS: u32 = 20;
const ROLE_INFLUENCER_POINTS: u32 = 10;
const INDUSTRY_EXACT_POINTS: u32 = 20;
const INDUSTRY_ADJACENT_POINTS: u32 = 10;
const COMPLETENESS_POINTS: u32 = 10;

/// Points awarded per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleBreakdown {
    /// 0, 10 or 20.
    pub role: u32,
    /// 0, 10 or 20.
    pub industry: u32,
    /// 0 or 10.
    pub completeness: u32,
}

impl RuleBreakdown {
    pub fn total(&self) -> u32 {
        (self.role + self.industry + self.completeness).min(MAX_RULE_SCORE)
    }
}

/// Scores leads on role relevance, industry match and data completeness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScorer;

impl RuleScorer {
    pub fn new() -> Self {
        Self
    }

    /// Rule score in `0..=50`.
    pub fn score(&self, lead: &LeadAttributes) -> u32 {
        self.breakdown(lead).total()
    }

    pub fn breakdown(&self, lead: &LeadAttributes) -> RuleBreakdown {
        RuleBreakdown {
            role: role_points(&lead.role),
            industry: industry_points(&lead.industry),
            completeness: if lead.is_complete() {
                COMPLETENESS_POINTS
            } else {
                0
            },
        }
    }
}

fn role_points(role: &str) -> u32 {
    let role = role.to_lowercase();
    if matches_any(&role, DECISION_MAKER_ROLES) {
        ROLE_DECISION_MAKER_POINTS
    } else if matches_any(&role, INFLUENCER_ROLES) {
        ROLE_INFLUENCER_POINTS
    } else {
        0
    }
}

fn industry_points(industry: &str) -> u32 {
    let industry = industry.to_lowercase();
    if matches_any(&industry, EXACT_INDUSTRIES) {
        INDUSTRY_EXACT_POINTS
    } else if matches_any(&industry, ADJACENT_INDUSTRIES) {
        INDUSTRY_ADJACENT_POINTS
    } else {
        0
    }
}

/// Check if the text contains any of the given patterns.
pub(crate) fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
