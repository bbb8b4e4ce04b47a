use serde::{Deserialize, Serialize};

/// A prospective customer. Missing fields default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadAttributes {
    pub name: String,
    /// Job title (e.g., "Head of Growth").
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    /// Free-text profile summary.
    #[serde(alias = "linkedin_bio")]
    pub bio: String,
}

impl LeadAttributes {
    /// True when every field the rule scorer treats as required is non-empty.
    /// The bio is not part of this check.
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.role,
            &self.company,
            &self.industry,
            &self.location,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

/// The product being pitched. Shared read-only across a scoring batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferAttributes {
    pub name: String,
    #[serde(alias = "value_props")]
    pub value_propositions: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

/// A batch of leads to score against one offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub offer: OfferAttributes,
    #[serde(default)]
    pub leads: Vec<LeadAttributes>,
}
