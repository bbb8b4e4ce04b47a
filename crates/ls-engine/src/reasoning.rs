//! Template-based reasoning text for the local classifier.
//!
//! Each intent tier has a pool of narrative templates. One is picked at
//! random and filled with the lead's name, role, company and industry. Now
//! and then a sentence about the lead's location is appended.

use std::sync::LazyLock;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Captures, Regex};

use ls_protocol::{IntentTier, LeadAttributes, OfferAttributes};

/// Probability of appending the location sentence.
pub const LOCATION_NOTE_PROBABILITY: f64 = 0.3;

/// Location value that never earns a market note.
pub const REMOTE_LOCATION: &str = "Remote";

const HIGH_TEMPLATES: [&str; 4] = [
    "{name}'s position as {role} at {company} positions them as a key decision-maker in the {industry} sector. Their authority and industry alignment with our solution suggests strong potential for engagement and conversion.",
    "Given {name}'s senior role as {role}, they likely have budget authority and strategic influence at {company}. The {industry} industry's current market dynamics make this an opportune time for solution adoption.",
    "As {role} at {company}, {name} represents an ideal target profile. Their leadership position in the {industry} space indicates both need and capability to implement our solution effectively.",
    "The combination of {name}'s role as {role} and {company}'s position in the {industry} market creates a compelling opportunity. Senior stakeholders like {name} are typically early adopters of innovative solutions.",
];

const MEDIUM_TEMPLATES: [&str; 4] = [
    "While {name}'s role as {role} at {company} shows some alignment with our target profile, additional qualification is needed to determine their specific pain points and budget authority in the {industry} sector.",
    "{name} presents a moderate opportunity given their position as {role}. However, {company}'s current priorities and {name}'s influence on technology decisions require further investigation.",
    "The prospect {name} shows promise as {role} at {company}, though their exact decision-making authority and current solution gaps in the {industry} context need clarification.",
    "As {role}, {name} may have influence at {company}, but determining their specific challenges and timeline for {industry} solutions will be crucial for qualification.",
];

const LOW_TEMPLATES: [&str; 4] = [
    "While {name} works as {role} at {company}, their current position may have limited decision-making authority for solutions like ours. The {industry} sector typically requires engagement with more senior stakeholders.",
    "{name}'s role as {role} suggests they may not be the primary decision-maker at {company}. In the {industry} industry, purchasing decisions usually involve C-level or VP-level professionals.",
    "Although {name} is positioned as {role} at {company}, their level of influence on strategic technology decisions in the {industry} sector appears limited based on available information.",
    "The prospect {name} may serve more as an influencer rather than decision-maker in their role as {role}. {company} likely requires engagement with higher-level stakeholders for solution adoption.",
];

/// Template pool for an intent tier.
pub fn templates_for(intent: IntentTier) -> &'static [&'static str] {
    match intent {
        IntentTier::High => &HIGH_TEMPLATES,
        IntentTier::Medium => &MEDIUM_TEMPLATES,
        IntentTier::Low => &LOW_TEMPLATES,
    }
}

/// Generates varied, human-readable explanations for an intent verdict.
///
/// Output is random. Production code uses [`ReasoningSynthesizer::new`]
/// (OS-seeded); tests use [`ReasoningSynthesizer::with_seed`] for repeatable
/// template selection.
pub struct ReasoningSynthesizer {
    rng: Mutex<StdRng>,
}

impl ReasoningSynthesizer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn synthesize(
        &self,
        lead: &LeadAttributes,
        offer: &OfferAttributes,
        intent: IntentTier,
    ) -> String {
        let pool = templates_for(intent);
        let (index, add_location) = {
            let mut rng = self.rng.lock();
            (
                rng.random_range(0..pool.len()),
                rng.random_bool(LOCATION_NOTE_PROBABILITY),
            )
        };

        let mut reasoning = render(pool[index], lead);
        if add_location && has_market_location(&lead.location) {
            reasoning.push_str(&location_note(&lead.location, offer));
        }
        reasoning
    }
}

impl Default for ReasoningSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(name|role|company|industry)\}").unwrap());

/// Fill a template's placeholders from the lead.
///
/// Single pass over the template: lead values are inserted verbatim and
/// never re-scanned for placeholders.
pub fn render(template: &str, lead: &LeadAttributes) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let value = match &caps[1] {
                "name" => or_default(&lead.name, "This prospect"),
                "role" => or_default(&lead.role, "professional"),
                "company" => or_default(&lead.company, "their organization"),
                _ => or_default(&lead.industry, "their industry"),
            };
            value.to_string()
        })
        .into_owned()
}

fn has_market_location(location: &str) -> bool {
    let location = location.trim();
    !location.is_empty() && location != REMOTE_LOCATION
}

fn location_note(location: &str, offer: &OfferAttributes) -> String {
    let offer_name = or_default(&offer.name, "our solution");
    format!(" Their {location} location also positions them well within a key market for {offer_name}.")
}
