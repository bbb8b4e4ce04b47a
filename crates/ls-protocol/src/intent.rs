use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Buying-intent verdict attached to a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentTier {
    High,
    Medium,
    /// Also the fail-safe tier for anything unrecognized.
    Low,
}

impl IntentTier {
    pub const ALL: [IntentTier; 3] = [IntentTier::High, IntentTier::Medium, IntentTier::Low];

    /// Fixed point value contributed by this tier to the total score.
    pub fn model_score(self) -> u32 {
        match self {
            IntentTier::High => 50,
            IntentTier::Medium => 30,
            IntentTier::Low => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntentTier::High => "High",
            IntentTier::Medium => "Medium",
            IntentTier::Low => "Low",
        }
    }

    /// Lenient parse: anything that is not a known tier becomes `Low`.
    pub fn parse_or_low(s: &str) -> Self {
        s.parse().unwrap_or(IntentTier::Low)
    }
}

impl FromStr for IntentTier {
    type Err = ProtocolError;

    fn from_str(s: &str) -> ProtocolResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(IntentTier::High),
            "medium" => Ok(IntentTier::Medium),
            "low" => Ok(IntentTier::Low),
            _ => Err(ProtocolError::UnknownIntent(s.to_string())),
        }
    }
}

impl fmt::Display for IntentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
