//! Output of the prescribing safety review.

use serde::{Deserialize, Serialize};

use crate::{interaction::InteractionRule, prescription::RiskScore};

/// Everything the safety review attaches to a prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Rules that matched, in rule-table order.
    pub interactions: Vec<InteractionRule>,
    pub score: RiskScore,
    /// Interaction messages, or a single "no major risk" flag.
    pub flags: Vec<String>,
    /// Mock AI review text.
    pub summary: String,
}

impl RiskAssessment {
    pub fn has_interactions(&self) -> bool {
        !self.interactions.is_empty()
    }
}
