//! Interaction table configuration schema.
//!
//! A `RuleConfig` is deserialized from TOML and holds an ordered list of
//! `InteractionRule`s. Order matters only for output: matched rules are
//! reported in declaration order.
//!
//! Example:
//! ```toml
//! [[rules]]
//! id = "warfarin-aspirin"
//! drug_a = "Warfarin"
//! drug_b = "Aspirin"
//! severity = "major"
//! message_en = "Increased bleeding risk."
//! message_ar = "خطر نزيف."
//! ```

use serde::{Deserialize, Serialize};

use rxguard_contracts::interaction::InteractionRule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub rules: Vec<InteractionRule>,
}

/// Both sides of a rule, lowercased and trimmed.
pub(crate) fn normalized_pair(rule: &InteractionRule) -> (String, String) {
    (
        rule.drug_a.trim().to_lowercase(),
        rule.drug_b.trim().to_lowercase(),
    )
}
