//! Static drug-interaction reference data.

use serde::{Deserialize, Serialize};

/// How serious a known interaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Moderate,
    Major,
}

/// Language used for interaction messages and generated flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

/// A pairwise drug-name conflict.
///
/// Rules are immutable reference data. `drug_a` and `drug_b` are matched
/// case-insensitively and in either order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Stable identifier, e.g. `"warfarin-aspirin"`.
    pub id: String,
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    pub message_en: String,
    pub message_ar: String,
}

impl InteractionRule {
    /// The rule's message in the requested language.
    pub fn message(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.message_en,
            Locale::Ar => &self.message_ar,
        }
    }
}
