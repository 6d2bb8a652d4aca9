//! TOML-driven interaction rule table.
//!
//! `TomlInteractionTable` loads a `RuleConfig` and answers one question:
//! which known pairs are present in a medication list.
//!
//! Matching algorithm:
//!
//! 1. Lowercase every medication name in the input.
//! 2. For each rule, in declaration order, report it when both of its drug
//!    names appear among the input names. Position and extra drugs are
//!    irrelevant.
//! 3. Each rule is reported at most once, even if a drug is listed twice.
//!
//! Only exact pairs match. There is no transitive or three-way reasoning.

use std::{
    collections::{BTreeSet, HashSet},
    path::Path,
};

use tracing::debug;

use rxguard_contracts::{
    error::{RxGuardError, RxResult},
    interaction::InteractionRule,
    medication::Medication,
};

use crate::rule::{normalized_pair, RuleConfig};

/// The embedded demo rule table.
const BUILTIN_RULES: &str = include_str!("../rules/interactions.toml");

/// An immutable table of pairwise interaction rules.
///
/// ```rust,ignore
/// use rxguard_rules::TomlInteractionTable;
///
/// let table = TomlInteractionTable::builtin()?;
/// let hits = table.check(&medications);
/// ```
#[derive(Debug, Clone)]
pub struct TomlInteractionTable {
    config: RuleConfig,
}

impl TomlInteractionTable {
    /// Parse `s` as TOML and build a table.
    ///
    /// Returns `RxGuardError::ConfigError` if the TOML is malformed, a rule
    /// pairs a drug with itself, or two rules share an id.
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let config: RuleConfig = toml::from_str(s).map_err(|e| RxGuardError::ConfigError {
            reason: format!("failed to parse interaction rules TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as an interaction rule table.
    pub fn from_file(path: &Path) -> RxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RxGuardError::ConfigError {
            reason: format!("failed to read rules file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The three demo rules shipped with the crate.
    pub fn builtin() -> RxResult<Self> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    pub fn from_config(config: RuleConfig) -> RxResult<Self> {
        let mut ids = HashSet::new();
        for rule in &config.rules {
            let (a, b) = normalized_pair(rule);
            if a == b {
                return Err(RxGuardError::ConfigError {
                    reason: format!("rule '{}' pairs '{}' with itself", rule.id, rule.drug_a),
                });
            }
            if !ids.insert(rule.id.as_str()) {
                return Err(RxGuardError::ConfigError {
                    reason: format!("duplicate interaction rule id '{}'", rule.id),
                });
            }
        }
        debug!(rules = config.rules.len(), "interaction table loaded");
        Ok(Self { config })
    }

    pub fn rules(&self) -> &[InteractionRule] {
        &self.config.rules
    }

    /// Every rule whose two drugs both appear in `medications`.
    ///
    /// An empty list yields an empty result.
    pub fn check(&self, medications: &[Medication]) -> Vec<InteractionRule> {
        let names: HashSet<String> = medications.iter().map(Medication::normalized_name).collect();

        let matched: Vec<InteractionRule> = self
            .config
            .rules
            .iter()
            .filter(|rule| {
                let (a, b) = normalized_pair(rule);
                names.contains(&a) && names.contains(&b)
            })
            .cloned()
            .collect();

        debug!(
            medications = medications.len(),
            matched = matched.len(),
            "interaction check complete"
        );
        matched
    }

    /// Lowercased names of every drug involved in a matched rule, sorted
    /// and de-duplicated.
    pub fn interacting_drug_names(&self, medications: &[Medication]) -> Vec<String> {
        let names: BTreeSet<String> = self
            .check(medications)
            .iter()
            .flat_map(|rule| {
                let (a, b) = normalized_pair(rule);
                [a, b]
            })
            .collect();
        names.into_iter().collect()
    }
}
