//! Risk/flag aggregation.
//!
//! The score is a two-valued function of "did any rule match": the
//! configured high constant when it did, the baseline otherwise. Flags are
//! the matched rules' messages, or a single "no major risk" flag.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rxguard_contracts::{
    error::{RxGuardError, RxResult},
    interaction::{InteractionRule, Locale},
    medication::Medication,
    prescription::RiskScore,
    review::RiskAssessment,
};
use rxguard_core::traits::SafetyReviewer;

use crate::table::TomlInteractionTable;

/// Constants for the risk aggregator. Every field has a default, so an
/// empty `[risk]` table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Score when at least one interaction matched.
    pub high_score: f64,
    /// Score when none matched.
    pub baseline_score: f64,
    /// The sole flag attached when nothing matched.
    pub no_risk_flag: String,
    /// Language for interaction flags.
    pub locale: Locale,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_score: 0.7,
            baseline_score: 0.2,
            no_risk_flag: "No major interaction risk detected".to_string(),
            locale: Locale::En,
        }
    }
}

impl RiskConfig {
    /// Check that both constants are valid risk scores and return them as
    /// `(high, baseline)`.
    pub fn validate(&self) -> RxResult<(RiskScore, RiskScore)> {
        let check = |name: &str, value: f64| {
            RiskScore::new(value).map_err(|_| RxGuardError::ConfigError {
                reason: format!("risk.{name} = {value} is outside [0, 1]"),
            })
        };
        Ok((
            check("high_score", self.high_score)?,
            check("baseline_score", self.baseline_score)?,
        ))
    }
}

/// Reduce matched interactions into a risk assessment.
///
/// # Errors
///
/// `ConfigError` when a configured constant is not a valid score.
pub fn assess(
    medications: &[Medication],
    interactions: Vec<InteractionRule>,
    config: &RiskConfig,
) -> RxResult<RiskAssessment> {
    let (high, baseline) = config.validate()?;
    Ok(build(medications, interactions, high, baseline, config))
}

fn build(
    medications: &[Medication],
    interactions: Vec<InteractionRule>,
    high: RiskScore,
    baseline: RiskScore,
    config: &RiskConfig,
) -> RiskAssessment {
    let assessment = if interactions.is_empty() {
        RiskAssessment {
            score: baseline,
            flags: vec![config.no_risk_flag.clone()],
            summary: format!(
                "No major interactions detected across {} medication(s). Continue routine monitoring.",
                medications.len()
            ),
            interactions,
        }
    } else {
        let flags: Vec<String> = interactions
            .iter()
            .map(|rule| rule.message(config.locale).to_string())
            .collect();
        let pairs: Vec<String> = interactions
            .iter()
            .map(|rule| format!("{} + {}", rule.drug_a, rule.drug_b))
            .collect();
        RiskAssessment {
            score: high,
            summary: format!(
                "Potential interaction detected: {}. Review before approval.",
                pairs.join(", ")
            ),
            flags,
            interactions,
        }
    };

    debug!(
        interactions = assessment.interactions.len(),
        score = assessment.score.value(),
        "risk assessed"
    );
    assessment
}

/// The production `SafetyReviewer`: interaction table plus risk constants.
#[derive(Debug, Clone)]
pub struct SafetyEngine {
    table: TomlInteractionTable,
    config: RiskConfig,
    high: RiskScore,
    baseline: RiskScore,
}

impl SafetyEngine {
    /// Validates `config` up front so `review` cannot fail later.
    pub fn new(table: TomlInteractionTable, config: RiskConfig) -> RxResult<Self> {
        let (high, baseline) = config.validate()?;
        Ok(Self { table, config, high, baseline })
    }

    pub fn table(&self) -> &TomlInteractionTable {
        &self.table
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }
}

impl SafetyReviewer for SafetyEngine {
    fn review(&self, medications: &[Medication]) -> RiskAssessment {
        let interactions = self.table.check(medications);
        build(medications, interactions, self.high, self.baseline, &self.config)
    }
}
