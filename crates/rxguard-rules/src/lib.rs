//! # rxguard-rules
//!
//! Prescribing safety checks for RxGuard.
//!
//! ## Overview
//!
//! [`TomlInteractionTable`] holds pairwise drug-interaction rules declared in
//! TOML and reports every pair present in a medication list. [`assess`]
//! reduces the matches into a risk score and flag list, and [`SafetyEngine`]
//! combines both behind the [`SafetyReviewer`](rxguard_core::traits::SafetyReviewer)
//! trait the controller consumes.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rxguard_rules::{RiskConfig, SafetyEngine, TomlInteractionTable};
//!
//! let engine = SafetyEngine::new(TomlInteractionTable::builtin()?, RiskConfig::default())?;
//! ```

pub mod risk;
pub mod rule;
pub mod table;

pub use risk::{assess, RiskConfig, SafetyEngine};
pub use rule::RuleConfig;
pub use table::TomlInteractionTable;

// ── Tests ─────────────────────────────────────────────────────────────────────
