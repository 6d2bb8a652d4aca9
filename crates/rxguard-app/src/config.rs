//! Engine configuration.
//!
//! `EngineConfig` is deserialized from TOML. Every section is optional and
//! falls back to the demo defaults, so an empty document is a valid config.
//!
//! ```toml
//! rules_path = "rules/interactions.toml"   # omit to use the built-in table
//! seed = 42                                # omit for thread-local randomness
//!
//! [risk]
//! high_score = 0.7
//! baseline_score = 0.2
//! locale = "en"
//!
//! [health]
//! down_above = 0.9
//! degraded_above = 0.75
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use rxguard_contracts::error::{RxGuardError, RxResult};
use rxguard_keys::HealthTiers;
use rxguard_rules::{RiskConfig, SafetyEngine, TomlInteractionTable};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// External interaction rule table. `None` uses the embedded demo rules.
    pub rules_path: Option<PathBuf>,
    /// Seed for the health simulator. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub risk: RiskConfig,
    pub health: HealthTiers,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    ///
    /// Returns `ConfigError` for malformed TOML or out-of-range constants.
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| RxGuardError::ConfigError {
            reason: format!("failed to parse engine config TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            rules_path = ?config.rules_path,
            seeded = config.seed.is_some(),
            "engine config loaded"
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> RxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RxGuardError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> RxResult<()> {
        self.risk.validate()?;
        self.health.validate()
    }

    /// Load the configured interaction table.
    pub fn interaction_table(&self) -> RxResult<TomlInteractionTable> {
        match &self.rules_path {
            Some(path) => TomlInteractionTable::from_file(path),
            None => TomlInteractionTable::builtin(),
        }
    }
}

impl EngineConfig {
    /// The safety reviewer described by this config.
    pub fn safety_engine(&self) -> RxResult<SafetyEngine> {
        SafetyEngine::new(self.interaction_table()?, self.risk.clone())
    }
}
