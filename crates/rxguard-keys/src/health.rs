//! Simulated health checks.
//!
//! This is demo telemetry: nothing is contacted. For every credential one
//! uniform draw `r` picks a tier:
//!
//! | draw                  | status   | success | error |
//! |-----------------------|----------|---------|-------|
//! | `r > down_above`      | down     | 0.00    | 1.00  |
//! | `r > degraded_above`  | degraded | 0.90    | 0.10  |
//! | otherwise             | active   | 0.98    | 0.02  |
//!
//! With the default thresholds that is roughly 10% down, 15% degraded and
//! 75% active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rxguard_contracts::{
    credential::{ApiKeyCredential, ApiKeyStatus},
    error::{RxGuardError, RxResult},
};
use rxguard_core::traits::{HealthProbe, RandomSource};

/// Success and error rates reported for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub success_rate: f64,
    pub error_rate: f64,
}

/// Thresholds and per-tier rates for the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthTiers {
    pub down_above: f64,
    pub degraded_above: f64,
    pub active: TierRates,
    pub degraded: TierRates,
    pub down: TierRates,
}

impl Default for HealthTiers {
    fn default() -> Self {
        Self {
            down_above: 0.9,
            degraded_above: 0.75,
            active: TierRates { success_rate: 0.98, error_rate: 0.02 },
            degraded: TierRates { success_rate: 0.9, error_rate: 0.1 },
            down: TierRates { success_rate: 0.0, error_rate: 1.0 },
        }
    }
}

impl HealthTiers {
    /// Thresholds must satisfy `0 <= degraded_above <= down_above <= 1`.
    pub fn validate(&self) -> RxResult<()> {
        let ordered = 0.0 <= self.degraded_above
            && self.degraded_above <= self.down_above
            && self.down_above <= 1.0;
        if !ordered {
            return Err(RxGuardError::ConfigError {
                reason: format!(
                    "health thresholds must satisfy 0 <= degraded_above ({}) <= down_above ({}) <= 1",
                    self.degraded_above, self.down_above
                ),
            });
        }
        Ok(())
    }

    /// Map one draw to a status and its rates.
    pub fn classify(&self, draw: f64) -> (ApiKeyStatus, TierRates) {
        if draw > self.down_above {
            (ApiKeyStatus::Down, self.down)
        } else if draw > self.degraded_above {
            (ApiKeyStatus::Degraded, self.degraded)
        } else {
            (ApiKeyStatus::Active, self.active)
        }
    }
}

/// A `HealthProbe` that invents telemetry from a random source.
pub struct SimulatedHealthProbe<R: RandomSource> {
    random: R,
    tiers: HealthTiers,
}

impl<R: RandomSource> SimulatedHealthProbe<R> {
    pub fn new(random: R, tiers: HealthTiers) -> RxResult<Self> {
        tiers.validate()?;
        Ok(Self { random, tiers })
    }

    pub fn tiers(&self) -> &HealthTiers {
        &self.tiers
    }
}

impl<R: RandomSource> HealthProbe for SimulatedHealthProbe<R> {
    fn check(&mut self, pool: &[ApiKeyCredential], now: DateTime<Utc>) -> Vec<ApiKeyCredential> {
        pool.iter()
            .map(|key| {
                let draw = self.random.next_unit();
                let (status, rates) = self.tiers.classify(draw);
                debug!(key_id = %key.id, draw, status = %status, "simulated health check");
                ApiKeyCredential {
                    status,
                    success_rate: rates.success_rate,
                    error_rate: rates.error_rate,
                    last_checked_at: Some(now),
                    ..key.clone()
                }
            })
            .collect()
    }
}
