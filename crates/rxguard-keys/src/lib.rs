//! # rxguard-keys
//!
//! The AI-provider key pool: which credential to use, and simulated health
//! telemetry for all of them.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use rxguard_keys::{active_key, HealthTiers, SeededRandom, SimulatedHealthProbe};
//!
//! let probe = SimulatedHealthProbe::new(SeededRandom::new(7), HealthTiers::default())?;
//! let key = active_key(&state.api_keys);
//! ```

pub mod health;
pub mod random;
pub mod selector;

pub use health::{HealthTiers, SimulatedHealthProbe, TierRates};
pub use random::{ScriptedRandom, SeededRandom, ThreadRandom};
pub use rxguard_contracts::credential::mask_key;
pub use selector::{active_key, healthy_count, primary_key};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use rxguard_contracts::{
        credential::{ApiKeyCredential, ApiKeyStatus, Provider},
        error::RxGuardError,
    };
    use rxguard_core::traits::{HealthProbe, RandomSource};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn key(id: &str, status: ApiKeyStatus, primary: bool) -> ApiKeyCredential {
        ApiKeyCredential {
            id: id.to_string(),
            label: id.to_string(),
            provider: Provider::OpenAi,
            key_masked: "************0000".to_string(),
            status,
            success_rate: 0.5,
            error_rate: 0.5,
            last_checked_at: None,
            is_primary: primary,
        }
    }

    fn selected(pool: &[ApiKeyCredential]) -> Option<&str> {
        active_key(pool).map(|k| k.id.as_str())
    }

    // ── Selection ────────────────────────────────────────────────────────────

    #[test]
    fn test_usable_primary_wins() {
        let pool = vec![
            key("a", ApiKeyStatus::Active, false),
            key("b", ApiKeyStatus::Degraded, true),
        ];
        assert_eq!(selected(&pool), Some("b"), "degraded primary is still preferred");
    }

    #[test]
    fn test_down_primary_fails_over_to_active() {
        let pool = vec![
            key("primary", ApiKeyStatus::Down, true),
            key("backup", ApiKeyStatus::Active, false),
        ];
        assert_eq!(selected(&pool), Some("backup"));
        assert_eq!(primary_key(&pool).unwrap().id, "primary");
    }

    #[test]
    fn test_fallback_is_first_usable_in_order() {
        let pool = vec![
            key("untested", ApiKeyStatus::Untested, true),
            key("down", ApiKeyStatus::Down, false),
            key("degraded", ApiKeyStatus::Degraded, false),
            key("active", ApiKeyStatus::Active, false),
        ];
        assert_eq!(selected(&pool), Some("degraded"));
    }

    #[test]
    fn test_no_primary_uses_first_usable() {
        let pool = vec![
            key("x", ApiKeyStatus::Down, false),
            key("y", ApiKeyStatus::Active, false),
        ];
        assert!(primary_key(&pool).is_none());
        assert_eq!(selected(&pool), Some("y"));
    }

    #[test]
    fn test_nothing_usable_is_none() {
        assert_eq!(selected(&[]), None);
        let pool = vec![
            key("x", ApiKeyStatus::Down, true),
            key("y", ApiKeyStatus::Untested, false),
        ];
        assert_eq!(selected(&pool), None);
        assert_eq!(healthy_count(&pool), 0);
    }

    // ── Health simulation ────────────────────────────────────────────────────

    #[test]
    fn test_draws_map_to_tiers() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let pool = vec![
            key("a", ApiKeyStatus::Untested, true),
            key("b", ApiKeyStatus::Untested, false),
            key("c", ApiKeyStatus::Untested, false),
            key("d", ApiKeyStatus::Untested, false),
        ];
        let mut probe =
            SimulatedHealthProbe::new(ScriptedRandom::new(vec![0.1, 0.8, 0.95, 0.75]), HealthTiers::default())
                .unwrap();

        let checked = probe.check(&pool, now);

        let statuses: Vec<ApiKeyStatus> = checked.iter().map(|k| k.status).collect();
        assert_eq!(
            statuses,
            vec![
                ApiKeyStatus::Active,
                ApiKeyStatus::Degraded,
                ApiKeyStatus::Down,
                ApiKeyStatus::Active, // 0.75 is not above the degraded threshold
            ]
        );
        assert_eq!((checked[0].success_rate, checked[0].error_rate), (0.98, 0.02));
        assert_eq!((checked[1].success_rate, checked[1].error_rate), (0.9, 0.1));
        assert_eq!((checked[2].success_rate, checked[2].error_rate), (0.0, 1.0));
        assert!(checked.iter().all(|k| k.last_checked_at == Some(now)));
        assert!(checked[0].is_primary);
        assert_eq!(checked[3].id, "d");
    }

    #[test]
    fn test_seeded_probe_is_reproducible() {
        let now = Utc::now();
        let pool: Vec<ApiKeyCredential> =
            (0..8).map(|i| key(&format!("k{i}"), ApiKeyStatus::Active, i == 0)).collect();

        let mut a = SimulatedHealthProbe::new(SeededRandom::new(42), HealthTiers::default()).unwrap();
        let mut b = SimulatedHealthProbe::new(SeededRandom::new(42), HealthTiers::default()).unwrap();
        assert_eq!(a.check(&pool, now), b.check(&pool, now));
    }

    #[test]
    fn test_random_sources_stay_in_unit_interval() {
        let mut seeded = SeededRandom::new(1);
        let mut thread = ThreadRandom;
        for _ in 0..1000 {
            let s = seeded.next_unit();
            let t = thread.next_unit();
            assert!((0.0..1.0).contains(&s));
            assert!((0.0..1.0).contains(&t));
        }
    }

    #[test]
    fn test_scripted_random_cycles() {
        let mut r = ScriptedRandom::new(vec![0.3, 0.6]);
        assert_eq!([r.next_unit(), r.next_unit(), r.next_unit()], [0.3, 0.6, 0.3]);
        assert_eq!(ScriptedRandom::default().next_unit(), 0.0);
    }

    #[test]
    fn test_misordered_thresholds_rejected() {
        let tiers = HealthTiers {
            down_above: 0.5,
            degraded_above: 0.8,
            ..HealthTiers::default()
        };
        let err = SimulatedHealthProbe::new(ThreadRandom, tiers).err().unwrap();
        assert!(matches!(err, RxGuardError::ConfigError { .. }));
    }
}
