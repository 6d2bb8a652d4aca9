//! Seam traits for the RxGuard controller.
//!
//! - `SafetyReviewer`: interaction check plus risk scoring for a medication list
//! - `HealthProbe`: produces fresh health telemetry for the key pool
//! - `RandomSource`: uniform draws, injectable so tests are deterministic
//! - `JournalWriter`: append-only record of every applied command
//! - `Clock`: the current time, injectable for the same reason
//!
//! The controller owns one of each and calls them while applying commands.

use chrono::{DateTime, Utc};

use rxguard_contracts::{
    credential::ApiKeyCredential, error::RxResult, journal::JournalRecord,
    medication::Medication, review::RiskAssessment,
};

/// Reviews a medication list before a prescription is stored.
///
/// Implementations must be pure: the same medications always produce the
/// same assessment.
pub trait SafetyReviewer: Send + Sync {
    fn review(&self, medications: &[Medication]) -> RiskAssessment;
}

/// Produces simulated health telemetry for every credential in a pool.
///
/// Returns a new pool in the same order. Identity fields (id, label,
/// provider, mask, primary flag) must be carried over unchanged.
pub trait HealthProbe: Send {
    fn check(&mut self, pool: &[ApiKeyCredential], now: DateTime<Utc>) -> Vec<ApiKeyCredential>;
}

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// The journal: the immutable record of applied commands.
///
/// A failed append is fatal for the command being applied; the controller
/// returns the error and the caller keeps its previous snapshot.
pub trait JournalWriter: Send + Sync {
    fn append(&self, record: &JournalRecord) -> RxResult<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A journal that accepts and drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullJournal;

impl JournalWriter for NullJournal {
    fn append(&self, _record: &JournalRecord) -> RxResult<()> {
        Ok(())
    }
}
