//! Error types for the RxGuard engine.
//!
//! The analytic functions are total over well-typed input and never fail;
//! errors come from validation at the edges (risk scores, raw date strings,
//! configuration) and from commands that reference a missing record.

use thiserror::Error;

/// The unified error type for the RxGuard crates.
#[derive(Debug, Error)]
pub enum RxGuardError {
    /// A command referenced a record id that does not exist in the snapshot.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A risk score was NaN or fell outside `[0, 1]`.
    #[error("risk score {value} is outside the range [0, 1]")]
    InvalidRiskScore { value: f64 },

    /// A timestamp string did not start with a `YYYY-MM-DD` calendar day.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// A prescription draft carried no medications.
    #[error("prescription for '{patient}' has no medications")]
    EmptyMedicationList { patient: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The journal could not append an entry.
    ///
    /// A command that cannot be journaled is not applied.
    #[error("journal write failed: {reason}")]
    JournalWriteFailed { reason: String },
}

/// Convenience alias used throughout the RxGuard crates.
pub type RxResult<T> = Result<T, RxGuardError>;
