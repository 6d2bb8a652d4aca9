//! Derived analytics rows. These are recomputed on every read and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of prescription activity, for a time-series chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetricPoint {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub total_prescriptions: usize,
    pub flagged_prescriptions: usize,
}

/// Prescription volume for one assigned doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorStat {
    pub doctor_id: String,
    pub total_prescriptions: usize,
    pub flagged_prescriptions: usize,
}
