//! Prescription records and the AI review fields attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{RxGuardError, RxResult},
    medication::Medication,
};

/// Review status of a prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl PrescriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Flagged => "flagged",
        }
    }
}

impl std::fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mock AI risk score, guaranteed to lie in `[0, 1]`.
///
/// Construction goes through [`RiskScore::new`], and deserialization runs
/// the same check, so a `Prescription` can never hold an out-of-range score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    /// Validate `value` and wrap it.
    ///
    /// Returns `RxGuardError::InvalidRiskScore` for NaN or values outside
    /// `[0, 1]`.
    pub fn new(value: f64) -> RxResult<Self> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(RxGuardError::InvalidRiskScore { value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Score as a whole percentage, as shown on review screens.
    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(*self)
    }
}

impl TryFrom<f64> for RiskScore {
    type Error = RxGuardError;

    fn try_from(value: f64) -> RxResult<Self> {
        Self::new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(score: RiskScore) -> f64 {
        score.0
    }
}

/// Display band for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Above 0.75 is high, above 0.4 is medium, anything else is low.
    pub fn from_score(score: RiskScore) -> Self {
        let v = score.value();
        if v > 0.75 {
            Self::High
        } else if v > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A clinical order under review.
///
/// Created by a doctor action and afterwards changed only through status
/// transitions. Prescriptions are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient_name: String,
    pub age: u32,
    pub diagnosis: String,
    /// Ordered as entered by the prescriber.
    pub medications: Vec<Medication>,
    pub status: PrescriptionStatus,
    pub assigned_doctor_id: String,
    pub organization_id: String,
    pub ai_review_summary: String,
    pub ai_risk_score: RiskScore,
    pub ai_flags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_instructions_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_instructions_ar: Option<String>,
}

impl Prescription {
    pub fn is_flagged(&self) -> bool {
        self.status == PrescriptionStatus::Flagged
    }

    /// True when `org` is `None` or equals this prescription's organization.
    pub fn in_organization(&self, org: Option<&str>) -> bool {
        org.map_or(true, |id| self.organization_id == id)
    }
}

/// What a doctor submits when composing a new prescription.
///
/// The engine fills in id, status, review fields and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionDraft {
    pub patient_name: String,
    pub age: u32,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub assigned_doctor_id: String,
    pub organization_id: String,
    #[serde(default)]
    pub patient_instructions_en: Option<String>,
    #[serde(default)]
    pub patient_instructions_ar: Option<String>,
}
