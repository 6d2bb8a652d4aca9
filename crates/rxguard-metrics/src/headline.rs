//! Headline counters shown at the top of every dashboard.

use serde::{Deserialize, Serialize};

use rxguard_contracts::prescription::{Prescription, PrescriptionStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub total: usize,
    pub pending: usize,
    pub flagged: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl Headline {
    /// Flagged share of the total as a whole percentage, or `None` when
    /// there is nothing to divide by.
    pub fn flagged_percent(&self) -> Option<u32> {
        (self.total > 0).then(|| ((self.flagged as f64 / self.total as f64) * 100.0).round() as u32)
    }
}

pub fn headline(prescriptions: &[Prescription], organization_id: Option<&str>) -> Headline {
    prescriptions
        .iter()
        .filter(|p| p.in_organization(organization_id))
        .fold(Headline::default(), |mut h, p| {
            h.total += 1;
            match p.status {
                PrescriptionStatus::Pending => h.pending += 1,
                PrescriptionStatus::Flagged => h.flagged += 1,
                PrescriptionStatus::Approved => h.approved += 1,
                PrescriptionStatus::Rejected => h.rejected += 1,
            }
            h
        })
}
