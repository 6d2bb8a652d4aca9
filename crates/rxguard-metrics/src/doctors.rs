//! Per-doctor activity tallies.

use std::collections::{HashMap, HashSet};

use rxguard_contracts::{directory::Doctor, metrics::DoctorStat, prescription::Prescription};

/// Total and flagged counts per assigned doctor.
///
/// Only doctors present in `doctors` are counted, and doctors with no
/// prescriptions are omitted. The result is unordered; callers sort or
/// join to doctor names as they need.
pub fn doctor_activity(
    prescriptions: &[Prescription],
    doctors: &[Doctor],
    organization_id: Option<&str>,
) -> Vec<DoctorStat> {
    let known: HashSet<&str> = doctors.iter().map(|d| d.id.as_str()).collect();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for p in prescriptions {
        if !p.in_organization(organization_id) || !known.contains(p.assigned_doctor_id.as_str()) {
            continue;
        }
        let entry = counts.entry(p.assigned_doctor_id.as_str()).or_default();
        entry.0 += 1;
        if p.is_flagged() {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(doctor_id, (total, flagged))| DoctorStat {
            doctor_id: doctor_id.to_string(),
            total_prescriptions: total,
            flagged_prescriptions: flagged,
        })
        .collect()
}
