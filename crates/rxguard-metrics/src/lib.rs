//! # rxguard-metrics
//!
//! Read-side analytics over the prescription list. Every function here is a
//! pure reduction that is recomputed on each read; nothing is cached or
//! stored.
//!
//! - [`daily_metrics`]: prescriptions per creation day, for line charts
//! - [`doctor_activity`]: prescriptions per assigned doctor
//! - [`headline`]: status counters for dashboard cards

pub mod daily;
pub mod doctors;
pub mod headline;

pub use daily::{daily_metrics, parse_day};
pub use doctors::doctor_activity;
pub use headline::{headline, Headline};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};

    use rxguard_contracts::{
        directory::Doctor,
        error::RxGuardError,
        medication::Medication,
        prescription::{Prescription, PrescriptionStatus, RiskScore},
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn rx(id: &str, created_at: &str, status: PrescriptionStatus, doctor: &str, org: &str) -> Prescription {
        let created_at: DateTime<Utc> = created_at.parse().unwrap();
        Prescription {
            id: id.to_string(),
            patient_name: "John Doe".to_string(),
            age: 54,
            diagnosis: "Hypertension".to_string(),
            medications: vec![Medication::new("Lisinopril", "10 mg", "once daily", "30 days")],
            status,
            assigned_doctor_id: doctor.to_string(),
            organization_id: org.to_string(),
            ai_review_summary: String::new(),
            ai_risk_score: RiskScore::new(0.2).unwrap(),
            ai_flags: vec![],
            created_at,
            updated_at: created_at,
            patient_instructions_en: None,
            patient_instructions_ar: None,
        }
    }

    fn doctor(id: &str) -> Doctor {
        Doctor {
            id: id.to_string(),
            user_id: format!("user-{id}"),
            specialty: "Internal Medicine".to_string(),
            license_number: "IM-0".to_string(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Prescription> {
        use PrescriptionStatus::*;
        vec![
            rx("rx-1", "2024-01-03T09:00:00Z", Pending, "doc-1", "org-1"),
            rx("rx-2", "2024-01-01T10:00:00Z", Flagged, "doc-2", "org-1"),
            rx("rx-3", "2024-01-01T12:00:00Z", Pending, "doc-1", "org-1"),
            rx("rx-4", "2024-01-02T23:59:59Z", Approved, "doc-3", "org-2"),
            rx("rx-5", "2024-01-03T00:00:00Z", Flagged, "doc-3", "org-2"),
            rx("rx-6", "2024-01-03T08:00:00Z", Rejected, "doc-9", "org-2"),
        ]
    }

    // ── daily_metrics ────────────────────────────────────────────────────────

    #[test]
    fn test_same_day_grouping() {
        let input = vec![
            rx("a", "2024-01-01T10:00:00Z", PrescriptionStatus::Flagged, "doc-1", "org-1"),
            rx("b", "2024-01-01T12:00:00Z", PrescriptionStatus::Pending, "doc-1", "org-1"),
        ];
        let points = daily_metrics(&input, None);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, day("2024-01-01"));
        assert_eq!(points[0].total_prescriptions, 2);
        assert_eq!(points[0].flagged_prescriptions, 1);
    }

    #[test]
    fn test_points_sorted_unique_and_sum_to_input() {
        let input = sample();
        let points = daily_metrics(&input, None);

        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03")]);

        let total: usize = points.iter().map(|p| p.total_prescriptions).sum();
        assert_eq!(total, input.len(), "totals must cover every prescription");
    }

    #[test]
    fn test_organization_filter() {
        let points = daily_metrics(&sample(), Some("org-2"));
        let total: usize = points.iter().map(|p| p.total_prescriptions).sum();
        assert_eq!(total, 3);
        assert_eq!(points.last().unwrap().flagged_prescriptions, 1);

        assert!(daily_metrics(&sample(), Some("org-404")).is_empty());
    }

    #[test]
    fn test_no_gap_filling() {
        let input = vec![
            rx("a", "2024-01-01T10:00:00Z", PrescriptionStatus::Pending, "doc-1", "org-1"),
            rx("b", "2024-01-05T10:00:00Z", PrescriptionStatus::Pending, "doc-1", "org-1"),
        ];
        assert_eq!(daily_metrics(&input, None).len(), 2);
        assert!(daily_metrics(&[], None).is_empty());
    }

    #[test]
    fn test_date_serializes_as_plain_day() {
        let points = daily_metrics(&sample(), Some("org-1"));
        let json = serde_json::to_value(&points[0]).unwrap();
        assert_eq!(json["date"], "2024-01-01");
    }

    // ── parse_day ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_day_accepts_timestamp_prefix() {
        assert_eq!(parse_day("2024-01-01T10:00:00Z").unwrap(), day("2024-01-01"));
        assert_eq!(parse_day("2024-02-29").unwrap(), day("2024-02-29"));
    }

    #[test]
    fn test_parse_day_rejects_malformed() {
        for bad in ["", "2024-1-1", "yesterday!", "2023-02-29T00:00:00Z"] {
            match parse_day(bad) {
                Err(RxGuardError::InvalidDate { .. }) => {}
                other => panic!("expected InvalidDate for {bad:?}, got {:?}", other),
            }
        }
    }

    // ── doctor_activity ──────────────────────────────────────────────────────

    #[test]
    fn test_doctor_activity_counts_known_doctors_only() {
        let doctors = vec![doctor("doc-1"), doctor("doc-2"), doctor("doc-3"), doctor("doc-idle")];
        let mut stats = doctor_activity(&sample(), &doctors, None);
        stats.sort_by(|a, b| a.doctor_id.cmp(&b.doctor_id));

        let ids: Vec<&str> = stats.iter().map(|s| s.doctor_id.as_str()).collect();
        assert_eq!(ids, vec!["doc-1", "doc-2", "doc-3"], "idle and unknown doctors omitted");

        // rx-6 belongs to doc-9, which is not in the doctor list.
        let total: usize = stats.iter().map(|s| s.total_prescriptions).sum();
        assert_eq!(total, 5);

        let doc3 = &stats[2];
        assert_eq!(doc3.total_prescriptions, 2);
        assert_eq!(doc3.flagged_prescriptions, 1);
    }

    #[test]
    fn test_doctor_activity_organization_filter() {
        let doctors = vec![doctor("doc-1"), doctor("doc-2"), doctor("doc-3")];
        let stats = doctor_activity(&sample(), &doctors, Some("org-1"));
        let total: usize = stats.iter().map(|s| s.total_prescriptions).sum();
        assert_eq!(total, 3);
        assert!(stats.iter().all(|s| s.doctor_id != "doc-3"));
    }

    // ── headline ─────────────────────────────────────────────────────────────

    #[test]
    fn test_headline_counts() {
        let h = headline(&sample(), None);
        assert_eq!(
            h,
            Headline { total: 6, pending: 2, flagged: 2, approved: 1, rejected: 1 }
        );
        assert_eq!(h.flagged_percent(), Some(33));
        assert_eq!(headline(&[], None).flagged_percent(), None);
    }
}
