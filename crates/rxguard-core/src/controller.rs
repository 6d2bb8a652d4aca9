//! The RxGuard controller: the single owner of state transitions.
//!
//! Every user action arrives as a `Command`. The controller applies it to
//! a borrowed `AppState` and returns a new snapshot:
//!
//!   Snapshot → Validate → Apply (review / probe as needed) → Journal → New snapshot
//!
//! The input snapshot is never modified. If validation or the journal append
//! fails, the caller keeps its previous snapshot untouched.

use tracing::{debug, info, warn};

use rxguard_contracts::{
    credential::{mask_key, ApiKeyCredential, ApiKeyStatus},
    error::{RxGuardError, RxResult},
    journal::JournalRecord,
    prescription::{Prescription, PrescriptionDraft, PrescriptionStatus},
};

use crate::{
    command::Command,
    state::AppState,
    traits::{Clock, HealthProbe, JournalWriter, SafetyReviewer},
};

/// Applies commands to application-state snapshots.
///
/// The controller owns the collaborators commands need: the safety reviewer
/// for new prescriptions, the health probe for the key pool, the journal,
/// and the clock used for every timestamp it writes.
pub struct Controller {
    reviewer: Box<dyn SafetyReviewer>,
    probe: Box<dyn HealthProbe>,
    journal: Box<dyn JournalWriter>,
    clock: Box<dyn Clock>,
}

impl Controller {
    pub fn new(
        reviewer: Box<dyn SafetyReviewer>,
        probe: Box<dyn HealthProbe>,
        journal: Box<dyn JournalWriter>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { reviewer, probe, journal, clock }
    }

    /// Apply `command` to `state` and return the resulting snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the command names a prescription, user, doctor, or
    ///   key that is not in `state`
    /// - `EmptyMedicationList` when a composed prescription has no medications
    /// - `JournalWriteFailed` when the journal rejects the record
    ///
    /// Empty outcomes (no interactions, no usable key) are not errors.
    pub fn dispatch(&mut self, state: &AppState, command: Command) -> RxResult<AppState> {
        let kind = command.kind();
        debug!(command = kind, "applying command");

        let mut next = state.clone();
        let (subject_id, summary) = match command {
            Command::ComposePrescription { draft } => {
                let prescription = self.compose(state, draft)?;
                let summary = format!(
                    "composed prescription for {} with status {} (risk {:.2})",
                    prescription.patient_name,
                    prescription.status,
                    prescription.ai_risk_score.value()
                );
                let id = prescription.id.clone();
                next.prescriptions.push(prescription);
                (Some(id), summary)
            }

            Command::UpdatePrescriptionStatus { id, status } => {
                let now = self.clock.now();
                let prescription = next
                    .prescriptions
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| not_found("prescription", &id))?;
                let previous = prescription.status;
                prescription.status = status;
                prescription.updated_at = now;
                (Some(id), format!("status {previous} -> {status}"))
            }

            Command::UpdateUser { id, patch } => {
                let user = next
                    .users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or_else(|| not_found("user", &id))?;
                *user = user.patched(&patch);
                (Some(id), "user profile updated".to_string())
            }

            Command::AddApiKey { label, provider, raw_key } => {
                let key = ApiKeyCredential {
                    id: format!("key-{}", uuid::Uuid::new_v4()),
                    label,
                    provider,
                    key_masked: mask_key(&raw_key),
                    status: ApiKeyStatus::Untested,
                    success_rate: 0.0,
                    error_rate: 0.0,
                    last_checked_at: Some(self.clock.now()),
                    is_primary: next.api_keys.is_empty(),
                };
                let summary = format!("added key '{}' ({})", key.label, key.key_masked);
                let id = key.id.clone();
                next.api_keys.push(key);
                (Some(id), summary)
            }

            Command::DeleteApiKey { id } => {
                let before = next.api_keys.len();
                next.api_keys.retain(|k| k.id != id);
                if next.api_keys.len() == before {
                    return Err(not_found("api key", &id));
                }
                (Some(id), "api key deleted".to_string())
            }

            Command::SetPrimaryKey { id } => {
                if !next.api_keys.iter().any(|k| k.id == id) {
                    return Err(not_found("api key", &id));
                }
                // Clearing every other flag keeps at most one primary in the pool.
                for key in &mut next.api_keys {
                    key.is_primary = key.id == id;
                }
                (Some(id), "primary key changed".to_string())
            }

            Command::RunHealthCheck => {
                next.api_keys = self.probe.check(&state.api_keys, self.clock.now());
                let down = next
                    .api_keys
                    .iter()
                    .filter(|k| k.status == ApiKeyStatus::Down)
                    .count();
                if down > 0 {
                    warn!(down, total = next.api_keys.len(), "health check found unavailable keys");
                }
                (None, format!("health check over {} key(s), {} down", next.api_keys.len(), down))
            }

            Command::SetAutoRotation { enabled } => {
                next.auto_rotation_enabled = enabled;
                (None, format!("auto rotation {}", if enabled { "enabled" } else { "disabled" }))
            }
        };

        let record = JournalRecord {
            command_kind: kind.to_string(),
            summary,
            subject_id,
            timestamp: self.clock.now(),
        };
        self.journal.append(&record)?;

        info!(command = kind, subject = ?record.subject_id, "command applied");
        Ok(next)
    }

    /// Build a reviewed prescription from a draft.
    fn compose(&self, state: &AppState, draft: PrescriptionDraft) -> RxResult<Prescription> {
        if draft.medications.is_empty() {
            return Err(RxGuardError::EmptyMedicationList {
                patient: draft.patient_name,
            });
        }
        if !state.doctors.iter().any(|d| d.id == draft.assigned_doctor_id) {
            return Err(not_found("doctor", &draft.assigned_doctor_id));
        }

        let assessment = self.reviewer.review(&draft.medications);
        let status = if assessment.has_interactions() {
            PrescriptionStatus::Flagged
        } else {
            PrescriptionStatus::Pending
        };
        let now = self.clock.now();

        Ok(Prescription {
            id: format!("rx-{}", uuid::Uuid::new_v4()),
            patient_name: draft.patient_name,
            age: draft.age,
            diagnosis: draft.diagnosis,
            medications: draft.medications,
            status,
            assigned_doctor_id: draft.assigned_doctor_id,
            organization_id: draft.organization_id,
            ai_review_summary: assessment.summary,
            ai_risk_score: assessment.score,
            ai_flags: assessment.flags,
            created_at: now,
            updated_at: now,
            patient_instructions_en: draft.patient_instructions_en,
            patient_instructions_ar: draft.patient_instructions_ar,
        })
    }
}

fn not_found(kind: &'static str, id: &str) -> RxGuardError {
    RxGuardError::NotFound {
        kind,
        id: id.to_string(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use rxguard_contracts::{
        credential::{ApiKeyCredential, ApiKeyStatus, Provider},
        directory::{Doctor, Role, User, UserPatch},
        error::{RxGuardError, RxResult},
        interaction::{InteractionRule, Severity},
        journal::JournalRecord,
        medication::Medication,
        prescription::{PrescriptionDraft, PrescriptionStatus, RiskScore},
        review::RiskAssessment,
    };

    use crate::{
        command::Command,
        state::AppState,
        traits::{FixedClock, HealthProbe, JournalWriter, SafetyReviewer},
    };

    use super::Controller;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    /// Flags any list that contains "warfarin".
    struct MockReviewer;

    impl SafetyReviewer for MockReviewer {
        fn review(&self, medications: &[Medication]) -> RiskAssessment {
            let hit = medications.iter().any(|m| m.normalized_name() == "warfarin");
            let interactions = if hit {
                vec![InteractionRule {
                    id: "warfarin-aspirin".to_string(),
                    drug_a: "Warfarin".to_string(),
                    drug_b: "Aspirin".to_string(),
                    severity: Severity::Major,
                    message_en: "bleeding risk".to_string(),
                    message_ar: "نزيف".to_string(),
                }]
            } else {
                vec![]
            };
            RiskAssessment {
                score: RiskScore::new(if hit { 0.7 } else { 0.2 }).unwrap(),
                flags: vec![if hit { "bleeding risk" } else { "no major risk" }.to_string()],
                summary: "mock review".to_string(),
                interactions,
            }
        }
    }

    /// Marks every key down and counts invocations.
    struct MockProbe {
        calls: Arc<Mutex<u32>>,
    }

    impl HealthProbe for MockProbe {
        fn check(&mut self, pool: &[ApiKeyCredential], now: DateTime<Utc>) -> Vec<ApiKeyCredential> {
            *self.calls.lock().unwrap() += 1;
            pool.iter()
                .map(|k| ApiKeyCredential {
                    status: ApiKeyStatus::Down,
                    success_rate: 0.0,
                    error_rate: 1.0,
                    last_checked_at: Some(now),
                    ..k.clone()
                })
                .collect()
        }
    }

    /// Records every journal append; optionally refuses them.
    struct MockJournal {
        records: Arc<Mutex<Vec<JournalRecord>>>,
        fail: bool,
    }

    impl JournalWriter for MockJournal {
        fn append(&self, record: &JournalRecord) -> RxResult<()> {
            if self.fail {
                return Err(RxGuardError::JournalWriteFailed {
                    reason: "disk full".to_string(),
                });
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct Harness {
        controller: Controller,
        records: Arc<Mutex<Vec<JournalRecord>>>,
        probe_calls: Arc<Mutex<u32>>,
    }

    fn harness(fail_journal: bool) -> Harness {
        let records = Arc::new(Mutex::new(vec![]));
        let probe_calls = Arc::new(Mutex::new(0));
        let controller = Controller::new(
            Box::new(MockReviewer),
            Box::new(MockProbe { calls: Arc::clone(&probe_calls) }),
            Box::new(MockJournal { records: Arc::clone(&records), fail: fail_journal }),
            Box::new(FixedClock(t0())),
        );
        Harness { controller, records, probe_calls }
    }

    fn key(id: &str, status: ApiKeyStatus, primary: bool) -> ApiKeyCredential {
        ApiKeyCredential {
            id: id.to_string(),
            label: format!("{id} label"),
            provider: Provider::OpenAi,
            key_masked: "************ABCD".to_string(),
            status,
            success_rate: 0.99,
            error_rate: 0.01,
            last_checked_at: None,
            is_primary: primary,
        }
    }

    fn base_state() -> AppState {
        AppState {
            users: vec![User {
                id: "user-doc-1".to_string(),
                name: "Dr. Emily Carter".to_string(),
                email: "emily@example.org".to_string(),
                role: Role::Doctor,
                organization_id: Some("org-1".to_string()),
            }],
            doctors: vec![Doctor {
                id: "doc-1".to_string(),
                user_id: "user-doc-1".to_string(),
                specialty: "Internal Medicine".to_string(),
                license_number: "IM-1".to_string(),
            }],
            api_keys: vec![
                key("key-1", ApiKeyStatus::Active, true),
                key("key-2", ApiKeyStatus::Degraded, false),
            ],
            ..AppState::default()
        }
    }

    fn draft(meds: &[&str]) -> PrescriptionDraft {
        PrescriptionDraft {
            patient_name: "Maria Rodriguez".to_string(),
            age: 67,
            diagnosis: "Atrial fibrillation".to_string(),
            medications: meds
                .iter()
                .map(|m| Medication::new(*m, "5 mg", "once daily", "30 days"))
                .collect(),
            assigned_doctor_id: "doc-1".to_string(),
            organization_id: "org-1".to_string(),
            patient_instructions_en: None,
            patient_instructions_ar: None,
        }
    }

    // ── ComposePrescription ──────────────────────────────────────────────────

    #[test]
    fn compose_with_interaction_is_flagged() {
        let mut h = harness(false);
        let state = base_state();

        let next = h
            .controller
            .dispatch(&state, Command::ComposePrescription { draft: draft(&["Warfarin", "Aspirin"]) })
            .unwrap();

        assert!(state.prescriptions.is_empty(), "input snapshot must not change");
        assert_eq!(next.prescriptions.len(), 1);
        let rx = &next.prescriptions[0];
        assert!(rx.id.starts_with("rx-"));
        assert_eq!(rx.status, PrescriptionStatus::Flagged);
        assert_eq!(rx.ai_risk_score.value(), 0.7);
        assert_eq!(rx.ai_flags, vec!["bleeding risk".to_string()]);
        assert_eq!(rx.created_at, t0());
        assert_eq!(rx.updated_at, t0());
    }

    #[test]
    fn compose_without_interaction_is_pending() {
        let mut h = harness(false);
        let next = h
            .controller
            .dispatch(&base_state(), Command::ComposePrescription { draft: draft(&["Lisinopril"]) })
            .unwrap();

        assert_eq!(next.prescriptions[0].status, PrescriptionStatus::Pending);
        assert_eq!(next.prescriptions[0].ai_risk_score.value(), 0.2);
    }

    #[test]
    fn compose_rejects_empty_medication_list() {
        let mut h = harness(false);
        let err = h
            .controller
            .dispatch(&base_state(), Command::ComposePrescription { draft: draft(&[]) })
            .unwrap_err();

        assert!(matches!(err, RxGuardError::EmptyMedicationList { .. }));
        assert!(h.records.lock().unwrap().is_empty(), "rejected commands are not journaled");
    }

    #[test]
    fn compose_rejects_unknown_doctor() {
        let mut h = harness(false);
        let mut d = draft(&["Lisinopril"]);
        d.assigned_doctor_id = "doc-404".to_string();

        let err = h
            .controller
            .dispatch(&base_state(), Command::ComposePrescription { draft: d })
            .unwrap_err();
        assert!(matches!(err, RxGuardError::NotFound { kind: "doctor", .. }));
    }

    // ── UpdatePrescriptionStatus ─────────────────────────────────────────────

    #[test]
    fn status_update_stamps_updated_at() {
        let mut h = harness(false);
        let composed = h
            .controller
            .dispatch(&base_state(), Command::ComposePrescription { draft: draft(&["Lisinopril"]) })
            .unwrap();
        let id = composed.prescriptions[0].id.clone();

        let next = h
            .controller
            .dispatch(
                &composed,
                Command::UpdatePrescriptionStatus { id: id.clone(), status: PrescriptionStatus::Approved },
            )
            .unwrap();

        let rx = next.prescription(&id).unwrap();
        assert_eq!(rx.status, PrescriptionStatus::Approved);
        assert_eq!(rx.updated_at, t0());

        let records = h.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].command_kind, "update-prescription-status");
        assert!(records[1].summary.contains("pending -> approved"));
    }

    #[test]
    fn status_update_unknown_id_is_not_found() {
        let mut h = harness(false);
        let err = h
            .controller
            .dispatch(
                &base_state(),
                Command::UpdatePrescriptionStatus {
                    id: "rx-404".to_string(),
                    status: PrescriptionStatus::Rejected,
                },
            )
            .unwrap_err();
        assert!(matches!(err, RxGuardError::NotFound { kind: "prescription", .. }));
    }

    // ── Key pool commands ────────────────────────────────────────────────────

    #[test]
    fn add_key_masks_secret_and_is_untested() {
        let mut h = harness(false);
        let next = h
            .controller
            .dispatch(
                &base_state(),
                Command::AddApiKey {
                    label: "New".to_string(),
                    provider: Provider::Azure,
                    raw_key: "sk-live-123456WXYZ".to_string(),
                },
            )
            .unwrap();

        let added = next.api_keys.last().unwrap();
        assert_eq!(added.key_masked, "************WXYZ");
        assert_eq!(added.status, ApiKeyStatus::Untested);
        assert!(!added.is_primary, "pool already had keys");
        assert!(!format!("{:?}", next).contains("sk-live"), "raw key must not be kept");
    }

    #[test]
    fn first_key_in_empty_pool_becomes_primary() {
        let mut h = harness(false);
        let next = h
            .controller
            .dispatch(
                &AppState::default(),
                Command::AddApiKey {
                    label: "Only".to_string(),
                    provider: Provider::Other,
                    raw_key: "abcd".to_string(),
                },
            )
            .unwrap();
        assert!(next.api_keys[0].is_primary);
    }

    #[test]
    fn set_primary_clears_other_flags() {
        let mut h = harness(false);
        let next = h
            .controller
            .dispatch(&base_state(), Command::SetPrimaryKey { id: "key-2".to_string() })
            .unwrap();

        let primaries: Vec<&str> = next
            .api_keys
            .iter()
            .filter(|k| k.is_primary)
            .map(|k| k.id.as_str())
            .collect();
        assert_eq!(primaries, vec!["key-2"]);
    }

    #[test]
    fn delete_unknown_key_is_not_found() {
        let mut h = harness(false);
        let err = h
            .controller
            .dispatch(&base_state(), Command::DeleteApiKey { id: "key-9".to_string() })
            .unwrap_err();
        assert!(matches!(err, RxGuardError::NotFound { kind: "api key", .. }));

        let next = h
            .controller
            .dispatch(&base_state(), Command::DeleteApiKey { id: "key-1".to_string() })
            .unwrap();
        assert_eq!(next.api_keys.len(), 1);
    }

    #[test]
    fn health_check_replaces_pool_with_probe_result() {
        let mut h = harness(false);
        let next = h.controller.dispatch(&base_state(), Command::RunHealthCheck).unwrap();

        assert_eq!(*h.probe_calls.lock().unwrap(), 1);
        assert!(next.api_keys.iter().all(|k| k.status == ApiKeyStatus::Down));
        assert!(next.api_keys.iter().all(|k| k.last_checked_at == Some(t0())));
        assert!(next.api_keys[0].is_primary, "identity fields survive the probe");
    }

    // ── Misc ─────────────────────────────────────────────────────────────────

    #[test]
    fn update_user_and_auto_rotation() {
        let mut h = harness(false);
        let next = h
            .controller
            .dispatch(
                &base_state(),
                Command::UpdateUser {
                    id: "user-doc-1".to_string(),
                    patch: UserPatch {
                        name: Some("Dr. E. Carter".to_string()),
                        ..UserPatch::default()
                    },
                },
            )
            .unwrap();
        assert_eq!(next.user("user-doc-1").unwrap().name, "Dr. E. Carter");

        let next = h
            .controller
            .dispatch(&next, Command::SetAutoRotation { enabled: false })
            .unwrap();
        assert!(!next.auto_rotation_enabled);
    }

    #[test]
    fn journal_failure_aborts_command() {
        let mut h = harness(true);
        let err = h
            .controller
            .dispatch(&base_state(), Command::SetAutoRotation { enabled: false })
            .unwrap_err();
        assert!(matches!(err, RxGuardError::JournalWriteFailed { .. }));
    }

    #[test]
    fn command_wire_format_matches_journal_kind() {
        let cmd = Command::SetPrimaryKey { id: "key-2".to_string() };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["kind"], cmd.kind());
        assert_eq!(json["id"], "key-2");

        let parsed: Command =
            serde_json::from_str(r#"{"kind":"set-auto-rotation","enabled":true}"#).unwrap();
        assert_eq!(parsed, Command::SetAutoRotation { enabled: true });
        assert_eq!(parsed.kind(), "set-auto-rotation");
    }
}
