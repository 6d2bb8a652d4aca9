//! Role dashboards.
//!
//! `Dashboard::build` matches on the user's `Role` exhaustively. Each arm
//! gathers the data its dashboard shows from the current snapshot using the
//! metrics and key-selection functions. Nothing here formats output.

use serde::Serialize;
use tracing::debug;

use rxguard_contracts::{
    credential::ApiKeyCredential,
    directory::{Organization, Role, User},
    error::{RxGuardError, RxResult},
    metrics::DailyMetricPoint,
    prescription::Prescription,
};
use rxguard_core::AppState;
use rxguard_keys::{active_key, healthy_count, primary_key};
use rxguard_metrics::{daily_metrics, doctor_activity, headline, Headline};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Doctor(DoctorDashboard),
    Org(OrgDashboard),
    Patient(PatientPortal),
    /// Roles that exist in the directory but have no screen in the demo.
    NoDashboard { user_role: Role },
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub headline: Headline,
    pub user_count: usize,
    pub doctor_count: usize,
    pub organization_count: usize,
    pub daily: Vec<DailyMetricPoint>,
    pub key_count: usize,
    pub healthy_keys: usize,
    pub primary_key_id: Option<String>,
    pub active_key: Option<ApiKeyCredential>,
    pub auto_rotation_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorDashboard {
    /// `None` when the user has no doctor profile; the queue is then empty.
    pub doctor_id: Option<String>,
    /// Newest first.
    pub queue: Vec<Prescription>,
    pub headline: Headline,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorRow {
    pub doctor_id: String,
    pub doctor_name: String,
    pub total_prescriptions: usize,
    pub flagged_prescriptions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrgDashboard {
    pub organization: Organization,
    pub doctor_count: usize,
    pub headline: Headline,
    pub daily: Vec<DailyMetricPoint>,
    /// Busiest doctor first.
    pub doctors: Vec<DoctorRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientPortal {
    pub patient_name: String,
    /// Newest first.
    pub prescriptions: Vec<Prescription>,
}

impl Dashboard {
    /// Build the dashboard `user` sees over `state`.
    ///
    /// # Errors
    ///
    /// `NotFound` when an org user has no organization, or it is missing
    /// from the snapshot.
    pub fn build(state: &AppState, user: &User) -> RxResult<Self> {
        debug!(user_id = %user.id, role = ?user.role, "building dashboard");
        let dashboard = match user.role {
            Role::Admin => Self::Admin(admin(state)),
            Role::Doctor => Self::Doctor(doctor(state, user)),
            Role::Org => Self::Org(org(state, user)?),
            Role::Patient => Self::Patient(patient(state, user)),
            Role::Nurse | Role::Supervisor | Role::PharmacyAdmin => {
                Self::NoDashboard { user_role: user.role }
            }
        };
        Ok(dashboard)
    }
}

fn admin(state: &AppState) -> AdminDashboard {
    AdminDashboard {
        headline: headline(&state.prescriptions, None),
        user_count: state.users.len(),
        doctor_count: state.users.iter().filter(|u| u.role == Role::Doctor).count(),
        organization_count: state.organizations.len(),
        daily: daily_metrics(&state.prescriptions, None),
        key_count: state.api_keys.len(),
        healthy_keys: healthy_count(&state.api_keys),
        primary_key_id: primary_key(&state.api_keys).map(|k| k.id.clone()),
        active_key: active_key(&state.api_keys).cloned(),
        auto_rotation_enabled: state.auto_rotation_enabled,
    }
}

fn doctor(state: &AppState, user: &User) -> DoctorDashboard {
    let doctor_id = state.doctor_for_user(&user.id).map(|d| d.id.clone());
    let queue = newest_first(
        state
            .prescriptions
            .iter()
            .filter(|p| doctor_id.as_deref() == Some(p.assigned_doctor_id.as_str())),
    );
    DoctorDashboard {
        headline: headline(&queue, None),
        doctor_id,
        queue,
    }
}

fn org(state: &AppState, user: &User) -> RxResult<OrgDashboard> {
    let org_id = user.organization_id.as_deref().ok_or_else(|| RxGuardError::NotFound {
        kind: "organization",
        id: format!("<none for {}>", user.id),
    })?;
    let organization = state
        .organization(org_id)
        .cloned()
        .ok_or_else(|| RxGuardError::NotFound {
            kind: "organization",
            id: org_id.to_string(),
        })?;

    let doctor_count = state
        .doctors
        .iter()
        .filter(|d| {
            state
                .user(&d.user_id)
                .is_some_and(|u| u.organization_id.as_deref() == Some(org_id))
        })
        .count();

    let mut doctors: Vec<DoctorRow> = doctor_activity(&state.prescriptions, &state.doctors, Some(org_id))
        .into_iter()
        .map(|stat| {
            let doctor_name = state
                .doctors
                .iter()
                .find(|d| d.id == stat.doctor_id)
                .and_then(|d| state.user(&d.user_id))
                .map(|u| u.name.clone())
                .unwrap_or_else(|| stat.doctor_id.clone());
            DoctorRow {
                doctor_id: stat.doctor_id,
                doctor_name,
                total_prescriptions: stat.total_prescriptions,
                flagged_prescriptions: stat.flagged_prescriptions,
            }
        })
        .collect();
    doctors.sort_by(|a, b| {
        b.total_prescriptions
            .cmp(&a.total_prescriptions)
            .then_with(|| a.doctor_id.cmp(&b.doctor_id))
    });

    Ok(OrgDashboard {
        headline: headline(&state.prescriptions, Some(org_id)),
        daily: daily_metrics(&state.prescriptions, Some(org_id)),
        organization,
        doctor_count,
        doctors,
    })
}

fn patient(state: &AppState, user: &User) -> PatientPortal {
    let name = user.name.to_lowercase();
    PatientPortal {
        patient_name: user.name.clone(),
        prescriptions: newest_first(
            state
                .prescriptions
                .iter()
                .filter(|p| p.patient_name.to_lowercase() == name),
        ),
    }
}

fn newest_first<'a>(prescriptions: impl Iterator<Item = &'a Prescription>) -> Vec<Prescription> {
    let mut out: Vec<Prescription> = prescriptions.cloned().collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}
