//! State commands accepted by the controller.

use serde::{Deserialize, Serialize};

use rxguard_contracts::{
    credential::Provider,
    directory::UserPatch,
    prescription::{PrescriptionDraft, PrescriptionStatus},
};

/// One user action against the application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Command {
    /// A doctor submits a new prescription for safety review.
    ComposePrescription { draft: PrescriptionDraft },
    UpdatePrescriptionStatus { id: String, status: PrescriptionStatus },
    UpdateUser { id: String, patch: UserPatch },
    /// The raw key is masked before it is stored; it is never kept.
    AddApiKey { label: String, provider: Provider, raw_key: String },
    DeleteApiKey { id: String },
    SetPrimaryKey { id: String },
    RunHealthCheck,
    SetAutoRotation { enabled: bool },
}

impl Command {
    /// Stable discriminant written to the journal.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ComposePrescription { .. } => "compose-prescription",
            Self::UpdatePrescriptionStatus { .. } => "update-prescription-status",
            Self::UpdateUser { .. } => "update-user",
            Self::AddApiKey { .. } => "add-api-key",
            Self::DeleteApiKey { .. } => "delete-api-key",
            Self::SetPrimaryKey { .. } => "set-primary-key",
            Self::RunHealthCheck => "run-health-check",
            Self::SetAutoRotation { .. } => "set-auto-rotation",
        }
    }
}
