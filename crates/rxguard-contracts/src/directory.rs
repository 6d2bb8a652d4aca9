//! Users, organizations, and doctor profiles.

use serde::{Deserialize, Serialize};

/// The role a mock user logs in as.
///
/// Dashboards dispatch on this with exhaustive matches, so adding a role
/// forces every dashboard site to decide what that role sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Doctor,
    Org,
    Nurse,
    Supervisor,
    PharmacyAdmin,
    Patient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// Partial update for a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<Option<String>>,
}

impl User {
    /// Apply `patch` and return the updated user.
    pub fn patched(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            role: patch.role.unwrap_or(self.role),
            organization_id: patch
                .organization_id
                .clone()
                .unwrap_or_else(|| self.organization_id.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationKind {
    Clinic,
    Hospital,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub kind: OrganizationKind,
    pub address: String,
    pub contact_email: String,
}

/// A doctor profile. `user_id` links it to the login identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub user_id: String,
    pub specialty: String,
    pub license_number: String,
}
