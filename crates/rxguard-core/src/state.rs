//! The application-state snapshot.
//!
//! `AppState` is a plain value. It is never mutated in place by the
//! controller; every applied command produces a new snapshot.

use serde::{Deserialize, Serialize};

use rxguard_contracts::{
    credential::ApiKeyCredential,
    directory::{Doctor, Organization, User},
    prescription::Prescription,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub users: Vec<User>,
    pub organizations: Vec<Organization>,
    pub doctors: Vec<Doctor>,
    pub prescriptions: Vec<Prescription>,
    pub api_keys: Vec<ApiKeyCredential>,
    /// Whether the admin enabled automatic failover between keys.
    #[serde(default = "default_auto_rotation")]
    pub auto_rotation_enabled: bool,
}

fn default_auto_rotation() -> bool {
    true
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            organizations: Vec::new(),
            doctors: Vec::new(),
            prescriptions: Vec::new(),
            api_keys: Vec::new(),
            auto_rotation_enabled: default_auto_rotation(),
        }
    }
}

impl AppState {
    pub fn prescription(&self, id: &str) -> Option<&Prescription> {
        self.prescriptions.iter().find(|p| p.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    /// The doctor profile linked to a login identity.
    pub fn doctor_for_user(&self, user_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.user_id == user_id)
    }
}
