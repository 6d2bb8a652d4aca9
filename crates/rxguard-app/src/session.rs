//! Mock login. "Logging in" is choosing a user from the directory; there
//! are no credentials.

use rxguard_contracts::{
    directory::{Role, User},
    error::{RxGuardError, RxResult},
};

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn login_as(&mut self, users: &[User], user_id: &str) -> RxResult<&User> {
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| RxGuardError::NotFound {
                kind: "user",
                id: user_id.to_string(),
            })?;
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True when someone is logged in with one of `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.user.as_ref().is_some_and(|u| roles.contains(&u.role))
    }
}
