//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session store owns the authoritative
//! copy and publishes snapshots of this type into an `RwSignal` context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, User};

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true only until the persisted session has been restored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Boot state: nothing restored yet.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Settled state for `user`.
    #[must_use]
    pub fn ready(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    /// Role of the signed-in user, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}
