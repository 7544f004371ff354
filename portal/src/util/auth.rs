//! Route guard: who may see which screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the public auth screens share one decision function so
//! redirect behavior is identical everywhere. [`decide`] is pure; the
//! `install_*` helpers are the thin reactive shell that performs navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::util::routes::{AppRoute, default_dashboard};

/// Roles permitted on a screen, fixed when the route tree is composed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    allowed_roles: Vec<Role>,
}

impl RouteRequirement {
    #[must_use]
    pub fn new(allowed_roles: impl Into<Vec<Role>>) -> Self {
        Self { allowed_roles: allowed_roles.into() }
    }

    /// Requirement declared for a logical route.
    #[must_use]
    pub fn for_route(route: AppRoute) -> Self {
        Self::new(route.allowed_roles())
    }

    /// Unrestricted requirements accept every role. Unknown roles never match
    /// a restriction.
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || (role.is_known() && self.allowed_roles.contains(&role))
    }
}

/// What a protected route should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore has not finished; show the loading indicator only.
    Pending,
    Redirect(AppRoute),
    Render,
}

/// Decide whether a protected screen renders.
#[must_use]
pub fn decide(state: &AuthState, requirement: &RouteRequirement) -> GuardDecision {
    if state.loading {
        return GuardDecision::Pending;
    }
    let Some(role) = state.role() else {
        return GuardDecision::Redirect(AppRoute::Login);
    };
    if requirement.allows(role) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(default_dashboard(role))
    }
}

/// Where a public auth screen (home, login, signup) sends an already
/// authenticated user.
#[must_use]
pub fn authenticated_redirect(state: &AuthState) -> Option<AppRoute> {
    if state.loading {
        return None;
    }
    state.role().map(default_dashboard)
}

// Redirects replace the current history entry so "back" never returns to a
// screen the user was bounced from.
fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Navigate whenever [`decide`] yields a redirect for `requirement`.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, requirement: RouteRequirement, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(target) = decide(&auth.get(), &requirement) {
            navigate(target.path(), redirect_options());
        }
    });
}

/// Send an authenticated user from a public auth screen to their dashboard.
pub fn install_authenticated_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = authenticated_redirect(&auth.get()) {
            navigate(target.path(), redirect_options());
        }
    });
}
