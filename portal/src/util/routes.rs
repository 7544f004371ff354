//! Logical navigation targets.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::net::types::Role;

/// Every screen the portal can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Signup,
    DoctorDashboard,
    PatientDashboard,
}

impl AppRoute {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::DoctorDashboard => "/doctor/dashboard",
            Self::PatientDashboard => "/patient/dashboard",
        }
    }

    /// Roles allowed on this screen. Empty means public.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::DoctorDashboard => &[Role::Doctor],
            Self::PatientDashboard => &[Role::Patient],
            Self::Home | Self::Login | Self::Signup => &[],
        }
    }
}

/// Landing dashboard for a role: doctors get the doctor dashboard, everyone
/// else the patient dashboard.
#[must_use]
pub const fn default_dashboard(role: Role) -> AppRoute {
    match role {
        Role::Doctor => AppRoute::DoctorDashboard,
        Role::Patient | Role::Unknown => AppRoute::PatientDashboard,
    }
}
