//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Dashboards are mounted inside `ProtectedRoute` by the app.

pub mod doctor_dashboard;
pub mod home;
pub mod login;
pub mod patient_dashboard;
pub mod signup;
