use super::*;

#[test]
fn paths_match_navigation_surface() {
    assert_eq!(AppRoute::Home.path(), "/");
    assert_eq!(AppRoute::Login.path(), "/login");
    assert_eq!(AppRoute::Signup.path(), "/signup");
    assert_eq!(AppRoute::DoctorDashboard.path(), "/doctor/dashboard");
    assert_eq!(AppRoute::PatientDashboard.path(), "/patient/dashboard");
}

#[test]
fn dashboards_are_role_scoped_and_the_rest_public() {
    assert_eq!(AppRoute::DoctorDashboard.allowed_roles(), &[Role::Doctor]);
    assert_eq!(AppRoute::PatientDashboard.allowed_roles(), &[Role::Patient]);
    assert!(AppRoute::Home.allowed_roles().is_empty());
    assert!(AppRoute::Login.allowed_roles().is_empty());
}

#[test]
fn default_dashboard_per_role() {
    assert_eq!(default_dashboard(Role::Doctor), AppRoute::DoctorDashboard);
    assert_eq!(default_dashboard(Role::Patient), AppRoute::PatientDashboard);
    assert_eq!(default_dashboard(Role::Unknown), AppRoute::PatientDashboard);
}
