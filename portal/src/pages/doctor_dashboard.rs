//! Doctor dashboard: practice stats, upcoming appointments, recent patients.
//!
//! Rendered only behind the doctor route guard. The payload is fetched once
//! per mount with the session token; a rejected token ends the session.

use leptos::prelude::*;

use crate::components::portal_header::PortalHeader;
use crate::components::spinner::LoadingSpinner;
use crate::components::stat_card::StatCard;
use crate::net::api::{ApiError, PortalApi};
use crate::net::types::{Appointment, DoctorDashboard, PatientSummary};
use crate::state::session::SessionStore;

pub(crate) const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

#[component]
pub fn DoctorDashboardPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let api = expect_context::<PortalApi>();

    let dashboard = LocalResource::new(move || {
        let api = api.clone();
        let store = store.clone();
        async move {
            let Some(token) = store.token() else {
                return Err(ApiError::Unavailable);
            };
            let result = api.doctor_dashboard(&token).await;
            if result.as_ref().is_err_and(ApiError::is_unauthorized) {
                store.logout();
            }
            result
        }
    });

    view! {
        <div class="dashboard dashboard--doctor">
            <PortalHeader subtitle="Doctor Portal"/>
            <main class="dashboard__body">
                <Suspense fallback=move || view! { <LoadingSpinner/> }>
                    {move || {
                        dashboard
                            .get()
                            .map(|result| match result {
                                Ok(data) => render_dashboard(data).into_any(),
                                Err(err) => {
                                    let message = err.user_message(LOAD_FAILED_MESSAGE);
                                    view! { <p class="dashboard__error" role="alert">{message}</p> }.into_any()
                                }
                            })
                    }}
                </Suspense>
            </main>
        </div>
    }
}

fn render_dashboard(data: DoctorDashboard) -> impl IntoView {
    let DoctorDashboard { doctor, stats, upcoming_appointments, recent_patients } = data;
    let greeting = format!("Welcome, Dr. {}", doctor.last_name());
    let specialization = doctor.specialization_label().to_owned();

    view! {
        <section class="dashboard__welcome">
            <h2>{greeting}</h2>
            <p class="dashboard__specialization">{specialization}</p>
        </section>

        <section class="dashboard__stats">
            <StatCard label="Total Patients" value=stats.total_patients accent="blue"/>
            <StatCard label="Upcoming Appointments" value=stats.upcoming_appointments accent="green"/>
            <StatCard label="Total Appointments" value=stats.total_appointments accent="purple"/>
            <StatCard label="Completed" value=stats.completed_appointments accent="orange"/>
        </section>

        <section class="dashboard__panel">
            <h3>"Upcoming Appointments"</h3>
            {if upcoming_appointments.is_empty() {
                view! { <p class="dashboard__empty">"No upcoming appointments"</p> }.into_any()
            } else {
                view! {
                    <ul class="appointment-list">
                        {upcoming_appointments.into_iter().map(appointment_row).collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </section>

        <section class="dashboard__panel">
            <h3>"Recent Patients"</h3>
            {if recent_patients.is_empty() {
                view! { <p class="dashboard__empty">"No patients yet"</p> }.into_any()
            } else {
                view! {
                    <ul class="patient-list">
                        {recent_patients.into_iter().map(patient_row).collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </section>
    }
}

fn appointment_row(appointment: Appointment) -> impl IntoView {
    let name = appointment.patient_label().to_owned();
    let when = format!("{} at {}", appointment.date_label(), appointment.time_label());
    let reason = appointment.reason_label().to_owned();
    view! {
        <li class="appointment-list__item">
            <span class="appointment-list__name">{name}</span>
            <span class="appointment-list__when">{when}</span>
            <span class="appointment-list__reason">{reason}</span>
        </li>
    }
}

fn patient_row(patient: PatientSummary) -> impl IntoView {
    view! {
        <li class="patient-list__item">
            <span class="patient-list__name">{patient.full_name}</span>
            <span class="patient-list__email">{patient.email}</span>
        </li>
    }
}
