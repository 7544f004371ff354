//! Patient dashboard: health stats, upcoming appointments, medical history.

use leptos::prelude::*;

use crate::components::portal_header::PortalHeader;
use crate::components::spinner::LoadingSpinner;
use crate::components::stat_card::StatCard;
use crate::net::api::{ApiError, PortalApi};
use crate::net::types::{Appointment, MedicalRecord, PatientDashboard};
use crate::pages::doctor_dashboard::LOAD_FAILED_MESSAGE;
use crate::state::session::SessionStore;

#[component]
pub fn PatientDashboardPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let api = expect_context::<PortalApi>();

    let dashboard = LocalResource::new(move || {
        let api = api.clone();
        let store = store.clone();
        async move {
            let Some(token) = store.token() else {
                return Err(ApiError::Unavailable);
            };
            let result = api.patient_dashboard(&token).await;
            if result.as_ref().is_err_and(ApiError::is_unauthorized) {
                store.logout();
            }
            result
        }
    });

    view! {
        <div class="dashboard dashboard--patient">
            <PortalHeader subtitle="Patient Portal"/>
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

fn render_dashboard(data: PatientDashboard) -> impl IntoView {
    let PatientDashboard { patient, stats, upcoming_appointments, recent_medical_history } = data;
    let greeting = format!("Welcome back, {}", patient.first_name());

    view! {
        <section class="dashboard__welcome">
            <h2>{greeting}</h2>
            <p>"Here is an overview of your health."</p>
        </section>

        <section class="dashboard__stats">
            <StatCard label="Upcoming Appointments" value=stats.upcoming_appointments accent="blue"/>
            <StatCard label="Active Conditions" value=stats.active_medical_conditions accent="orange"/>
            <StatCard label="Current Medications" value=stats.current_medications accent="green"/>
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
            <h3>"Medical History"</h3>
            {if recent_medical_history.is_empty() {
                view! { <p class="dashboard__empty">"No medical records"</p> }.into_any()
            } else {
                view! {
                    <ul class="record-list">
                        {recent_medical_history.into_iter().map(record_row).collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </section>
    }
}

fn appointment_row(appointment: Appointment) -> impl IntoView {
    let doctor = appointment.doctor_label().to_owned();
    let when = format!("{} at {}", appointment.date_label(), appointment.time_label());
    let reason = appointment.reason_label().to_owned();
    view! {
        <li class="appointment-list__item">
            <span class="appointment-list__name">{doctor}</span>
            <span class="appointment-list__when">{when}</span>
            <span class="appointment-list__reason">{reason}</span>
        </li>
    }
}

fn record_row(record: MedicalRecord) -> impl IntoView {
    let diagnosed = format!("Diagnosed: {}", record.diagnosed_label());
    let status = record.status_label().to_owned();
    let status_class = if record.is_active() { "record-list__status record-list__status--active" } else { "record-list__status" };
    view! {
        <li class="record-list__item">
            <span class="record-list__condition">{record.condition}</span>
            <span class="record-list__diagnosed">{diagnosed}</span>
            <span class=status_class>{status}</span>
        </li>
    }
}
