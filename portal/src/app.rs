//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the single `SessionStore` for the page and mirrors its state
//! into an `RwSignal<AuthState>` that pages and guards read. The persisted
//! session is restored in a client effect, so server renders always see the
//! boot state (`loading = true`) and show the spinner on protected routes.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::net::api::PortalApi;
use crate::pages::{
    doctor_dashboard::DoctorDashboardPage, home::HomePage, login::LoginPage, patient_dashboard::PatientDashboardPage,
    signup::SignupPage,
};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::routes::AppRoute;
use crate::util::storage::default_storage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth signal, the session store and the API client, then sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let api = PortalApi::from_config();
    let store = SessionStore::new(Arc::new(api.clone()), default_storage()).with_observer(move |state| {
        auth.set(state.clone());
    });

    provide_context(auth);
    provide_context(api);
    provide_context(store.clone());

    // Effects only run in the browser.
    Effect::new(move || {
        store.restore();
        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move { store.revalidate().await });
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/curadocs.css"/>
        <Title text="CuraDocs"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=AppRoute::Home.path()/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route
                    path=(StaticSegment("doctor"), StaticSegment("dashboard"))
                    view=|| {
                        view! {
                            <ProtectedRoute route=AppRoute::DoctorDashboard>
                                <DoctorDashboardPage/>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=(StaticSegment("patient"), StaticSegment("dashboard"))
                    view=|| {
                        view! {
                            <ProtectedRoute route=AppRoute::PatientDashboard>
                                <PatientDashboardPage/>
                            </ProtectedRoute>
                        }
                    }
                />
            </Routes>
        </Router>
    }
}
