//! Dashboard header with brand and logout.

use leptos::prelude::*;

use crate::state::session::SessionStore;

/// Header bar shared by both dashboards. Logging out clears the session; the
/// route guard then sends the user to `/login`.
#[component]
pub fn PortalHeader(subtitle: &'static str) -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let on_logout = move |_| store.logout();

    view! {
        <header class="portal-header">
            <div class="portal-header__brand">
                <h1>"CuraDocs"</h1>
                <p class="portal-header__subtitle">{subtitle}</p>
            </div>
            <button class="btn btn--outline portal-header__logout" on:click=on_logout>
                "Logout"
            </button>
        </header>
    }
}
