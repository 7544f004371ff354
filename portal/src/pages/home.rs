//! Landing page. Signed-in visitors are forwarded to their dashboard.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::install_authenticated_redirect;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_authenticated_redirect(auth, use_navigate());

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1 class="home-page__brand">"CuraDocs"</h1>
                <nav class="home-page__nav">
                    <A href="/login">"Login"</A>
                    <A href="/signup">"Sign Up"</A>
                </nav>
            </header>
            <main class="home-page__hero">
                <h2>"Your health, connected."</h2>
                <p>"Book appointments, review medical records, and stay in touch with your doctor."</p>
                <div class="home-page__actions">
                    <A href="/signup">
                        <span class="btn btn--primary">"Get Started"</span>
                    </A>
                    <A href="/login">
                        <span class="btn btn--outline">"I already have an account"</span>
                    </A>
                </div>
            </main>
        </div>
    }
}
