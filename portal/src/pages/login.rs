//! Login page: email + password + role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits through the shared `SessionStore`. On success the authenticated
//! redirect effect moves the user to their dashboard; on failure the store's
//! message is shown above the form. The submit button stays disabled while a
//! request is pending.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::role_toggle::RoleToggle;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::auth::install_authenticated_redirect;
use crate::util::validation::{LoginErrors, validate_login};

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let auth = expect_context::<RwSignal<AuthState>>();
    install_authenticated_redirect(auth, use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Patient);
    let show_password = RwSignal::new(false);
    let errors = RwSignal::new(LoginErrors::default());
    let api_error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(LoginErrors::default());
        api_error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            let role_value = role.get();
            leptos::task::spawn_local(async move {
                let result = store.login(&email_value, &password_value, role_value).await;
                if let Some(message) = result.message() {
                    api_error.set(message.to_owned());
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, email_value, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <A href="/">
                    <h1 class="auth-card__brand">"CuraDocs"</h1>
                </A>
                <p class="auth-card__subtitle">"Welcome back"</p>

                <RoleToggle role=role disabled=busy/>

                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || !api_error.get().is_empty()>
                        <p class="auth-form__error" role="alert">{move || api_error.get()}</p>
                    </Show>

                    <label class="auth-form__label">
                        "Email"
                        <input
                            class="auth-input"
                            class:auth-input--invalid=move || errors.get().email.is_some()
                            type="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                errors.update(|e| e.email = None);
                                api_error.set(String::new());
                            }
                        />
                    </label>
                    <Show when=move || errors.get().email.is_some()>
                        <p class="auth-form__field-error">{move || errors.get().email.unwrap_or_default()}</p>
                    </Show>

                    <label class="auth-form__label">
                        "Password"
                        <input
                            class="auth-input"
                            class:auth-input--invalid=move || errors.get().password.is_some()
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                errors.update(|e| e.password = None);
                                api_error.set(String::new());
                            }
                        />
                    </label>
                    <button
                        type="button"
                        class="auth-form__reveal"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                    <Show when=move || errors.get().password.is_some()>
                        <p class="auth-form__field-error">{move || errors.get().password.unwrap_or_default()}</p>
                    </Show>

                    <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>

                <p class="auth-card__switch">
                    "Don't have an account? "
                    <A href="/signup">"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
