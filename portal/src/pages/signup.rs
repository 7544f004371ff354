//! Signup page: account creation for doctors and patients.
//!
//! Mirrors the login page. Doctors must also name a specialization; patients
//! may leave a phone number. A successful signup signs the user in directly.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::role_toggle::RoleToggle;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::auth::install_authenticated_redirect;
use crate::util::validation::{SignupErrors, SignupForm, validate_signup};

#[component]
fn FieldError(message: Signal<Option<&'static str>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="auth-form__field-error">{move || message.get().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let auth = expect_context::<RwSignal<AuthState>>();
    install_authenticated_redirect(auth, use_navigate());

    let form = RwSignal::new(SignupForm::default());
    let role = RwSignal::new(Role::Patient);
    let errors = RwSignal::new(SignupErrors::default());
    let api_error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let mut input = form.get();
        input.role = role.get();
        let profile = match validate_signup(&input) {
            Ok(profile) => profile,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(SignupErrors::default());
        api_error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                let result = store.signup(profile).await;
                if let Some(message) = result.message() {
                    api_error.set(message.to_owned());
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, profile);
            busy.set(false);
        }
    };

    // One text input bound to a `SignupForm` field.
    let field = move |label: &'static str,
                      kind: &'static str,
                      placeholder: &'static str,
                      get: fn(&SignupForm) -> &String,
                      set: fn(&mut SignupForm, String)| {
        view! {
            <label class="auth-form__label">
                {label}
                <input
                    class="auth-input"
                    type=kind
                    placeholder=placeholder
                    prop:value=move || form.with(|f| get(f).clone())
                    on:input=move |ev| {
                        form.update(|f| set(f, event_target_value(&ev)));
                        api_error.set(String::new());
                    }
                />
            </label>
        }
    };

    let full_name_error = Signal::derive(move || errors.get().full_name);
    let email_error = Signal::derive(move || errors.get().email);
    let password_error = Signal::derive(move || errors.get().password);
    let confirm_error = Signal::derive(move || errors.get().confirm_password);
    let specialization_error = Signal::derive(move || errors.get().specialization);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <A href="/">
                    <h1 class="auth-card__brand">"CuraDocs"</h1>
                </A>
                <p class="auth-card__subtitle">"Create your account"</p>

                <RoleToggle role=role disabled=busy/>

                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || !api_error.get().is_empty()>
                        <p class="auth-form__error" role="alert">{move || api_error.get()}</p>
                    </Show>

                    {field("Full Name", "text", "Enter your full name", |f| &f.full_name, |f, v| f.full_name = v)}
                    <FieldError message=full_name_error/>

                    {field("Email", "email", "Enter your email", |f| &f.email, |f, v| f.email = v)}
                    <FieldError message=email_error/>

                    {field("Phone", "tel", "Optional", |f| &f.phone, |f, v| f.phone = v)}

                    <Show when=move || role.get() == Role::Doctor>
                        {field(
                            "Specialization",
                            "text",
                            "e.g. Cardiology",
                            |f| &f.specialization,
                            |f, v| f.specialization = v,
                        )}
                        <FieldError message=specialization_error/>
                    </Show>

                    {field("Password", "password", "At least 6 characters", |f| &f.password, |f, v| f.password = v)}
                    <FieldError message=password_error/>

                    {field(
                        "Confirm Password",
                        "password",
                        "Repeat your password",
                        |f| &f.confirm_password,
                        |f, v| f.confirm_password = v,
                    )}
                    <FieldError message=confirm_error/>

                    <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>

                <p class="auth-card__switch">
                    "Already have an account? "
                    <A href="/login">"Login"</A>
                </p>
            </div>
        </div>
    }
}
