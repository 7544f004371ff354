//! Doctor/patient selector used by the auth forms.

#[cfg(test)]
#[path = "role_toggle_test.rs"]
mod role_toggle_test;

use leptos::prelude::*;

use crate::net::types::Role;

const SELECTABLE: [Role; 2] = [Role::Doctor, Role::Patient];

fn option_class(selected: bool) -> &'static str {
    if selected { "role-toggle__option role-toggle__option--selected" } else { "role-toggle__option" }
}

/// Two-button role picker bound to `role`.
#[component]
pub fn RoleToggle(role: RwSignal<Role>, #[prop(into, optional)] disabled: MaybeProp<bool>) -> impl IntoView {
    view! {
        <div class="role-toggle" role="radiogroup">
            {SELECTABLE
                .into_iter()
                .map(move |option| {
                    view! {
                        <button
                            type="button"
                            class=move || option_class(role.get() == option)
                            aria-pressed=move || (role.get() == option).to_string()
                            disabled=move || disabled.get().unwrap_or(false)
                            on:click=move |_| role.set(option)
                        >
                            {option.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
