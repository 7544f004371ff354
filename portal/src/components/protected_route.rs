//! Role-gated route wrapper.
//!
//! DESIGN
//! ======
//! Rendering follows [`decide`]: a spinner while the session restores, the
//! children once authorized, and nothing while a redirect is in flight. The
//! redirect itself is issued by [`install_route_guard`], never from the view.
//!
//! The decision is memoized, so session updates that leave it unchanged (a
//! refreshed user record, for instance) do not remount the children.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::LoadingSpinner;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, RouteRequirement, decide, install_route_guard};
use crate::util::routes::AppRoute;

/// Renders `children` only for a session whose role `route` admits.
#[component]
pub fn ProtectedRoute(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let requirement = RouteRequirement::for_route(route);

    install_route_guard(auth, requirement.clone(), use_navigate());

    let decision = Memo::new(move |_| decide(&auth.get(), &requirement));

    move || match decision.get() {
        GuardDecision::Pending => view! { <LoadingSpinner/> }.into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
        GuardDecision::Render => children().into_any(),
    }
}
