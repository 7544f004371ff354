//! Neutral loading indicator.

use leptos::prelude::*;

/// Full-screen spinner shown while the session is being restored or a page is
/// fetching its data.
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading-screen" role="status" aria-live="polite">
            <div class="loading-screen__spinner"></div>
        </div>
    }
}
