//! Dashboard statistic tile.

use leptos::prelude::*;

/// A labelled count on a dashboard stats grid.
#[component]
pub fn StatCard(label: &'static str, value: u32, #[prop(optional)] accent: &'static str) -> impl IntoView {
    let class = if accent.is_empty() { "stat-card".to_owned() } else { format!("stat-card stat-card--{accent}") };
    view! {
        <div class=class>
            <span class="stat-card__value">{value}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}
