//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render portal chrome and the route-protection wrapper while
//! reading shared auth state from Leptos context providers.

pub mod portal_header;
pub mod protected_route;
pub mod role_toggle;
pub mod spinner;
pub mod stat_card;
