//! # portal
//!
//! Leptos + WASM frontend for the CuraDocs healthcare portal.
//!
//! This crate contains the session store, the role-based route guard, the
//! login/signup screens and the doctor/patient dashboards. The host server
//! renders it with the `ssr` feature; the browser bundle is built with
//! `hydrate`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("portal: console logger unavailable: {e}");
    }
    log::info!("portal: hydrating");
    leptos::mount::hydrate_body(app::App);
}
