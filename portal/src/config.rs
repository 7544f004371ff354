//! Build-time portal configuration.
//!
//! The API origin is baked in at compile time from `PORTAL_API_URL` (the WASM
//! bundle has no process environment). All REST paths live under `/api`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// API origin used when `PORTAL_API_URL` is unset or blank.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Base URL for REST calls, e.g. `http://localhost:5000/api`.
#[must_use]
pub fn api_base_url() -> String {
    normalize_api_base(option_env!("PORTAL_API_URL"))
}

fn normalize_api_base(raw: Option<&str>) -> String {
    let origin = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/');
    format!("{origin}/api")
}
