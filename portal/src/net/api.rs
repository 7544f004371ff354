//! REST API client for the portal backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call returns
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Non-2xx responses keep the
//! server's human-readable `message` so auth forms can show it verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{AuthResponse, DoctorDashboard, LoginRequest, PatientDashboard, SignupProfile, User};
#[cfg(feature = "hydrate")]
use super::types::{Envelope, MeResponse};

/// Shown when the API cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server. Please check your connection and try again.";

/// Errors produced by portal API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API responded with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// HTTP is not available in this build (SSR or native).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Text to show next to a form. Prefers the server's own message, then a
    /// connectivity hint for network failures, then `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.trim().to_owned(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            _ => fallback.to_owned(),
        }
    }

    /// Whether the API rejected the bearer token itself.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// Authentication collaborator used by the session store.
///
/// Futures are `?Send` because browser fetch futures are not thread-safe.
#[async_trait(?Send)]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /auth/signup`.
    async fn signup(&self, profile: &SignupProfile) -> Result<AuthResponse, ApiError>;

    /// `GET /auth/me` with the given bearer token.
    async fn me(&self, token: &str) -> Result<User, ApiError>;
}

/// HTTP client for the portal API rooted at `base_url` (already ending in `/api`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalApi {
    base_url: String,
}

impl PortalApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Client pointed at the compile-time configured API.
    #[must_use]
    pub fn from_config() -> Self {
        Self::new(crate::config::api_base_url())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// `GET /doctor/dashboard`.
    pub async fn doctor_dashboard(&self, token: &str) -> Result<DoctorDashboard, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let envelope: Envelope<DoctorDashboard> = get_json(&self.url("/doctor/dashboard"), Some(token)).await?;
            Ok(envelope.data)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url("/doctor/dashboard"), token);
            Err(ApiError::Unavailable)
        }
    }

    /// `GET /patient/dashboard`.
    pub async fn patient_dashboard(&self, token: &str) -> Result<PatientDashboard, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let envelope: Envelope<PatientDashboard> = get_json(&self.url("/patient/dashboard"), Some(token)).await?;
            Ok(envelope.data)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url("/patient/dashboard"), token);
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for PortalApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json(&self.url("/auth/login"), request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable)
        }
    }

    async fn signup(&self, profile: &SignupProfile) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json(&self.url("/auth/signup"), profile).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = profile;
            Err(ApiError::Unavailable)
        }
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let body: MeResponse = get_json(&self.url("/auth/me"), Some(token)).await?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
            Err(ApiError::Unavailable)
        }
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Pull the human-readable message out of an error response body.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(body: &str) -> Option<String> {
    let parsed: super::types::ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
}

#[cfg(feature = "hydrate")]
async fn post_json<B, T>(url: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode_response(resp).await
}

#[cfg(feature = "hydrate")]
async fn get_json<T>(url: &str, token: Option<&str>) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let mut request = gloo_net::http::Request::get(url);
    if let Some(token) = token {
        request = request.header("Authorization", &bearer(token));
    }
    let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    decode_response(resp).await
}

#[cfg(feature = "hydrate")]
async fn decode_response<T>(resp: gloo_net::http::Response) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, message: error_message_from_body(&body) });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
