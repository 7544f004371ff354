//! Session store: the single owner of "who is logged in".
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is built once at the app root with its collaborators (the
//! [`AuthApi`] client and a [`SessionStorage`] backend) and handed down via
//! context. It is the only writer of the session; every mutation publishes an
//! [`AuthState`] snapshot to the registered observer, which the app wires to
//! the `RwSignal<AuthState>` that route guards and pages read.
//!
//! LIFECYCLE
//! =========
//! `loading` starts true and flips to false exactly once, in [`SessionStore::restore`].
//! Login and signup never touch it. Malformed persisted data is treated as
//! "logged out" and only logged.
//!
//! CONCURRENCY
//! ===========
//! One login/signup may be in flight at a time. A second call while one is
//! pending fails fast with [`REQUEST_IN_PROGRESS_MESSAGE`] and never reaches
//! the API. Locks are never held across an `.await`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{AuthResponse, LoginRequest, Role, SignupProfile, User};
use crate::state::auth::AuthState;
use crate::util::storage::{self, SessionStorage, TOKEN_KEY, USER_KEY};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";
pub const REQUEST_IN_PROGRESS_MESSAGE: &str = "A sign-in request is already in progress.";

// =============================================================================
// SESSION
// =============================================================================

/// The authenticated identity plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Validate an API auth response into a session.
    fn from_response(response: AuthResponse) -> Result<Self, SessionError> {
        let token = response.token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if !response.user.role.is_known() {
            return Err(SessionError::UnknownRole);
        }
        Ok(Self { user: response.user, token: token.to_owned() })
    }
}

/// Why a persisted or returned session was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Exactly one of the two storage keys is present.
    #[error("persisted session is missing the `{0}` key")]
    MissingKey(&'static str),

    #[error("session token is empty")]
    EmptyToken,

    #[error("user record is not valid JSON: {0}")]
    UserRecord(String),

    #[error("user record has an unrecognized role")]
    UnknownRole,
}

/// Outcome of [`SessionStore::login`] and [`SessionStore::signup`].
///
/// A message exists exactly when the attempt failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthResult {
    Success,
    Failure { message: String },
}

impl AuthResult {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { message: message.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

type Observer = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Debug)]
struct Inner {
    session: Option<Session>,
    loading: bool,
    in_flight: bool,
}

/// Shared handle to the client's session. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn SessionStorage>,
    inner: Arc<Mutex<Inner>>,
    observer: Option<Observer>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("state", &self.state()).finish_non_exhaustive()
    }
}

impl SessionStore {
    /// New store in the boot state (`loading = true`, no session).
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            inner: Arc::new(Mutex::new(Inner { session: None, loading: true, in_flight: false })),
            observer: None,
        }
    }

    /// Register the callback that receives every state change.
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current user and loading flag.
    #[must_use]
    pub fn state(&self) -> AuthState {
        let inner = self.lock();
        AuthState { user: inner.session.as_ref().map(|s| s.user.clone()), loading: inner.loading }
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Bearer token for authenticated API calls.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().session.as_ref().map(|s| s.token.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Whether a login or signup call is currently awaiting the API.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().in_flight
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            let state = self.state();
            observer(&state);
        }
    }

    /// Load the persisted session. Runs once; later calls are no-ops.
    pub fn restore(&self) {
        if !self.is_loading() {
            return;
        }
        let restored = match read_persisted(self.storage.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                leptos::logging::warn!("session: discarding persisted session: {e}");
                None
            }
        };
        {
            let mut inner = self.lock();
            if inner.session.is_none() {
                inner.session = restored;
            }
            inner.loading = false;
        }
        if let Some(session) = self.session() {
            leptos::logging::log!("session: restored {} session for {}", session.role().as_str(), session.user.id);
        }
        self.notify();
    }

    /// Authenticate with email, password and role.
    ///
    /// On failure the current session, if any, is left untouched.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> AuthResult {
        let Some(_request) = self.begin_request() else {
            return AuthResult::failure(REQUEST_IN_PROGRESS_MESSAGE);
        };
        let request = LoginRequest { email: email.trim().to_owned(), password: password.to_owned(), role };
        let outcome = self.api.login(&request).await;
        self.complete("login", outcome, LOGIN_FAILED_MESSAGE)
    }

    /// Register a new account and sign in as it.
    pub async fn signup(&self, profile: SignupProfile) -> AuthResult {
        let Some(_request) = self.begin_request() else {
            return AuthResult::failure(REQUEST_IN_PROGRESS_MESSAGE);
        };
        let outcome = self.api.signup(&profile).await;
        self.complete("signup", outcome, SIGNUP_FAILED_MESSAGE)
    }

    /// Clear the session from memory and storage. Safe when logged out.
    pub fn logout(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        let previous = self.lock().session.take();
        if let Some(session) = previous {
            leptos::logging::log!("session: logged out {}", session.user.id);
        }
        self.notify();
    }

    /// Re-check the stored token with `GET /auth/me`.
    ///
    /// A rejected token or an unrecognized role ends the session. A changed
    /// user record replaces the cached one. Transport failures keep the
    /// session as is.
    pub async fn revalidate(&self) {
        let Some(token) = self.token() else {
            return;
        };
        match self.api.me(&token).await {
            Ok(user) => {
                if !user.role.is_known() {
                    if self.token().as_deref() == Some(token.as_str()) {
                        leptos::logging::warn!("session: /auth/me returned an unrecognized role, logging out");
                        self.logout();
                    }
                    return;
                }
                // Only a changed record is written back and published.
                let updated = {
                    let mut inner = self.lock();
                    match inner.session.as_mut() {
                        Some(session) if session.token == token && session.user != user => {
                            session.user = user.clone();
                            true
                        }
                        _ => false,
                    }
                };
                if updated {
                    storage::save_json(self.storage.as_ref(), USER_KEY, &user);
                    self.notify();
                }
            }
            Err(e) if e.is_unauthorized() => {
                if self.token().as_deref() == Some(token.as_str()) {
                    leptos::logging::warn!("session: token rejected by API, logging out");
                    self.logout();
                }
            }
            Err(e) => leptos::logging::warn!("session: revalidation skipped: {e}"),
        }
    }

    fn begin_request(&self) -> Option<InFlight> {
        let mut inner = self.lock();
        if inner.in_flight {
            return None;
        }
        inner.in_flight = true;
        Some(InFlight { inner: Arc::clone(&self.inner) })
    }

    fn complete(&self, op: &str, outcome: Result<AuthResponse, ApiError>, fallback: &str) -> AuthResult {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                leptos::logging::warn!("session: {op} failed: {e}");
                return AuthResult::failure(e.user_message(fallback));
            }
        };
        match Session::from_response(response) {
            Ok(session) => {
                leptos::logging::log!("session: {op} succeeded as {}", session.role().as_str());
                self.establish(session);
                AuthResult::Success
            }
            Err(e) => {
                leptos::logging::warn!("session: {op} returned an unusable session: {e}");
                AuthResult::failure(fallback)
            }
        }
    }

    fn establish(&self, session: Session) {
        self.storage.set(TOKEN_KEY, &session.token);
        storage::save_json(self.storage.as_ref(), USER_KEY, &session.user);
        self.lock().session = Some(session);
        self.notify();
    }
}

/// Clears the in-flight flag when the request future completes or is dropped.
struct InFlight {
    inner: Arc<Mutex<Inner>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).in_flight = false;
    }
}

/// Read the `token` + `user` pair. Both absent is `Ok(None)`.
fn read_persisted(storage: &dyn SessionStorage) -> Result<Option<Session>, SessionError> {
    let token = storage.get(TOKEN_KEY);
    let user_present = storage.get(USER_KEY).is_some();
    let token = match (token, user_present) {
        (None, false) => return Ok(None),
        (None, true) => return Err(SessionError::MissingKey(TOKEN_KEY)),
        (Some(_), false) => return Err(SessionError::MissingKey(USER_KEY)),
        (Some(token), true) => token,
    };
    let user: User = storage::load_json(storage, USER_KEY)
        .map_err(|e| SessionError::UserRecord(e.to_string()))?
        .ok_or(SessionError::MissingKey(USER_KEY))?;
    Session::from_response(AuthResponse { token, user }).map(Some)
}
