use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::executor::block_on;

use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

fn make_user(id: &str, role: Role) -> User {
    User {
        id: id.to_owned(),
        full_name: "Test User".to_owned(),
        email: format!("{id}@example.com"),
        role,
    }
}

fn auth_ok(token: &str, user: User) -> Result<AuthResponse, ApiError> {
    Ok(AuthResponse { token: token.to_owned(), user })
}

fn invalid_credentials() -> ApiError {
    ApiError::Status { status: 401, message: Some("Invalid credentials".to_owned()) }
}

/// Scripted API: each call pops the next queued response.
#[derive(Default)]
struct FakeApi {
    auth: Mutex<VecDeque<Result<AuthResponse, ApiError>>>,
    me: Mutex<VecDeque<Result<User, ApiError>>>,
    calls: AtomicUsize,
    last_login: Mutex<Option<LoginRequest>>,
}

impl FakeApi {
    fn with_auth(responses: Vec<Result<AuthResponse, ApiError>>) -> Self {
        Self { auth: Mutex::new(responses.into()), ..Self::default() }
    }

    fn with_me(responses: Vec<Result<User, ApiError>>) -> Self {
        Self { me: Mutex::new(responses.into()), ..Self::default() }
    }

    fn next_auth(&self) -> Result<AuthResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.auth.lock().unwrap().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        *self.last_login.lock().unwrap() = Some(request.clone());
        self.next_auth()
    }

    async fn signup(&self, _profile: &SignupProfile) -> Result<AuthResponse, ApiError> {
        self.next_auth()
    }

    async fn me(&self, _token: &str) -> Result<User, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.me.lock().unwrap().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }
}

fn store_with(api: FakeApi, storage: &MemoryStorage) -> SessionStore {
    SessionStore::new(Arc::new(api), Arc::new(storage.clone()))
}

fn restored_store(api: FakeApi, storage: &MemoryStorage) -> SessionStore {
    let store = store_with(api, storage);
    store.restore();
    store
}

fn assert_nothing_persisted(storage: &MemoryStorage) {
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
}

fn persist(storage: &MemoryStorage, token: &str, user: &User) {
    storage.set(TOKEN_KEY, token);
    storage.set(USER_KEY, &serde_json::to_string(user).unwrap());
}

fn signup_profile(role: Role) -> SignupProfile {
    SignupProfile {
        full_name: "New Person".to_owned(),
        email: "new@example.com".to_owned(),
        password: "secret1".to_owned(),
        role,
        phone: None,
        specialization: None,
    }
}

// =============================================================
// restore
// =============================================================

#[test]
fn new_store_is_loading_without_session() {
    let store = store_with(FakeApi::default(), &MemoryStorage::new());
    assert!(store.is_loading());
    assert_eq!(store.state(), AuthState::default());
}

#[test]
fn restore_with_empty_storage_settles_logged_out() {
    let store = restored_store(FakeApi::default(), &MemoryStorage::new());
    assert_eq!(store.state(), AuthState::ready(None));
}

#[test]
fn restore_with_valid_storage_populates_session() {
    let storage = MemoryStorage::new();
    let user = make_user("d1", Role::Doctor);
    persist(&storage, "tok-1", &user);

    let store = restored_store(FakeApi::default(), &storage);
    assert!(!store.is_loading());
    assert_eq!(store.session(), Some(Session { user, token: "tok-1".to_owned() }));
}

#[test]
fn restore_treats_every_malformed_shape_as_logged_out() {
    let user_json = serde_json::to_string(&make_user("p1", Role::Patient)).unwrap();
    let cases: Vec<(Option<&str>, Option<&str>)> = vec![
        (Some("tok"), None),
        (None, Some(user_json.as_str())),
        (Some("tok"), Some("{not json")),
        (Some("tok"), Some("null")),
        (Some("tok"), Some(r#"{"id":"x"}"#)),
        (Some("tok"), Some(r#"{"id":"x","fullName":"X","role":"admin"}"#)),
        (Some("   "), Some(user_json.as_str())),
    ];
    for (token, user) in cases {
        let storage = MemoryStorage::new();
        if let Some(token) = token {
            storage.set(TOKEN_KEY, token);
        }
        if let Some(user) = user {
            storage.set(USER_KEY, user);
        }
        let store = restored_store(FakeApi::default(), &storage);
        assert_eq!(store.state(), AuthState::ready(None), "token={token:?} user={user:?}");
    }
}

#[test]
fn restore_failure_leaves_storage_untouched() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "tok");
    storage.set(USER_KEY, "garbage");
    let _store = restored_store(FakeApi::default(), &storage);
    assert_eq!(storage.get(USER_KEY).as_deref(), Some("garbage"));
}

#[test]
fn loading_flips_exactly_once() {
    let storage = MemoryStorage::new();
    let transitions = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&transitions);
    let store = store_with(FakeApi::default(), &storage).with_observer(move |s| seen.lock().unwrap().push(s.loading));

    store.restore();
    persist(&storage, "tok-late", &make_user("p1", Role::Patient));
    store.restore();
    store.logout();

    assert!(!store.is_loading());
    assert_eq!(store.session(), None);
    assert_eq!(*transitions.lock().unwrap(), vec![false, false]);
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_sets_and_persists_session() {
    let storage = MemoryStorage::new();
    let api = FakeApi::with_auth(vec![auth_ok("tok-p", make_user("p1", Role::Patient))]);
    let store = restored_store(api, &storage);

    let result = block_on(store.login(" p1@example.com ", "pw", Role::Patient));

    assert_eq!(result, AuthResult::Success);
    assert_eq!(result.message(), None);
    assert_eq!(store.state().role(), Some(Role::Patient));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-p"));
    assert!(storage.get(USER_KEY).is_some());
}

#[test]
fn login_trims_email_and_forwards_role() {
    let api = Arc::new(FakeApi::with_auth(vec![auth_ok("t", make_user("d1", Role::Doctor))]));
    let store = SessionStore::new(api.clone(), Arc::new(MemoryStorage::new()));
    block_on(store.login("  doc@example.com\n", "pw", Role::Doctor));

    let sent = api.last_login.lock().unwrap().clone().unwrap();
    assert_eq!(sent.email, "doc@example.com");
    assert_eq!(sent.role, Role::Doctor);
}

#[test]
fn login_round_trips_through_a_fresh_store() {
    let storage = MemoryStorage::new();
    let doctor = make_user("d1", Role::Doctor);
    let first = restored_store(FakeApi::with_auth(vec![auth_ok("tok-d", doctor.clone())]), &storage);
    assert!(block_on(first.login("d1@example.com", "pw", Role::Doctor)).is_success());

    let reloaded = restored_store(FakeApi::default(), &storage);
    assert_eq!(reloaded.session(), first.session());
    assert_eq!(reloaded.state().role(), Some(Role::Doctor));
}

#[test]
fn login_invalid_credentials_returns_server_message() {
    let storage = MemoryStorage::new();
    let store = restored_store(FakeApi::with_auth(vec![Err(invalid_credentials())]), &storage);

    let result = block_on(store.login("a@b.com", "wrong", Role::Patient));

    assert_eq!(result, AuthResult::failure("Invalid credentials"));
    assert_eq!(store.session(), None);
    assert_nothing_persisted(&storage);
}

#[test]
fn failed_login_keeps_existing_session() {
    let storage = MemoryStorage::new();
    let user = make_user("p1", Role::Patient);
    persist(&storage, "tok-existing", &user);
    let store = restored_store(FakeApi::with_auth(vec![Err(invalid_credentials())]), &storage);
    let before = store.session();

    let result = block_on(store.login("a@b.com", "wrong", Role::Patient));

    assert!(!result.is_success());
    assert_eq!(store.session(), before);
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-existing"));
}

#[test]
fn login_network_failure_returns_generic_message() {
    let store = restored_store(
        FakeApi::with_auth(vec![Err(ApiError::Network("connection refused".to_owned()))]),
        &MemoryStorage::new(),
    );
    let result = block_on(store.login("a@b.com", "pw", Role::Patient));
    assert_eq!(result.message(), Some(crate::net::api::NETWORK_ERROR_MESSAGE));
}

#[test]
fn login_server_error_without_message_uses_fallback() {
    let store = restored_store(
        FakeApi::with_auth(vec![Err(ApiError::Status { status: 500, message: None })]),
        &MemoryStorage::new(),
    );
    let result = block_on(store.login("a@b.com", "pw", Role::Patient));
    assert_eq!(result.message(), Some(LOGIN_FAILED_MESSAGE));
}

#[test]
fn login_response_with_unknown_role_is_rejected() {
    let storage = MemoryStorage::new();
    let store = restored_store(FakeApi::with_auth(vec![auth_ok("tok", make_user("x", Role::Unknown))]), &storage);
    let result = block_on(store.login("a@b.com", "pw", Role::Patient));
    assert_eq!(result.message(), Some(LOGIN_FAILED_MESSAGE));
    assert_eq!(store.session(), None);
    assert_nothing_persisted(&storage);
}

#[test]
fn second_login_while_pending_is_rejected_without_calling_api() {
    let api = Arc::new(FakeApi::with_auth(vec![auth_ok("tok", make_user("p1", Role::Patient))]));
    let store = SessionStore::new(api.clone(), Arc::new(MemoryStorage::new()));

    let held = store.begin_request();
    assert!(held.is_some());
    assert!(store.is_busy());
    let result = block_on(store.login("a@b.com", "pw", Role::Patient));
    assert_eq!(result.message(), Some(REQUEST_IN_PROGRESS_MESSAGE));
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);

    drop(held);
    assert!(!store.is_busy());
    assert!(block_on(store.login("a@b.com", "pw", Role::Patient)).is_success());
}

// =============================================================
// signup
// =============================================================

#[test]
fn signup_success_establishes_session() {
    let storage = MemoryStorage::new();
    let store = restored_store(FakeApi::with_auth(vec![auth_ok("tok-new", make_user("n1", Role::Doctor))]), &storage);

    let result = block_on(store.signup(signup_profile(Role::Doctor)));

    assert!(result.is_success());
    assert_eq!(store.token().as_deref(), Some("tok-new"));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok-new"));
}

#[test]
fn signup_conflict_surfaces_message() {
    let err = ApiError::Status { status: 409, message: Some("Email already registered".to_owned()) };
    let store = restored_store(FakeApi::with_auth(vec![Err(err)]), &MemoryStorage::new());
    let result = block_on(store.signup(signup_profile(Role::Patient)));
    assert_eq!(result, AuthResult::failure("Email already registered"));
}

#[test]
fn signup_without_message_uses_signup_fallback() {
    let store = restored_store(FakeApi::with_auth(vec![Err(ApiError::Decode("eof".to_owned()))]), &MemoryStorage::new());
    let result = block_on(store.signup(signup_profile(Role::Patient)));
    assert_eq!(result.message(), Some(SIGNUP_FAILED_MESSAGE));
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    persist(&storage, "tok", &make_user("p1", Role::Patient));
    let store = restored_store(FakeApi::default(), &storage);

    store.logout();

    assert_eq!(store.session(), None);
    assert_nothing_persisted(&storage);
}

#[test]
fn logout_is_idempotent() {
    let store = restored_store(FakeApi::default(), &MemoryStorage::new());
    store.logout();
    store.logout();
    assert_eq!(store.state(), AuthState::ready(None));
}

#[test]
fn logout_then_restore_in_fresh_store_is_logged_out() {
    let storage = MemoryStorage::new();
    persist(&storage, "tok", &make_user("d1", Role::Doctor));
    restored_store(FakeApi::default(), &storage).logout();

    let reloaded = restored_store(FakeApi::default(), &storage);
    assert_eq!(reloaded.session(), None);
}

#[test]
fn observer_sees_login_and_logout() {
    let states = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&states);
    let store = store_with(
        FakeApi::with_auth(vec![auth_ok("tok", make_user("p1", Role::Patient))]),
        &MemoryStorage::new(),
    )
    .with_observer(move |s| seen.lock().unwrap().push(s.user.is_some()));

    store.restore();
    block_on(store.login("a@b.com", "pw", Role::Patient));
    store.logout();

    assert_eq!(*states.lock().unwrap(), vec![false, true, false]);
}

// =============================================================
// revalidate
// =============================================================

#[test]
fn revalidate_rejected_token_logs_out() {
    let storage = MemoryStorage::new();
    persist(&storage, "stale", &make_user("p1", Role::Patient));
    let api = FakeApi::with_me(vec![Err(ApiError::Status { status: 401, message: None })]);
    let store = restored_store(api, &storage);

    block_on(store.revalidate());

    assert_eq!(store.session(), None);
    assert_nothing_persisted(&storage);
}

#[test]
fn revalidate_network_failure_keeps_session() {
    let storage = MemoryStorage::new();
    persist(&storage, "tok", &make_user("p1", Role::Patient));
    let store = restored_store(FakeApi::with_me(vec![Err(ApiError::Network("offline".to_owned()))]), &storage);

    block_on(store.revalidate());

    assert_eq!(store.token().as_deref(), Some("tok"));
}

#[test]
fn revalidate_refreshes_user_record() {
    let storage = MemoryStorage::new();
    persist(&storage, "tok", &make_user("p1", Role::Patient));
    let mut fresh = make_user("p1", Role::Patient);
    fresh.full_name = "Renamed User".to_owned();
    let store = restored_store(FakeApi::with_me(vec![Ok(fresh.clone())]), &storage);

    block_on(store.revalidate());

    assert_eq!(store.state().user, Some(fresh.clone()));
    let persisted: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(persisted, fresh);
}

#[test]
fn revalidate_without_session_does_not_call_api() {
    let api = Arc::new(FakeApi::default());
    let store = SessionStore::new(api.clone(), Arc::new(MemoryStorage::new()));
    store.restore();
    block_on(store.revalidate());
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn revalidate_unchanged_user_publishes_nothing() {
    let storage = MemoryStorage::new();
    let user = make_user("p1", Role::Patient);
    persist(&storage, "tok", &user);
    let notifications = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&notifications);
    let store = store_with(FakeApi::with_me(vec![Ok(user.clone())]), &storage).with_observer(move |_| {
        count.fetch_add(1, Ordering::SeqCst);
    });
    store.restore();
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    block_on(store.revalidate());

    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(store.state().user, Some(user));
}

#[test]
fn revalidate_unknown_role_logs_out() {
    let storage = MemoryStorage::new();
    persist(&storage, "tok", &make_user("p1", Role::Patient));
    let store = restored_store(FakeApi::with_me(vec![Ok(make_user("p1", Role::Unknown))]), &storage);

    block_on(store.revalidate());

    assert_eq!(store.session(), None);
    assert_nothing_persisted(&storage);
}
