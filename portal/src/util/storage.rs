//! Durable client storage for the persisted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists the bearer token under [`TOKEN_KEY`] and the
//! JSON user record under [`USER_KEY`]. In the browser these live in
//! `localStorage`; SSR and tests use [`MemoryStorage`]. Both sit behind
//! [`SessionStorage`] so the store never touches `web-sys` directly.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Serialized user record (session minus token).
pub const USER_KEY: &str = "user";

/// Synchronous string key/value storage.
///
/// Writes are best-effort: a full or disabled browser store must not take the
/// UI down, so failures are logged by the implementation and swallowed.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Load a JSON value for `key`. `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns the decode error when the stored text is not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn SessionStorage, key: &str) -> Result<Option<T>, serde_json::Error> {
    storage
        .get(key)
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &dyn SessionStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => leptos::logging::warn!("storage: failed to encode {key}: {e}"),
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage. Clones share the same entries, so a second store built
/// over a clone sees what the first one persisted (a "reload").
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage`. Looked up on every call; a missing or blocked store
/// behaves as empty.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn local() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::local() else {
            leptos::logging::warn!("storage: localStorage unavailable, {key} not saved");
            return;
        };
        if storage.set_item(key, value).is_err() {
            leptos::logging::warn!("storage: failed to write {key}");
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = Self::local() else {
            leptos::logging::warn!("storage: localStorage unavailable, {key} not removed");
            return;
        };
        if storage.remove_item(key).is_err() {
            leptos::logging::warn!("storage: failed to remove {key}");
        }
    }
}

/// Storage for the current build target.
#[must_use]
pub fn default_storage() -> Arc<dyn SessionStorage> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemoryStorage::new())
    }
}
