//! Key-value persistence for per-user client state.
//!
//! The store plays the role of browser local storage: string keys, string
//! values, no transactions. Typed state goes through [`load_json`] and
//! [`save_json`]; services persist through a [`CommitHook`] invoked after each
//! successful mutation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::UserId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Serialization error for key {key}: {message}")]
    Serialize { key: String, message: String },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage shared by every session of the process.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Well-known storage keys.
pub mod keys {
    use super::UserId;

    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const THEME: &str = "haversack-theme";

    pub fn cart(user_id: UserId) -> String {
        format!("cart_{user_id}")
    }

    pub fn favorites(user_id: UserId) -> String {
        format!("favorites_{user_id}")
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Read and parse a JSON value. Missing keys, unreadable storage and corrupt
/// JSON all count as "no saved state"; the latter two are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read saved state");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt saved state");
            None
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, raw)
}

/// Called synchronously after every successful state transition.
pub trait CommitHook<S>: Send {
    fn committed(&self, state: &S);
    fn discarded(&self) {}
}

/// Commit hook writing the state as JSON under a fixed key. Failures are
/// logged and swallowed: persistence is fire-and-forget.
pub struct PersistOnCommit {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistOnCommit {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Saved state for this key, if any and if it parses.
    pub fn load<S: DeserializeOwned>(&self) -> Option<S> {
        load_json(self.store.as_ref(), &self.key)
    }
}

impl<S: Serialize> CommitHook<S> for PersistOnCommit {
    fn committed(&self, state: &S) {
        match save_json(self.store.as_ref(), &self.key, state) {
            Ok(()) => debug!(key = %self.key, "State persisted"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist state"),
        }
    }

    fn discarded(&self) {
        match self.store.remove(&self.key) {
            Ok(()) => debug!(key = %self.key, "Persisted state removed"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to remove persisted state"),
        }
    }
}

/// Commit hook for anonymous sessions: nothing is persisted.
pub struct NoPersistence;

impl<S> CommitHook<S> for NoPersistence {
    fn committed(&self, _state: &S) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_by_user() {
        assert_eq!(keys::cart(UserId::new(7)), "cart_7");
        assert_eq!(keys::favorites(UserId::new(7)), "favorites_7");
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(other.get("k").unwrap(), Some("v".to_string()));
        other.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn corrupt_json_loads_as_nothing() {
        let store = MemoryStore::new();
        store.set("favorites_1", "{not json".to_string()).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, "favorites_1");
        assert_eq!(loaded, None);
    }

    #[test]
    fn persist_on_commit_writes_and_discards() {
        let store = Arc::new(MemoryStore::new());
        let hook = PersistOnCommit::new(store.clone(), "favorites_2");

        CommitHook::<Vec<u32>>::committed(&hook, &vec![1, 2]);
        assert_eq!(store.get("favorites_2").unwrap(), Some("[1,2]".to_string()));
        assert_eq!(hook.load::<Vec<u32>>(), Some(vec![1, 2]));

        CommitHook::<Vec<u32>>::discarded(&hook);
        assert_eq!(store.get("favorites_2").unwrap(), None);
    }
}
