//! Persisted Session Storage
//!
//! Durable key-value storage for the session record. The authentication
//! manager is handed a [`SessionStore`] at construction time instead of
//! reaching for a process-wide global, so tests can substitute an
//! in-memory fake and applications can choose where the session lives.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`] - process-local map, used by tests
//! - [`FileStore`] - JSON file under the platform config directory
//!
//! Storage failures never propagate: a store that cannot persist logs a
//! warning and keeps serving from memory, matching the tolerance of the
//! admin panel this client talks for.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Keys under which the session record is persisted.
pub mod keys {
    /// Bearer token for the current session
    pub const AUTH_TOKEN: &str = "authToken";
    /// `"true"` while a session is active
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    /// Role string (`admin`, `supervisor` or `user`)
    pub const USER_ROLE: &str = "userRole";
    /// Display name of the signed-in user
    pub const USER_NAME: &str = "userName";
    /// Backend identifier of the signed-in user
    pub const USER_ID: &str = "userId";

    /// Every key that makes up a session record
    pub const ALL: [&str; 5] = [AUTH_TOKEN, IS_LOGGED_IN, USER_ROLE, USER_NAME, USER_ID];
}

/// Durable string key-value storage for session state.
///
/// Operations are synchronous and infallible from the caller's point of
/// view; implementations handle their own persistence errors.
pub trait SessionStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value
    fn set(&self, key: &str, value: &str);
    /// Delete a value
    fn remove(&self, key: &str);
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

/// File-backed session store.
///
/// The full map is held in memory and rewritten to disk as JSON on every
/// mutation. Load and persist errors are logged and swallowed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store backed by the given file, loading any existing content.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "session file unreadable, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            map: RwLock::new(map),
        }
    }

    /// Open the store at its default location under the platform config
    /// directory.
    pub fn in_config_dir() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("hgm-client").join("session.json"))
    }

    fn persist(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %self.path.display(), error = %e, "could not create session dir");
                return;
            }
        }
        let body = match serde_json::to_string_pretty(map) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize session");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, body) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not persist session");
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.insert(key.to_string(), value.to_string());
        self.persist(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.remove(key);
        self.persist(&map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get(keys::AUTH_TOKEN).is_none());

        store.set(keys::AUTH_TOKEN, "token-1");
        assert_eq!(store.get(keys::AUTH_TOKEN).as_deref(), Some("token-1"));

        store.remove(keys::AUTH_TOKEN);
        assert!(store.get(keys::AUTH_TOKEN).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.remove("missing");
        store.remove("missing");
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let store = FileStore::new(&path);
        store.set(keys::USER_NAME, "Demo User");
        store.set(keys::IS_LOGGED_IN, "true");
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(keys::USER_NAME).as_deref(), Some("Demo User"));
        assert_eq!(reopened.get(keys::IS_LOGGED_IN).as_deref(), Some("true"));
    }

    #[test]
    fn test_file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").expect("seed file");

        let store = FileStore::new(&path);
        assert!(store.get(keys::AUTH_TOKEN).is_none());

        store.set(keys::AUTH_TOKEN, "fresh");
        assert_eq!(store.get(keys::AUTH_TOKEN).as_deref(), Some("fresh"));
    }
}
