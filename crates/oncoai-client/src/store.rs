//! Session persistence.
//!
//! `TokenStore` is the capability the controllers depend on. The stock
//! implementation, `StorageTokenStore`, maps it onto a string key/value
//! `StorageBackend` (the browser's local storage shape). Storage is
//! best-effort: failures are logged and never reach the caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use oncoai_common::{Session, UserInfo};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "oncoai_token";
pub const USER_KEY: &str = "oncoai_user";

/// Persistent bearer token and user profile.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<SecretString>;
    fn set_token(&self, token: &SecretString);
    fn remove_token(&self);

    /// Raw stored profile blob, unparsed.
    fn user_json(&self) -> Option<String>;
    fn set_user(&self, user: &UserInfo);
    fn remove_user(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Stored profile. Corrupt JSON is logged and treated as absent.
    fn stored_user(&self) -> Option<UserInfo> {
        let raw = self.user_json()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Error parsing stored user info");
                None
            }
        }
    }

    fn session(&self) -> Option<Session> {
        let token = self.token()?;
        Some(Session { token, user: self.stored_user() })
    }
}

/// Remove token and profile.
pub fn end_session(store: &dyn TokenStore) {
    store.remove_token();
    store.remove_user();
    info!("Session ended");
}

// ── Backends ──────────────────────────────────────────────────────────────────

/// String key/value storage.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local storage. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// JSON object on disk, one entry per key. Each write replaces the file
/// through a temporary sibling.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// `<config dir>/oncoai/storage.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("oncoai")
            .join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> HashMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read session storage");
                return HashMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = ?self.path, error = %e, "Session storage is corrupt, ignoring it");
            HashMap::new()
        })
    }

    fn write_all(&self, items: &HashMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)
    }

    fn update<F: FnOnce(&mut HashMap<String, String>)>(&self, f: F) {
        let Ok(_guard) = self.lock.lock() else { return };
        let mut items = self.read_all();
        f(&mut items);
        if let Err(e) = self.write_all(&items) {
            warn!(path = ?self.path, error = %e, "Failed to write session storage");
        }
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().ok()?;
        self.read_all().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_item(&self, key: &str) {
        self.update(|items| {
            items.remove(key);
        });
    }
}

// ── Token store over a backend ────────────────────────────────────────────────

pub struct StorageTokenStore<B> {
    backend: B,
}

impl<B: StorageBackend> StorageTokenStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl StorageTokenStore<MemoryStorage> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<B: StorageBackend> TokenStore for StorageTokenStore<B> {
    /// An empty stored token is no session.
    fn token(&self) -> Option<SecretString> {
        self.backend
            .get_item(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    fn set_token(&self, token: &SecretString) {
        debug!("Storing access token");
        self.backend.set_item(TOKEN_KEY, token.expose_secret());
    }

    fn remove_token(&self) {
        self.backend.remove_item(TOKEN_KEY);
    }

    fn user_json(&self) -> Option<String> {
        self.backend.get_item(USER_KEY)
    }

    fn set_user(&self, user: &UserInfo) {
        match serde_json::to_string(user) {
            Ok(json) => self.backend.set_item(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialise user info"),
        }
    }

    fn remove_user(&self) {
        self.backend.remove_item(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_store_round_trip_and_end_session() {
        let store = StorageTokenStore::in_memory();
        assert!(!store.is_authenticated());

        store.set_token(&SecretString::from("abc"));
        store.set_user(&UserInfo::new("alice").with_name("Alice"));
        let session = store.session().expect("session");
        assert_eq!(session.bearer(), "abc");
        assert_eq!(session.display_name(), "Alice");

        end_session(&store);
        assert_eq!(store.backend().get_item(TOKEN_KEY), None);
        assert_eq!(store.backend().get_item(USER_KEY), None);
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let store = StorageTokenStore::in_memory();
        store.set_token(&SecretString::from(""));
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn test_corrupt_user_json_is_treated_as_absent() {
        let store = StorageTokenStore::in_memory();
        store.set_token(&SecretString::from("abc"));
        store.backend().set_item(USER_KEY, "{not json");
        assert_eq!(store.stored_user(), None);
        assert!(store.session().is_some());
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = StorageTokenStore::new(FileStorage::new(&path));
        store.set_token(&SecretString::from("persisted"));

        let reopened = StorageTokenStore::new(FileStorage::new(&path));
        assert_eq!(reopened.token().map(|t| t.expose_secret().to_string()), Some("persisted".into()));

        reopened.remove_token();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_file_storage_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item(TOKEN_KEY), None);
        storage.set_item(TOKEN_KEY, "t");
        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("t"));
    }
}
