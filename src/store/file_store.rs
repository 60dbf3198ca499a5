use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;

use super::base::{keys, SessionStore};
use crate::models::User;

/// A SessionStore backed by a single JSON file holding a string key-value
/// map. Every mutation rewrites the file through a temp-file rename, so a
/// crash mid-write never leaves a torn record behind.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store at `path`. A missing file starts empty;
    /// a corrupt file is treated the same, with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<FileStore, String> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Cannot create session directory: {}", e))?;
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Session file '{}' is corrupt ({}); starting empty.",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(format!("Cannot read session file: {}", e)),
        };

        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Cannot serialize session data: {}", e))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized).map_err(|e| format!("Cannot write session file: {}", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| format!("Cannot replace session file: {}", e))
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), String> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get_token(&self) -> Result<Option<String>, String> {
        Ok(self.get(keys::TOKEN))
    }

    async fn set_token(&self, token: &str) -> Result<(), String> {
        self.set(keys::TOKEN, token.to_string())
    }

    async fn get_user(&self) -> Result<Option<User>, String> {
        let raw = match self.get(keys::USER) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Stored user record does not parse ({}); treating as absent.", e);
                Ok(None)
            }
        }
    }

    async fn set_user(&self, user: &User) -> Result<(), String> {
        let serialized = serde_json::to_string(user)
            .map_err(|e| format!("Cannot serialize user record: {}", e))?;
        self.set(keys::USER, serialized)
    }

    async fn get_role(&self) -> Result<Option<String>, String> {
        Ok(self.get(keys::ROLE))
    }

    async fn set_role(&self, role: &str) -> Result<(), String> {
        self.set(keys::ROLE, role.to_string())
    }

    async fn get_expiry(&self) -> Result<Option<i64>, String> {
        Ok(self.get(keys::EXPIRES_AT).and_then(|raw| raw.parse().ok()))
    }

    async fn set_expiry(&self, epoch_secs: i64) -> Result<(), String> {
        self.set(keys::EXPIRES_AT, epoch_secs.to_string())
    }

    async fn clear_all(&self) -> Result<(), String> {
        // One lock, one rewrite: all four keys go together.
        let mut entries = self.entries.lock();
        entries.remove(keys::TOKEN);
        entries.remove(keys::USER);
        entries.remove(keys::ROLE);
        entries.remove(keys::EXPIRES_AT);
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("medsession-test-{}.json", uuid::Uuid::new_v4()))
    }

    fn sample_user() -> User {
        User::new("1", "a@b.com", "A B", Role::Doctor)
    }

    /// Test that values written to the store survive a reopen.
    #[tokio::test]
    async fn test_round_trip_across_instances() {
        let path = temp_store_path();

        let store = FileStore::open(&path).unwrap();
        store.set_token("tok123").await.unwrap();
        store.set_user(&sample_user()).await.unwrap();
        store.set_role("doctor").await.unwrap();
        store.set_expiry(1_900_000_000).await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_token().await.unwrap().as_deref(), Some("tok123"));
        assert_eq!(reopened.get_role().await.unwrap().as_deref(), Some("doctor"));
        assert_eq!(reopened.get_expiry().await.unwrap(), Some(1_900_000_000));
        let user = reopened.get_user().await.unwrap().unwrap();
        assert_eq!(user.email, "a@b.com");

        fs::remove_file(&path).ok();
    }

    /// Test that a corrupt session file loads as an empty store.
    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let path = temp_store_path();
        fs::write(&path, "{ not json at all").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get_token().await.unwrap().is_none());
        assert!(store.get_user().await.unwrap().is_none());

        fs::remove_file(&path).ok();
    }

    /// Test that a stored user record that does not parse reads as absent.
    #[tokio::test]
    async fn test_corrupt_user_record_is_absence() {
        let path = temp_store_path();

        let store = FileStore::open(&path).unwrap();
        store.set(keys::USER, "garbage".to_string()).unwrap();
        assert!(store.get_user().await.unwrap().is_none());

        fs::remove_file(&path).ok();
    }

    /// Test that clear_all removes every session key at once.
    #[tokio::test]
    async fn test_clear_all_removes_every_key() {
        let path = temp_store_path();

        let store = FileStore::open(&path).unwrap();
        store.set_token("tok").await.unwrap();
        store.set_user(&sample_user()).await.unwrap();
        store.set_role("doctor").await.unwrap();
        store.set_expiry(42).await.unwrap();

        store.clear_all().await.unwrap();
        assert!(store.get_token().await.unwrap().is_none());
        assert!(store.get_user().await.unwrap().is_none());
        assert!(store.get_role().await.unwrap().is_none());
        assert!(store.get_expiry().await.unwrap().is_none());

        fs::remove_file(&path).ok();
    }

    /// Test that a non-numeric expiry value reads as absent.
    #[tokio::test]
    async fn test_unparsable_expiry_is_absence() {
        let path = temp_store_path();

        let store = FileStore::open(&path).unwrap();
        store.set(keys::EXPIRES_AT, "soon".to_string()).unwrap();
        assert!(store.get_expiry().await.unwrap().is_none());

        fs::remove_file(&path).ok();
    }
}
