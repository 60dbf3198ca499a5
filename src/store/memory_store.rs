use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::warn;

use super::base::{keys, SessionStore};
use crate::models::User;

/// An ephemeral SessionStore holding the key-value map in memory only.
/// Used when no durable backend is configured, and as the degraded mode
/// when the file backend cannot be opened.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get_token(&self) -> Result<Option<String>, String> {
        Ok(self.get(keys::TOKEN))
    }

    async fn set_token(&self, token: &str) -> Result<(), String> {
        self.set(keys::TOKEN, token.to_string());
        Ok(())
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
        self.set(keys::USER, serialized);
        Ok(())
    }

    async fn get_role(&self) -> Result<Option<String>, String> {
        Ok(self.get(keys::ROLE))
    }

    async fn set_role(&self, role: &str) -> Result<(), String> {
        self.set(keys::ROLE, role.to_string());
        Ok(())
    }

    async fn get_expiry(&self) -> Result<Option<i64>, String> {
        Ok(self.get(keys::EXPIRES_AT).and_then(|raw| raw.parse().ok()))
    }

    async fn set_expiry(&self, epoch_secs: i64) -> Result<(), String> {
        self.set(keys::EXPIRES_AT, epoch_secs.to_string());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), String> {
        let mut entries = self.entries.lock();
        entries.remove(keys::TOKEN);
        entries.remove(keys::USER);
        entries.remove(keys::ROLE);
        entries.remove(keys::EXPIRES_AT);
        Ok(())
    }
}
