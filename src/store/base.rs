use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::models::User;

/// Logical keys for the four persisted session fields.
pub mod keys {
    pub const TOKEN: &str = "access_token";
    pub const USER: &str = "user_data";
    pub const ROLE: &str = "user_role";
    pub const EXPIRES_AT: &str = "token_expires_at";
}

/// The SessionStore trait abstracts durable key-value persistence of the
/// session fields (token, user record, role, expiry timestamp).
///
/// Implementations must treat malformed stored data as absence: `get_user`
/// returns `Ok(None)` rather than an error when the record does not parse.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_token(&self) -> Result<Option<String>, String>;
    async fn set_token(&self, token: &str) -> Result<(), String>;
    async fn get_user(&self) -> Result<Option<User>, String>;
    async fn set_user(&self, user: &User) -> Result<(), String>;
    async fn get_role(&self) -> Result<Option<String>, String>;
    async fn set_role(&self, role: &str) -> Result<(), String>;
    async fn get_expiry(&self) -> Result<Option<i64>, String>;
    async fn set_expiry(&self, epoch_secs: i64) -> Result<(), String>;
    /// Remove every session key before returning. A reader never observes
    /// a partially cleared session.
    async fn clear_all(&self) -> Result<(), String>;
}

/// Creates a concrete store implementation based on the StoreConfig.
///
/// A file backend that cannot initialize degrades to the in-memory store
/// with a warning: persistence failures must leave the client usable in a
/// logged-out state, never crash it.
pub fn create_store(config: &StoreConfig) -> Arc<dyn SessionStore> {
    match &config.backend {
        StoreBackend::File(file_config) => match FileStore::open(&file_config.path) {
            Ok(store) => {
                info!("Session store using file backend at '{}'.", file_config.path);
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    "Failed to open session file '{}': {}. Falling back to in-memory store.",
                    file_config.path, e
                );
                Arc::new(MemoryStore::new())
            }
        },
        StoreBackend::Memory => {
            info!("Session store using in-memory backend.");
            Arc::new(MemoryStore::new())
        }
    }
}
