use std::path::{Path, PathBuf};
use std::sync::Arc;

use medsession::config::{ConfigV1, FileStoreConfig, StoreBackend, StoreConfig};
use medsession::models::{Role, User};
use medsession::startup::bootstrap;
use medsession::state::AppState;

/// A unique throwaway path for a file-backed session store.
pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!("medsession-it-{}.json", uuid::Uuid::new_v4()))
}

/// Config using the file backend at `path`, defaults everywhere else.
pub fn file_config(path: &Path) -> ConfigV1 {
    ConfigV1 {
        store: StoreConfig {
            backend: StoreBackend::File(FileStoreConfig {
                path: path.display().to_string(),
            }),
        },
        ..ConfigV1::default()
    }
}

/// Boot the full subsystem against a file store at `path`.
pub async fn boot_with_file_store(path: &Path) -> AppState {
    bootstrap(Arc::new(file_config(path))).await
}

pub fn doctor_user() -> User {
    User::new("1", "a@b.com", "A B", Role::parse("DOCTOR"))
}

pub fn patient_user() -> User {
    User::new("2", "p@q.com", "P Q", Role::parse("patient"))
}
