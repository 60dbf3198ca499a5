use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A wrapper for the session store configuration. The backend defaults to
/// in-memory, which keeps the crate usable without any filesystem access;
/// durable deployments select the file backend explicitly.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StoreConfig {
    #[serde(flatten)]
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::Memory,
        }
    }
}

/// The available store backends, differentiated via a "type" tag in YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "file")]
    File(FileStoreConfig),
    #[serde(rename = "memory")]
    Memory,
}

/// Config for the file-backed store: where the session JSON lives.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    pub path: String,
}
