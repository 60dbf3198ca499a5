use figment::providers::{Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;
use crate::client::ApiConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0. Every section has a default, so a config file
/// only needs to spell out what it changes.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from a YAML file at the given path.
pub fn load_config(path: &str) -> Result<ConfigV1, String> {
    let figment = Figment::new().merge(Yaml::file(path));
    match figment.extract::<Config>() {
        Ok(Config::ConfigV1(c)) => Ok(c),
        Err(e) => Err(format!("Error loading configuration: {}", e)),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Tunables for the session context lifecycle.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    /// How long hydration may wait on the store before degrading to a
    /// logged-out session.
    #[serde(default = "default_hydrate_timeout_in_ms")]
    pub hydrate_timeout_in_ms: u64,
    /// When true, a stored token whose expiry timestamp has passed is
    /// discarded at hydration. Off by default: the expiry field is
    /// persisted either way and only read when this is set.
    #[serde(default)]
    pub enforce_token_expiry: bool,
}

fn default_hydrate_timeout_in_ms() -> u64 {
    2000
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            hydrate_timeout_in_ms: default_hydrate_timeout_in_ms(),
            enforce_token_expiry: false,
        }
    }
}

/// Route guard policy.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct GuardConfig {
    /// Where an authenticated user with the wrong role is sent.
    #[serde(default)]
    pub on_role_mismatch: MismatchRedirect,
}

/// Redirect target for authenticated-but-wrong-role navigation.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MismatchRedirect {
    #[default]
    Login,
    Home,
}
