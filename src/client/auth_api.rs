use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Role, User};

/// Where the auth backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_request_timeout_in_ms")]
    pub request_timeout_in_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_request_timeout_in_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            request_timeout_in_ms: default_request_timeout_in_ms(),
        }
    }
}

/// Successful response from the login and register endpoints.
#[derive(Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Payload for the register endpoint. The doctor-specific fields are only
/// serialized when present.
#[derive(Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Thin typed client for the auth endpoints. All other backend endpoints
/// belong to the view layer, not to the session core.
pub struct AuthApi {
    config: ApiConfig,
    http: reqwest::Client,
}

impl AuthApi {
    pub fn new(config: &ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_in_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        AuthApi {
            config: config.clone(),
            http,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_prefix,
            path
        )
    }

    /// Exchange credentials for a token and user record. The caller hands
    /// the result to `SessionContext::login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, String> {
        debug!("Login attempt for '{}'.", email.trim());
        let res = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest {
                email: email.trim(),
                password,
            })
            .send()
            .await
            .map_err(|e| format!("Login request failed: {}", e))?;
        Self::decode_auth_response(res).await
    }

    /// Create an account; responds with the same shape as login, so a
    /// successful registration can establish a session directly.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, String> {
        let res = self
            .http
            .post(self.endpoint("/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Register request failed: {}", e))?;
        Self::decode_auth_response(res).await
    }

    /// Fetch the user record for a bearer token.
    pub async fn me(&self, token: &str) -> Result<User, String> {
        let res = self
            .http
            .get(self.endpoint("/auth/me"))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| format!("Profile request failed: {}", e))?;
        if res.status().is_success() {
            res.json()
                .await
                .map_err(|e| format!("Malformed profile response: {}", e))
        } else {
            Err(Self::error_detail(res).await)
        }
    }

    async fn decode_auth_response(res: reqwest::Response) -> Result<AuthResponse, String> {
        if res.status().is_success() {
            res.json()
                .await
                .map_err(|e| format!("Malformed auth response: {}", e))
        } else {
            Err(Self::error_detail(res).await)
        }
    }

    /// The backend explains failures in a "detail" field; fall back to the
    /// status code when the body has some other shape.
    async fn error_detail(res: reqwest::Response) -> String {
        let status = res.status();
        match res.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
            Err(_) => format!("Request failed with status {}", status),
        }
    }
}
