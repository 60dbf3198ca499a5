pub mod auth_api;

// Re-export so consumers can do "use medsession::client::AuthApi;"
pub use auth_api::{ApiConfig, AuthApi, AuthResponse, RegisterRequest};
