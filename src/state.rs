//! Shared application state.
//!
//! Contains the handles the embedding application passes to its views:
//! configuration, the session context, the route guard, and the auth API
//! client.

use std::sync::Arc;

use crate::client::AuthApi;
use crate::config::ConfigV1;
use crate::routing::RouteGuard;
use crate::session::SessionContext;

/// Application state assembled once at startup and shared by handle.
///
/// Everything inside is cheaply cloneable. The session context is the only
/// mutable piece, and only through its hydrate/login/logout operations;
/// views are read-only consumers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The long-lived session context, owned here and read everywhere.
    pub session: Arc<SessionContext>,
    /// Route guard configured with the role-mismatch policy.
    pub guard: Arc<RouteGuard>,
    /// Typed client for the auth endpoints.
    pub api: Arc<AuthApi>,
}
