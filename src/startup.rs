//! Application startup wiring.
//!
//! Builds the store, seeds the session context from it, and assembles the
//! guard and API client in the boot order the rest of the crate assumes:
//! store read, context hydration, then guard decisions per navigation.

use std::sync::Arc;

use tracing::info;

use crate::client::AuthApi;
use crate::config::ConfigV1;
use crate::routing::RouteGuard;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::store::create_store;

/// Initialize the session subsystem from config.
///
/// Hydration completes (or times out) before this returns, so the
/// returned state never has the loading gate closed and guard decisions
/// are valid immediately.
pub async fn bootstrap(config: Arc<ConfigV1>) -> AppState {
    let store = create_store(&config.store);
    let session = Arc::new(SessionContext::new(store, config.session.clone()));
    session.hydrate().await;

    info!(
        "Session subsystem ready (authenticated: {}).",
        session.is_authenticated()
    );

    AppState {
        config: config.clone(),
        session,
        guard: Arc::new(RouteGuard::new(config.guard.clone())),
        api: Arc::new(AuthApi::new(&config.api)),
    }
}
