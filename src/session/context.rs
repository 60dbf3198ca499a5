use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::models::{Role, User};
use crate::store::SessionStore;
use crate::utils::log_throttle::LogThrottle;

const STORE_WARN_WINDOW: Duration = Duration::from_secs(30);

/// An immutable view of the session, consumed by the route guard and the
/// role router. Snapshots are cheap and detached: a later login/logout does
/// not mutate one already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub authenticated: bool,
    pub role: Option<Role>,
}

struct SessionState {
    loading: bool,
    hydrated: bool,
    token: Option<String>,
    user: Option<User>,
}

/// The single source of truth for "who is logged in" during the process
/// lifetime. Owned by the application root and shared by handle; mutation
/// happens only through `hydrate`, `login`, and `logout`, and every other
/// consumer is a reader.
///
/// Store failures are swallowed here: a broken persistence layer degrades
/// to a logged-out (or memory-only) session, never to a user-visible fault.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
    state: RwLock<SessionState>,
    store_warnings: LogThrottle,
}

impl SessionContext {
    /// Create a context in the loading state. No guard decision should be
    /// made until `hydrate` has completed.
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        SessionContext {
            store,
            config,
            state: RwLock::new(SessionState {
                loading: true,
                hydrated: false,
                token: None,
                user: None,
            }),
            store_warnings: LogThrottle::new(),
        }
    }

    /// Seed the in-memory session from the store, once. The read runs under
    /// a timeout so an unresponsive store degrades to "unauthenticated"
    /// instead of leaving the loading gate closed forever. Repeat calls are
    /// no-ops.
    pub async fn hydrate(&self) {
        {
            let mut state = self.state.write();
            if state.hydrated {
                debug!("Session already hydrated; ignoring repeat call.");
                return;
            }
            state.hydrated = true;
        }

        let limit = Duration::from_millis(self.config.hydrate_timeout_in_ms);
        let adopted = match timeout(limit, self.read_stored_session()).await {
            Ok(stored) => stored,
            Err(_) => {
                warn!(
                    "Session store did not respond within {}ms; starting unauthenticated.",
                    self.config.hydrate_timeout_in_ms
                );
                None
            }
        };

        let mut state = self.state.write();
        if let Some((token, user)) = adopted {
            info!("Hydrated session for '{}' (role '{}').", user.email, user.role);
            state.token = Some(token);
            state.user = Some(user);
        } else {
            debug!("No stored session; starting logged out.");
        }
        state.loading = false;
    }

    /// Read token and user from the store; both must be present for a
    /// session to be adopted. Malformed or unreadable data counts as absent.
    async fn read_stored_session(&self) -> Option<(String, User)> {
        let token = match self.store.get_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                self.warn_store("read", e);
                return None;
            }
        };

        let user = match self.store.get_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(e) => {
                self.warn_store("read", e);
                return None;
            }
        };

        if self.config.enforce_token_expiry {
            if let Ok(Some(expires_at)) = self.store.get_expiry().await {
                if expires_at <= Utc::now().timestamp() {
                    info!("Stored token expired; clearing persisted session.");
                    if let Err(e) = self.store.clear_all().await {
                        self.warn_store("clear", e);
                    }
                    return None;
                }
            }
        }

        Some((token, user))
    }

    /// Establish a session. This is the only path that does so; the role
    /// was normalized when the user record was parsed, and the store is
    /// written through before the new session becomes visible in memory.
    pub async fn login(&self, user: User, token: impl Into<String>) {
        self.login_inner(user, token.into(), None).await;
    }

    /// Like `login`, also persisting the token's expiry timestamp for
    /// integrations that enforce it on the next hydration.
    pub async fn login_with_expiry(&self, user: User, token: impl Into<String>, expires_at: i64) {
        self.login_inner(user, token.into(), Some(expires_at)).await;
    }

    async fn login_inner(&self, user: User, token: String, expires_at: Option<i64>) {
        if let Err(e) = self.store.set_token(&token).await {
            self.warn_store("write", e);
        }
        if let Err(e) = self.store.set_user(&user).await {
            self.warn_store("write", e);
        }
        if let Err(e) = self.store.set_role(user.role.as_str()).await {
            self.warn_store("write", e);
        }
        if let Some(expiry) = expires_at {
            if let Err(e) = self.store.set_expiry(expiry).await {
                self.warn_store("write", e);
            }
        }

        info!("Logged in '{}' with role '{}'.", user.email, user.role);
        let mut state = self.state.write();
        state.token = Some(token);
        state.user = Some(user);
    }

    /// Destroy the session: store first, then memory. Idempotent; logging
    /// out with no session is a no-op, not an error.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear_all().await {
            self.warn_store("clear", e);
        }

        let mut state = self.state.write();
        if state.token.is_none() && state.user.is_none() {
            debug!("Logout with no active session.");
        } else {
            info!("Logged out.");
        }
        state.token = None;
        state.user = None;
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// A session exists iff both token and user are present.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read();
        state.token.is_some() && state.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().user.as_ref().map(|u| u.role.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.role().map(|r| r == Role::Admin).unwrap_or(false)
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    /// Capture the fields guard and router decisions depend on.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            loading: state.loading,
            authenticated: state.token.is_some() && state.user.is_some(),
            role: state.user.as_ref().map(|u| u.role.clone()),
        }
    }

    fn warn_store(&self, op: &str, err: String) {
        if let Some(suppressed) = self.store_warnings.should_emit(op, STORE_WARN_WINDOW) {
            warn!(
                "Session store {} failed: {} ({} similar warnings suppressed)",
                op, err, suppressed
            );
        }
    }
}
