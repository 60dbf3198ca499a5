use tracing::debug;

use super::router::routes;
use crate::config::{GuardConfig, MismatchRedirect};
use crate::models::Role;
use crate::session::SessionSnapshot;

/// The set of roles a route accepts. Requirement strings pass through
/// `Role::parse`, so "ADMIN" and "admin" describe the same requirement.
#[derive(Debug, Clone)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn one_of<I>(roles: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        RoleSet(roles.into_iter().map(|r| Role::parse(r.as_ref())).collect())
    }

    pub fn single(role: &str) -> Self {
        RoleSet(vec![Role::parse(role)])
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.iter().any(|r| r == role)
    }
}

/// Outcome of a guard evaluation. `Pending` means hydration has not
/// finished yet: render a neutral placeholder and make no redirect
/// decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Pending,
    Render,
    Redirect(&'static str),
}

/// Decides, per navigation, whether a protected route renders or
/// redirects. Pure over its inputs; the only state is the configured
/// role-mismatch policy.
pub struct RouteGuard {
    config: GuardConfig,
}

impl RouteGuard {
    pub fn new(config: GuardConfig) -> Self {
        RouteGuard { config }
    }

    pub fn evaluate(
        &self,
        session: &SessionSnapshot,
        required: Option<&RoleSet>,
    ) -> GuardOutcome {
        if session.loading {
            return GuardOutcome::Pending;
        }

        if !session.authenticated {
            return GuardOutcome::Redirect(routes::LOGIN);
        }

        let required = match required {
            Some(required) => required,
            None => return GuardOutcome::Render,
        };

        match &session.role {
            Some(role) if required.contains(role) => GuardOutcome::Render,
            role => {
                debug!("Role {:?} not permitted for this route; redirecting.", role);
                GuardOutcome::Redirect(self.mismatch_target())
            }
        }
    }

    fn mismatch_target(&self) -> &'static str {
        match self.config.on_role_mismatch {
            MismatchRedirect::Login => routes::LOGIN,
            MismatchRedirect::Home => routes::HOME,
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        RouteGuard::new(GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(loading: bool, authenticated: bool, role: Option<&str>) -> SessionSnapshot {
        SessionSnapshot {
            loading,
            authenticated,
            role: role.map(Role::parse),
        }
    }

    /// Test that no redirect is ever issued while loading.
    #[test]
    fn test_loading_gate() {
        let guard = RouteGuard::default();
        let required = RoleSet::single("admin");

        assert_eq!(
            guard.evaluate(&snapshot(true, false, None), Some(&required)),
            GuardOutcome::Pending
        );
        assert_eq!(
            guard.evaluate(&snapshot(true, true, Some("patient")), Some(&required)),
            GuardOutcome::Pending
        );
    }

    /// Test that a missing session redirects to login regardless of the
    /// requirement.
    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let guard = RouteGuard::default();

        assert_eq!(
            guard.evaluate(&snapshot(false, false, None), None),
            GuardOutcome::Redirect(routes::LOGIN)
        );
        assert_eq!(
            guard.evaluate(
                &snapshot(false, false, Some("admin")),
                Some(&RoleSet::single("admin"))
            ),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }

    /// Test that a route without a role requirement renders for any
    /// authenticated session.
    #[test]
    fn test_no_requirement_renders() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate(&snapshot(false, true, Some("patient")), None),
            GuardOutcome::Render
        );
    }

    /// Test that a matching role renders.
    #[test]
    fn test_matching_role_renders() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate(
                &snapshot(false, true, Some("doctor")),
                Some(&RoleSet::single("doctor"))
            ),
            GuardOutcome::Render
        );
    }

    /// Test that requirement strings are case-insensitive.
    #[test]
    fn test_requirement_case_insensitive() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate(
                &snapshot(false, true, Some("admin")),
                Some(&RoleSet::single("ADMIN"))
            ),
            GuardOutcome::Render
        );
    }

    /// Test that a mismatched role redirects to login under the default
    /// policy.
    #[test]
    fn test_mismatch_redirects_to_login_by_default() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate(
                &snapshot(false, true, Some("patient")),
                Some(&RoleSet::single("admin"))
            ),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }

    /// Test that the mismatch policy can redirect home instead.
    #[test]
    fn test_mismatch_policy_home() {
        let guard = RouteGuard::new(GuardConfig {
            on_role_mismatch: MismatchRedirect::Home,
        });
        assert_eq!(
            guard.evaluate(
                &snapshot(false, true, Some("patient")),
                Some(&RoleSet::single("admin"))
            ),
            GuardOutcome::Redirect(routes::HOME)
        );
    }

    /// Test that a multi-role requirement accepts any member.
    #[test]
    fn test_role_set_membership() {
        let guard = RouteGuard::default();
        let staff = RoleSet::one_of(["doctor", "lab_assistant"]);

        assert_eq!(
            guard.evaluate(&snapshot(false, true, Some("lab_assistant")), Some(&staff)),
            GuardOutcome::Render
        );
        assert_eq!(
            guard.evaluate(&snapshot(false, true, Some("patient")), Some(&staff)),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }
}
