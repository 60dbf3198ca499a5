pub mod guard;
pub mod router;

// Re-export the primary gating items so code outside can do
// "use medsession::routing::{RouteGuard, GuardOutcome, RoleSet};"
pub use guard::{GuardOutcome, RoleSet, RouteGuard};
pub use router::{dashboard_redirect, landing_route, routes};
