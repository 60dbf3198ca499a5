// This module re-exports the core domain types for convenience,
// so we can "use medsession::models::{Role, User};" easily.
pub mod role;
pub mod user;

pub use role::Role;
pub use user::User;
