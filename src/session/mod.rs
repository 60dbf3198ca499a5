pub mod context;

// Re-export so consumers can do "use medsession::session::SessionContext;"
pub use context::{SessionContext, SessionSnapshot};
