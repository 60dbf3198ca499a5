// This module re-exports important pieces for convenience,
// so we can "use medsession::config::*" easily.
pub mod logging;
pub mod store;
pub mod types;

pub use logging::*;
pub use store::*;
pub use types::*;
