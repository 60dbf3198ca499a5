pub mod base;
pub mod file_store;
pub mod memory_store;

// Re-export the primary store items so code outside can do
// "use medsession::store::{SessionStore, create_store};"
pub use base::{create_store, keys, SessionStore};
