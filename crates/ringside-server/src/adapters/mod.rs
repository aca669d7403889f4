//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod postgres;
pub mod storage;

// Re-exports
pub use postgres::PgStore;
pub use storage::SupabaseStorage;
