//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (relational store, blob store).
//!
//! Production implementations live in the server crate; in-memory
//! implementations live in `crate::adapters::memory`.

pub mod blob;
pub mod store;

// Re-exports
pub use blob::*;
pub use store::*;
