//! Adapters
//!
//! Port implementations that ship with the domain crate.

pub mod memory;

pub use memory::{MemoryBlobStore, MemoryStore};
