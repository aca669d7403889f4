//! In-memory store and blob store, for tests and local runs

mod blob;
mod store;

pub use blob::MemoryBlobStore;
pub use store::MemoryStore;
