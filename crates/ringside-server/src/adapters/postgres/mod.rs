//! PostgreSQL Store Implementation

mod sql;
mod store;

pub use store::PgStore;
