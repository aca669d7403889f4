//! Relational Store Port
//!
//! Abstract interface over the relational backend. Every call is one
//! statement with per-statement durability; there are no transactions.

mod query;
mod table;

use async_trait::async_trait;

pub use query::*;
pub use table::*;

use crate::domain::errors::DomainError;

/// Query/insert/update/delete against named tables
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Run a select, returning one JSON object per matching row
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError>;

    /// Insert rows, returning them with store-generated columns filled in.
    /// Fails as a whole on a key conflict or a dangling foreign key.
    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, DomainError>;

    /// Set `fields` on every row matching `filter`, returning the updated rows
    async fn update(
        &self,
        table: Table,
        fields: Row,
        filter: &Filter,
    ) -> Result<Vec<Row>, DomainError>;

    /// Delete every row matching `filter`, cascading through foreign keys.
    /// Returns the number of rows removed from `table`.
    async fn delete(&self, table: Table, filter: &Filter) -> Result<u64, DomainError>;
}
