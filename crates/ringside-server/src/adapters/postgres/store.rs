//! PostgreSQL implementation of RelationalStore

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use ringside::{DomainError, Filter, Query, RelationalStore, Row, Table};

use super::sql::{self, Statement};

/// PostgreSQL implementation of RelationalStore
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, stmt: Statement) -> Result<Vec<Row>, DomainError> {
        tracing::debug!("SQL: {}", stmt.sql);
        let mut query = sqlx::query_scalar::<_, Value>(&stmt.sql);
        for param in stmt.params {
            query = query.bind(param);
        }
        let values = query
            .fetch_all(&self.pool)
            .await
            .map_err(DomainError::store)?;

        values
            .into_iter()
            .map(|value| match value {
                Value::Object(row) => Ok(row),
                other => Err(DomainError::Store(format!(
                    "malformed row: expected object, got {}",
                    other
                ))),
            })
            .collect()
    }
}

#[async_trait]
impl RelationalStore for PgStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError> {
        self.fetch_rows(sql::select(query)?).await
    }

    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_rows(sql::insert(table, rows)?).await
    }

    async fn update(
        &self,
        table: Table,
        fields: Row,
        filter: &Filter,
    ) -> Result<Vec<Row>, DomainError> {
        self.fetch_rows(sql::update(table, fields, filter)?).await
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<u64, DomainError> {
        let stmt = sql::delete(table, filter)?;
        tracing::debug!("SQL: {}", stmt.sql);
        let mut query = sqlx::query(&stmt.sql);
        for param in stmt.params {
            query = query.bind(param);
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(DomainError::store)?;

        Ok(result.rows_affected())
    }
}
