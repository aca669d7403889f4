//! In-memory implementation of RelationalStore
//!
//! Honours the static schema: NOT NULL columns, primary keys, foreign keys
//! and `ON DELETE CASCADE`. Each call holds the lock for its whole
//! duration, so every statement is atomic on its own.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::ports::{relation, Filter, Query, RelationalStore, Row, Selection, Table};

#[derive(Default)]
struct Tables {
    rows: HashMap<Table, Vec<Row>>,
    last_created_at: Option<DateTime<Utc>>,
}

/// In-memory implementation of RelationalStore
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`
    pub async fn row_count(&self, table: Table) -> usize {
        self.tables.read().await.rows(table).len()
    }
}

impl Tables {
    fn rows(&self, table: Table) -> &[Row] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Strictly increasing timestamps keep "newest first" deterministic
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(next);
        next
    }

    fn check_columns(&self, table: Table, row: &Row) -> Result<(), DomainError> {
        for (column, value) in row {
            if !table.has_column(column) {
                return Err(DomainError::Store(format!(
                    "column \"{}\" of relation \"{}\" does not exist",
                    column, table
                )));
            }
            if value.is_null() && !table.nullable_columns().contains(&column.as_str()) {
                return Err(not_null_violation(table, column));
            }
        }
        Ok(())
    }

    fn check_foreign_keys(&self, table: Table, row: &Row) -> Result<(), DomainError> {
        for fk in table.foreign_keys() {
            let Some(value) = row.get(fk.column) else {
                continue;
            };
            let exists = self
                .rows(fk.references)
                .iter()
                .any(|parent| parent.get("id") == Some(value));
            if !exists {
                return Err(DomainError::Store(format!(
                    "insert or update on table \"{}\" violates foreign key constraint on \"{}\": {} is not present in \"{}\"",
                    table, fk.column, value, fk.references
                )));
            }
        }
        Ok(())
    }

    fn matches(row: &Row, filter: &Filter) -> bool {
        row.get(filter.column).unwrap_or(&Value::Null) == &filter.value
    }

    fn project(&self, table: Table, row: &Row, select: &[Selection]) -> Result<Row, DomainError> {
        if select.is_empty() {
            return Ok(row.clone());
        }

        let mut out = Row::new();
        for selection in select {
            match selection {
                Selection::Column(column) => {
                    out.insert(
                        column.to_string(),
                        row.get(*column).cloned().unwrap_or(Value::Null),
                    );
                }
                Selection::Count { alias, table: child } => {
                    let key = relation(*child, table)?;
                    let count = self.children_of(*child, key, row).count();
                    out.insert(alias.to_string(), Value::from(count as i64));
                }
                Selection::Children {
                    alias,
                    table: child,
                    select,
                } => {
                    let key = relation(*child, table)?;
                    let nested = self
                        .children_of(*child, key, row)
                        .map(|c| self.project(*child, c, select).map(Value::Object))
                        .collect::<Result<Vec<_>, _>>()?;
                    out.insert(alias.to_string(), Value::Array(nested));
                }
                Selection::Parent {
                    alias,
                    table: parent,
                    select,
                } => {
                    let key = relation(table, *parent)?;
                    let target = row.get(key).unwrap_or(&Value::Null);
                    let nested = match self
                        .rows(*parent)
                        .iter()
                        .find(|p| !target.is_null() && p.get("id") == Some(target))
                    {
                        Some(p) => Value::Object(self.project(*parent, p, select)?),
                        None => Value::Null,
                    };
                    out.insert(alias.to_string(), nested);
                }
            }
        }
        Ok(out)
    }

    fn children_of<'a>(
        &'a self,
        child: Table,
        key: &'static str,
        parent_row: &'a Row,
    ) -> impl Iterator<Item = &'a Row> + 'a {
        let id = parent_row.get("id").cloned().unwrap_or(Value::Null);
        self.rows(child)
            .iter()
            .filter(move |c| !id.is_null() && c.get(key) == Some(&id))
    }

    /// Remove matching rows and everything referencing them
    fn delete_cascade(&mut self, table: Table, filter: &Filter) -> u64 {
        let rows = self.rows.entry(table).or_default();
        let mut removed_ids = Vec::new();
        let before = rows.len();
        rows.retain(|row| {
            if Self::matches(row, filter) {
                if let Some(id) = row.get("id") {
                    removed_ids.push(id.clone());
                }
                false
            } else {
                true
            }
        });
        let removed = (before - rows.len()) as u64;

        for id in removed_ids {
            for dependent in Table::ALL {
                if let Some(key) = dependent.foreign_key_to(table) {
                    self.delete_cascade(dependent, &Filter::eq(key, id.clone()));
                }
            }
        }
        removed
    }
}

fn not_null_violation(table: Table, column: &str) -> DomainError {
    DomainError::Store(format!(
        "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
        column, table
    ))
}

fn primary_key(table: Table, row: &Row) -> Vec<Value> {
    table
        .primary_key()
        .iter()
        .map(|c| row.get(*c).cloned().unwrap_or(Value::Null))
        .collect()
}

/// Order JSON values, treating RFC 3339 strings as timestamps
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => {
            match (a.parse::<DateTime<Utc>>(), b.parse::<DateTime<Utc>>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[async_trait]
impl RelationalStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError> {
        query.validate()?;
        let tables = self.tables.read().await;

        let mut rows: Vec<&Row> = tables
            .rows(query.table)
            .iter()
            .filter(|row| query.filter.as_ref().map_or(true, |f| Tables::matches(row, f)))
            .collect();

        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(
                    a.get(order.column).unwrap_or(&Value::Null),
                    b.get(order.column).unwrap_or(&Value::Null),
                );
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        rows.into_iter()
            .map(|row| tables.project(query.table, row, &query.select))
            .collect()
    }

    async fn insert(&self, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, DomainError> {
        let mut tables = self.tables.write().await;

        let mut prepared = Vec::with_capacity(rows.len());
        let mut keys: HashSet<String> = tables
            .rows(table)
            .iter()
            .map(|r| Value::Array(primary_key(table, r)).to_string())
            .collect();

        for mut row in rows {
            tables.check_columns(table, &row)?;
            for column in table.generated_columns() {
                if row.contains_key(*column) {
                    continue;
                }
                let value = match *column {
                    "id" => Value::String(Uuid::new_v4().to_string()),
                    "created_at" => serde_json::to_value(tables.next_created_at())?,
                    _ => Value::Null,
                };
                row.insert(column.to_string(), value);
            }
            for column in table.columns() {
                if !row.contains_key(*column) {
                    if !table.nullable_columns().contains(column) {
                        return Err(not_null_violation(table, column));
                    }
                    row.insert(column.to_string(), Value::Null);
                }
            }
            tables.check_foreign_keys(table, &row)?;

            let key = Value::Array(primary_key(table, &row)).to_string();
            if !keys.insert(key.clone()) {
                return Err(DomainError::Store(format!(
                    "duplicate key value violates unique constraint \"{}_pkey\": {}",
                    table, key
                )));
            }
            prepared.push(row);
        }

        tables
            .rows
            .entry(table)
            .or_default()
            .extend(prepared.iter().cloned());
        Ok(prepared)
    }

    async fn update(
        &self,
        table: Table,
        fields: Row,
        filter: &Filter,
    ) -> Result<Vec<Row>, DomainError> {
        filter.validate(table)?;
        let mut tables = self.tables.write().await;
        tables.check_columns(table, &fields)?;
        tables.check_foreign_keys(table, &fields)?;

        let mut updated = Vec::new();
        for row in tables.rows.entry(table).or_default().iter_mut() {
            if Tables::matches(row, filter) {
                for (column, value) in &fields {
                    row.insert(column.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<u64, DomainError> {
        filter.validate(table)?;
        let mut tables = self.tables.write().await;
        Ok(tables.delete_cascade(table, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    async fn insert_one(store: &MemoryStore, table: Table, value: Value) -> Row {
        store
            .insert(table, vec![row(value)])
            .await
            .unwrap()
            .remove(0)
    }

    #[tokio::test]
    async fn test_insert_fills_generated_columns() {
        let store = MemoryStore::new();
        let inserted = insert_one(&store, Table::Promotions, json!({"name": "AEW"})).await;

        assert!(inserted["id"].as_str().unwrap().parse::<Uuid>().is_ok());
        assert!(inserted["created_at"].is_string());
        assert_eq!(inserted["image_url"], Value::Null);
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_name_and_unknown_column() {
        let store = MemoryStore::new();
        let err = store
            .insert(Table::Promotions, vec![row(json!({"image_url": null}))])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not-null"));

        let err = store
            .insert(Table::Promotions, vec![row(json!({"name": "x", "rank": 1}))])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_join_insert_is_all_or_nothing() {
        let store = MemoryStore::new();
        let w = insert_one(&store, Table::Wrestlers, json!({"name": "Kenny Omega"})).await;
        let p = insert_one(&store, Table::Promotions, json!({"name": "AEW"})).await;

        let rows = vec![
            row(json!({"wrestler_id": w["id"], "promotion_id": p["id"]})),
            row(json!({"wrestler_id": w["id"], "promotion_id": Uuid::new_v4().to_string()})),
        ];
        assert!(store.insert(Table::WrestlerPromotions, rows).await.is_err());
        assert_eq!(store.row_count(Table::WrestlerPromotions).await, 0);

        let dup = vec![
            row(json!({"wrestler_id": w["id"], "promotion_id": p["id"]})),
            row(json!({"wrestler_id": w["id"], "promotion_id": p["id"]})),
        ];
        let err = store.insert(Table::WrestlerPromotions, dup).await.unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
        assert_eq!(store.row_count(Table::WrestlerPromotions).await, 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_join_rows() {
        let store = MemoryStore::new();
        let w = insert_one(&store, Table::Wrestlers, json!({"name": "Kenny Omega"})).await;
        let p = insert_one(&store, Table::Promotions, json!({"name": "AEW"})).await;
        insert_one(
            &store,
            Table::WrestlerPromotions,
            json!({"wrestler_id": w["id"], "promotion_id": p["id"]}),
        )
        .await;

        let removed = store
            .delete(Table::Promotions, &Filter::eq("id", p["id"].clone()))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.row_count(Table::WrestlerPromotions).await, 0);
        assert_eq!(store.row_count(Table::Wrestlers).await, 1);
    }

    #[tokio::test]
    async fn test_select_embeds_counts_and_parents() {
        let store = MemoryStore::new();
        let w = insert_one(&store, Table::Wrestlers, json!({"name": "Kenny Omega"})).await;
        let aew = insert_one(&store, Table::Promotions, json!({"name": "AEW"})).await;
        let njpw = insert_one(&store, Table::Promotions, json!({"name": "NJPW"})).await;
        insert_one(
            &store,
            Table::WrestlerPromotions,
            json!({"wrestler_id": w["id"], "promotion_id": aew["id"]}),
        )
        .await;

        let counts = store
            .select(
                &Query::select(Table::Promotions)
                    .columns(&["name"])
                    .count("wrestler_count", Table::WrestlerPromotions)
                    .newest_first(),
            )
            .await
            .unwrap();
        assert_eq!(counts[0]["name"], njpw["name"]);
        assert_eq!(counts[0]["wrestler_count"], json!(0));
        assert_eq!(counts[1]["wrestler_count"], json!(1));

        let joined = store
            .select(&Query::select(Table::Wrestlers).columns(&["id"]).children(
                "promotions",
                Table::WrestlerPromotions,
                vec![Selection::Parent {
                    alias: "promotion",
                    table: Table::Promotions,
                    select: Selection::columns(&["id", "name"]),
                }],
            ))
            .await
            .unwrap();
        assert_eq!(
            joined[0]["promotions"],
            json!([{"promotion": {"id": aew["id"], "name": "AEW"}}])
        );
    }

    #[tokio::test]
    async fn test_update_returns_only_matching_rows() {
        let store = MemoryStore::new();
        let p = insert_one(&store, Table::Promotions, json!({"name": "WWF"})).await;

        let updated = store
            .update(
                Table::Promotions,
                row(json!({"name": "WWE"})),
                &Filter::eq("id", p["id"].clone()),
            )
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["name"], json!("WWE"));

        let none = store
            .update(
                Table::Promotions,
                row(json!({"name": "WCW"})),
                &Filter::id("id", Uuid::new_v4()),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
