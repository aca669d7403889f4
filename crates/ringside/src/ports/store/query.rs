//! Structured select queries
//!
//! A `Query` names a table, the columns to return, optional embedded
//! relations, one equality filter and one sort key. Adapters turn it into
//! whatever their backend speaks. Result rows are JSON objects shaped as:
//!
//! - `Column(c)` -> `"c": value`
//! - `Count { alias, .. }` -> `"alias": <integer>`
//! - `Children { alias, .. }` -> `"alias": [ {..}, .. ]` (possibly empty)
//! - `Parent { alias, .. }` -> `"alias": {..}` or `null`

use serde_json::Value;
use uuid::Uuid;

use super::table::Table;
use crate::domain::DomainError;

/// One row as returned by the store
pub type Row = serde_json::Map<String, Value>;

/// What to return for each matching row
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Column(&'static str),
    /// Number of rows in `table` referencing this row
    Count { alias: &'static str, table: Table },
    /// Rows in `table` referencing this row
    Children {
        alias: &'static str,
        table: Table,
        select: Vec<Selection>,
    },
    /// The row in `table` this row references
    Parent {
        alias: &'static str,
        table: Table,
        select: Vec<Selection>,
    },
}

impl Selection {
    pub fn columns(columns: &[&'static str]) -> Vec<Selection> {
        columns.iter().copied().map(Selection::Column).collect()
    }
}

/// Equality filter on a single column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &'static str, value: Value) -> Self {
        Self { column, value }
    }

    pub fn id(column: &'static str, id: Uuid) -> Self {
        Self::eq(column, Value::String(id.to_string()))
    }

    /// Check the column exists on `table`
    pub fn validate(&self, table: Table) -> Result<(), DomainError> {
        if table.has_column(self.column) {
            Ok(())
        } else {
            Err(DomainError::Store(format!(
                "unknown column {}.{}",
                table, self.column
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

/// A select against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: Table,
    /// Empty means every column of `table`
    pub select: Vec<Selection>,
    pub filter: Option<Filter>,
    pub order: Option<Order>,
}

impl Query {
    pub fn select(table: Table) -> Self {
        Self {
            table,
            select: Vec::new(),
            filter: None,
            order: None,
        }
    }

    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.select.extend(Selection::columns(columns));
        self
    }

    pub fn count(mut self, alias: &'static str, table: Table) -> Self {
        self.select.push(Selection::Count { alias, table });
        self
    }

    pub fn children(mut self, alias: &'static str, table: Table, select: Vec<Selection>) -> Self {
        self.select.push(Selection::Children {
            alias,
            table,
            select,
        });
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = Some(Order {
            column: "created_at",
            descending: true,
        });
        self
    }

    /// Check every identifier and relation against the schema
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_selection(self.table, &self.select)?;
        if let Some(filter) = &self.filter {
            filter.validate(self.table)?;
        }
        if let Some(order) = &self.order {
            if !self.table.has_column(order.column) {
                return Err(DomainError::Store(format!(
                    "unknown order column {}.{}",
                    self.table, order.column
                )));
            }
        }
        Ok(())
    }
}

fn validate_selection(table: Table, select: &[Selection]) -> Result<(), DomainError> {
    for selection in select {
        match selection {
            Selection::Column(column) => {
                if !table.has_column(column) {
                    return Err(DomainError::Store(format!(
                        "unknown column {}.{}",
                        table, column
                    )));
                }
            }
            Selection::Count { table: child, .. } => {
                relation(*child, table)?;
            }
            Selection::Children {
                table: child,
                select,
                ..
            } => {
                relation(*child, table)?;
                validate_selection(*child, select)?;
            }
            Selection::Parent {
                table: parent,
                select,
                ..
            } => {
                relation(table, *parent)?;
                validate_selection(*parent, select)?;
            }
        }
    }
    Ok(())
}

/// Foreign key column in `child` referencing `parent`
pub fn relation(child: Table, parent: Table) -> Result<&'static str, DomainError> {
    child.foreign_key_to(parent).ok_or_else(|| {
        DomainError::Store(format!("no relationship between {} and {}", child, parent))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_query_validates() {
        let query = Query::select(Table::Promotions)
            .columns(&["id", "name"])
            .count("wrestler_count", Table::WrestlerPromotions)
            .newest_first();
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_nested_join_validates() {
        let query = Query::select(Table::Wrestlers).columns(&["id"]).children(
            "promotions",
            Table::WrestlerPromotions,
            vec![Selection::Parent {
                alias: "promotion",
                table: Table::Promotions,
                select: Selection::columns(&["id", "name"]),
            }],
        );
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_unrelated_embed_is_rejected() {
        let query = Query::select(Table::Promotions).count("n", Table::WrestlerFactions);
        assert!(matches!(query.validate(), Err(DomainError::Store(_))));
    }

    #[test]
    fn test_unknown_identifiers_are_rejected() {
        let bad_column = Query::select(Table::Wrestlers).columns(&["name; DROP TABLE wrestlers"]);
        assert!(bad_column.validate().is_err());

        let bad_filter = Query::select(Table::Wrestlers).filter(Filter::eq("nope", Value::Null));
        assert!(bad_filter.validate().is_err());
    }
}
