//! Query rendering for PostgreSQL
//!
//! Every statement returns rows as `jsonb`, so results come back in the
//! same JSON shape the in-memory store produces. Values never appear in
//! the SQL text: they are bound as `jsonb` and cast to column types with
//! `jsonb_populate_record(set)`. Identifiers come from the static schema
//! and are validated before rendering.

use serde_json::Value;

use ringside::ports::relation;
use ringside::{DomainError, Filter, Query, Row, Selection, Table};

/// Rendered SQL with its positional parameters
#[derive(Debug)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Default)]
struct Renderer {
    params: Vec<Value>,
    aliases: usize,
}

impl Renderer {
    fn alias(&mut self) -> String {
        let alias = format!("t{}", self.aliases);
        self.aliases += 1;
        alias
    }

    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// `alias.col = <filter value cast to the column type>`
    fn condition(&mut self, table: Table, alias: &str, filter: &Filter) -> String {
        let mut record = Row::new();
        record.insert(filter.column.to_string(), filter.value.clone());
        let param = self.bind(Value::Object(record));
        format!(
            "{alias}.{col} = (jsonb_populate_record(NULL::{table}, {param})).{col}",
            col = filter.column
        )
    }

    fn object(
        &mut self,
        table: Table,
        alias: &str,
        select: &[Selection],
    ) -> Result<String, DomainError> {
        if select.is_empty() {
            return Ok(format!("to_jsonb({alias})"));
        }

        let mut fields = Vec::with_capacity(select.len());
        for selection in select {
            let (key, expr) = match selection {
                Selection::Column(column) => (*column, format!("{alias}.{column}")),
                Selection::Count { alias: key, table: child } => {
                    let fk = relation(*child, table)?;
                    let inner = self.alias();
                    let expr = format!(
                        "(SELECT count(*) FROM {child} {inner} WHERE {inner}.{fk} = {alias}.id)"
                    );
                    (*key, expr)
                }
                Selection::Children {
                    alias: key,
                    table: child,
                    select,
                } => {
                    let fk = relation(*child, table)?;
                    let inner = self.alias();
                    let nested = self.object(*child, &inner, select)?;
                    let expr = format!(
                        "COALESCE((SELECT jsonb_agg({nested}) FROM {child} {inner} \
                         WHERE {inner}.{fk} = {alias}.id), '[]'::jsonb)"
                    );
                    (*key, expr)
                }
                Selection::Parent {
                    alias: key,
                    table: parent,
                    select,
                } => {
                    let fk = relation(table, *parent)?;
                    let inner = self.alias();
                    let nested = self.object(*parent, &inner, select)?;
                    let expr = format!(
                        "(SELECT {nested} FROM {parent} {inner} WHERE {inner}.id = {alias}.{fk})"
                    );
                    (*key, expr)
                }
            };
            fields.push(format!("'{key}', {expr}"));
        }
        Ok(format!("jsonb_build_object({})", fields.join(", ")))
    }
}

pub fn select(query: &Query) -> Result<Statement, DomainError> {
    query.validate()?;
    let mut r = Renderer::default();
    let root = r.alias();

    let object = r.object(query.table, &root, &query.select)?;
    let mut sql = format!("SELECT {object} FROM {} {root}", query.table);
    if let Some(filter) = &query.filter {
        let condition = r.condition(query.table, &root, filter);
        sql.push_str(&format!(" WHERE {condition}"));
    }
    if let Some(order) = query.order {
        let direction = if order.descending { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY {root}.{} {direction}", order.column));
    }

    Ok(Statement {
        sql,
        params: r.params,
    })
}

/// Bulk insert from a `jsonb` array. Columns absent from every row are
/// left to their defaults.
pub fn insert(table: Table, rows: Vec<Row>) -> Result<Statement, DomainError> {
    for row in &rows {
        check_columns(table, row)?;
    }
    let columns: Vec<&str> = table
        .columns()
        .iter()
        .copied()
        .filter(|c| rows.iter().any(|row| row.contains_key(*c)))
        .collect();
    if columns.is_empty() {
        return Err(DomainError::Store(format!(
            "insert into {} without any column",
            table
        )));
    }
    let columns = columns.join(", ");

    let mut r = Renderer::default();
    let param = r.bind(Value::Array(rows.into_iter().map(Value::Object).collect()));
    let sql = format!(
        "INSERT INTO {table} AS t0 ({columns}) \
         SELECT {columns} FROM jsonb_populate_recordset(NULL::{table}, {param}) \
         RETURNING to_jsonb(t0)"
    );

    Ok(Statement {
        sql,
        params: r.params,
    })
}

pub fn update(table: Table, fields: Row, filter: &Filter) -> Result<Statement, DomainError> {
    filter.validate(table)?;
    check_columns(table, &fields)?;
    if fields.is_empty() {
        return Err(DomainError::Store(format!(
            "update of {} without any column",
            table
        )));
    }

    let assignments = fields
        .keys()
        .map(|c| format!("{c} = r.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut r = Renderer::default();
    let param = r.bind(Value::Object(fields));
    let condition = r.condition(table, "t0", filter);
    let sql = format!(
        "UPDATE {table} AS t0 SET {assignments} \
         FROM jsonb_populate_record(NULL::{table}, {param}) AS r \
         WHERE {condition} RETURNING to_jsonb(t0)"
    );

    Ok(Statement {
        sql,
        params: r.params,
    })
}

pub fn delete(table: Table, filter: &Filter) -> Result<Statement, DomainError> {
    filter.validate(table)?;
    let mut r = Renderer::default();
    let condition = r.condition(table, "t0", filter);

    Ok(Statement {
        sql: format!("DELETE FROM {table} AS t0 WHERE {condition}"),
        params: r.params,
    })
}

fn check_columns(table: Table, row: &Row) -> Result<(), DomainError> {
    match row.keys().find(|c| !table.has_column(c)) {
        Some(column) => Err(DomainError::Store(format!(
            "unknown column {}.{}",
            table, column
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => Row::new(),
        }
    }

    #[test]
    fn test_select_with_count_and_order() {
        let query = Query::select(Table::Promotions)
            .columns(&["id", "name"])
            .count("wrestler_count", Table::WrestlerPromotions)
            .newest_first();

        let stmt = select(&query).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT jsonb_build_object('id', t0.id, 'name', t0.name, 'wrestler_count', \
             (SELECT count(*) FROM wrestler_promotions t1 WHERE t1.promotion_id = t0.id)) \
             FROM promotions t0 ORDER BY t0.created_at DESC"
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_select_nested_join_with_filter() {
        let id = Uuid::new_v4();
        let query = Query::select(Table::Wrestlers)
            .columns(&["id"])
            .children(
                "factions",
                Table::WrestlerFactions,
                vec![Selection::Parent {
                    alias: "other",
                    table: Table::Factions,
                    select: Selection::columns(&["id", "name"]),
                }],
            )
            .filter(Filter::id("id", id));

        let stmt = select(&query).unwrap();
        assert!(stmt.sql.contains(
            "COALESCE((SELECT jsonb_agg(jsonb_build_object('other', \
             (SELECT jsonb_build_object('id', t2.id, 'name', t2.name) FROM factions t2 \
             WHERE t2.id = t1.faction_id))) FROM wrestler_factions t1 \
             WHERE t1.wrestler_id = t0.id), '[]'::jsonb)"
        ));
        assert!(stmt
            .sql
            .ends_with("WHERE t0.id = (jsonb_populate_record(NULL::wrestlers, $1)).id"));
        assert_eq!(stmt.params, vec![json!({ "id": id.to_string() })]);
    }

    #[test]
    fn test_select_rejects_unknown_column() {
        let query = Query::select(Table::Wrestlers).columns(&["password"]);
        assert!(matches!(select(&query), Err(DomainError::Store(_))));
    }

    #[test]
    fn test_insert_uses_only_supplied_columns() {
        let rows = vec![row(json!({ "name": "AEW", "image_url": null }))];
        let stmt = insert(Table::Promotions, rows).unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO promotions AS t0 (name, image_url) \
             SELECT name, image_url FROM jsonb_populate_recordset(NULL::promotions, $1) \
             RETURNING to_jsonb(t0)"
        );
        assert_eq!(stmt.params, vec![json!([{ "name": "AEW", "image_url": null }])]);
    }

    #[test]
    fn test_update_binds_fields_then_filter() {
        let id = Uuid::new_v4();
        let stmt = update(
            Table::Factions,
            row(json!({ "name": "The Elite" })),
            &Filter::id("id", id),
        )
        .unwrap();
        assert!(stmt.sql.starts_with("UPDATE factions AS t0 SET name = r.name FROM"));
        assert_eq!(stmt.params.len(), 2);
        assert_eq!(stmt.params[1], json!({ "id": id.to_string() }));

        let empty = update(Table::Factions, Row::new(), &Filter::id("id", id));
        assert!(empty.is_err());
    }

    #[test]
    fn test_delete_on_join_table() {
        let id = Uuid::new_v4();
        let stmt = delete(Table::WrestlerPromotions, &Filter::id("wrestler_id", id)).unwrap();
        assert_eq!(
            stmt.sql,
            "DELETE FROM wrestler_promotions AS t0 WHERE t0.wrestler_id = \
             (jsonb_populate_record(NULL::wrestler_promotions, $1)).wrestler_id"
        );
    }
}
