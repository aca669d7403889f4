//! Row decoding, join mapping and count aggregation
//!
//! Store rows are JSON objects. They are decoded into the typed records
//! below as soon as they come back from the store.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::{
    Affiliation, AffiliationKind, Association, Counted, DomainError, EntityRef, Wrestler,
};
use crate::ports::{Query, Row, Selection, Table};

pub(crate) const WRESTLER_COUNT: &str = "wrestler_count";
const ASSOCIATION_TARGET: &str = "other";

/// One join-table row with the linked entity's reference resolved
#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRow {
    pub wrestler_id: Uuid,
    pub other: Option<EntityRef>,
}

/// A wrestler row with both association embeds
#[derive(Debug, Deserialize)]
struct WrestlerJoinRow {
    id: Uuid,
    name: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    promotions: Option<Vec<AssociationRow>>,
    #[serde(default)]
    factions: Option<Vec<AssociationRow>>,
}

impl From<WrestlerJoinRow> for Wrestler {
    fn from(row: WrestlerJoinRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            created_at: row.created_at,
            promotions: references(row.promotions),
            factions: references(row.factions),
        }
    }
}

/// Join rows whose target vanished are skipped
fn references(rows: Option<Vec<AssociationRow>>) -> Vec<EntityRef> {
    rows.unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.other)
        .collect()
}

pub(crate) fn decode<T: DeserializeOwned>(row: Row) -> Result<T, DomainError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

pub(crate) fn decode_all<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, DomainError> {
    rows.into_iter().map(decode).collect()
}

pub(crate) fn decode_wrestlers(rows: Vec<Row>) -> Result<Vec<Wrestler>, DomainError> {
    rows.into_iter()
        .map(|row| decode::<WrestlerJoinRow>(row).map(Wrestler::from))
        .collect()
}

/// Decode an entity row carrying a `wrestler_count` embed.
///
/// A missing or null count is 0. The `[{"count": n}]` shape some REST
/// backends return for aggregate embeds is accepted too.
pub(crate) fn decode_counted<A: Affiliation>(mut row: Row) -> Result<Counted<A>, DomainError> {
    let wrestler_count = match row.remove(WRESTLER_COUNT) {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| malformed_count(&n))?,
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0),
        Some(other) => return Err(malformed_count(&other)),
    };
    Ok(Counted {
        item: decode(row)?,
        wrestler_count,
    })
}

fn malformed_count(value: &impl std::fmt::Display) -> DomainError {
    DomainError::Store(format!(
        "malformed row: unexpected {} value {}",
        WRESTLER_COUNT, value
    ))
}

/// First returned row, decoded. An empty result is a store error: the
/// statement claimed success without returning what it wrote.
pub(crate) fn decode_first<T: DeserializeOwned>(
    rows: Vec<Row>,
    table: Table,
) -> Result<T, DomainError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Store(format!("no row returned from {}", table)))?;
    decode(row)
}

pub(crate) fn into_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

pub(crate) fn association_row(association: &Association) -> Row {
    let mut row = Row::new();
    row.insert(
        "wrestler_id".to_string(),
        Value::String(association.wrestler_id.to_string()),
    );
    row.insert(
        Table::association_column(association.kind).to_string(),
        Value::String(association.target_id.to_string()),
    );
    row
}

pub(crate) fn entity_row(name: &str, image_url: Option<&str>) -> Row {
    into_row(json!({ "name": name, "image_url": image_url }))
}

/// Embed of one association kind: join rows with the target's `{id, name}`
fn association_embed(kind: AffiliationKind) -> Vec<Selection> {
    vec![
        Selection::Column("wrestler_id"),
        Selection::Parent {
            alias: ASSOCIATION_TARGET,
            table: Table::affiliation(kind),
            select: Selection::columns(&["id", "name"]),
        },
    ]
}

/// Wrestler rows with both association sets embedded, newest first
pub(crate) fn wrestler_join_query() -> Query {
    Query::select(Table::Wrestlers)
        .columns(Table::Wrestlers.columns())
        .children(
            "promotions",
            Table::association(AffiliationKind::Promotion),
            association_embed(AffiliationKind::Promotion),
        )
        .children(
            "factions",
            Table::association(AffiliationKind::Faction),
            association_embed(AffiliationKind::Faction),
        )
        .newest_first()
}

/// Affiliation rows with a live wrestler count, newest first
pub(crate) fn count_query(kind: AffiliationKind) -> Query {
    let table = Table::affiliation(kind);
    Query::select(table)
        .columns(table.columns())
        .count(WRESTLER_COUNT, Table::association(kind))
        .newest_first()
}

/// Names must contain something besides whitespace
pub(crate) fn validate_name(entity_type: &str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{} name must not be empty",
            entity_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Promotion;

    fn promotion_row(count: Value) -> Row {
        into_row(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "AEW",
            "image_url": null,
            "created_at": "2024-05-01T12:00:00Z",
            "wrestler_count": count,
        }))
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let counted: Counted<Promotion> = decode_counted(promotion_row(Value::Null)).unwrap();
        assert_eq!(counted.wrestler_count, 0);

        let mut row = promotion_row(Value::Null);
        row.remove(WRESTLER_COUNT);
        let counted: Counted<Promotion> = decode_counted(row).unwrap();
        assert_eq!(counted.wrestler_count, 0);
        assert_eq!(counted.item.name, "AEW");
    }

    #[test]
    fn test_count_accepts_aggregate_array_shape() {
        let counted: Counted<Promotion> =
            decode_counted(promotion_row(json!([{ "count": 3 }]))).unwrap();
        assert_eq!(counted.wrestler_count, 3);

        let counted: Counted<Promotion> = decode_counted(promotion_row(json!([]))).unwrap();
        assert_eq!(counted.wrestler_count, 0);
    }

    #[test]
    fn test_count_rejects_garbage() {
        let result = decode_counted::<Promotion>(promotion_row(json!("many")));
        assert!(matches!(result, Err(DomainError::Store(_))));
    }

    #[test]
    fn test_count_rejects_fractional_and_oversized_numbers() {
        for count in [json!(1.5), json!(u64::MAX)] {
            let result = decode_counted::<Promotion>(promotion_row(count));
            assert!(matches!(result, Err(DomainError::Store(_))));
        }
    }

    #[test]
    fn test_wrestler_join_drops_dangling_targets_and_fills_empty_sets() {
        let wrestler_id = Uuid::new_v4();
        let aew = Uuid::new_v4();
        let row = into_row(json!({
            "id": wrestler_id.to_string(),
            "name": "Kenny Omega",
            "image_url": null,
            "created_at": "2024-05-01T12:00:00Z",
            "promotions": [
                { "wrestler_id": wrestler_id.to_string(), "other": { "id": aew.to_string(), "name": "AEW" } },
                { "wrestler_id": wrestler_id.to_string(), "other": null },
            ],
            "factions": null,
        }));

        let wrestlers = decode_wrestlers(vec![row]).unwrap();
        assert_eq!(wrestlers[0].promotions, vec![EntityRef::new(aew, "AEW")]);
        assert!(wrestlers[0].factions.is_empty());
    }

    #[test]
    fn test_plain_row_decodes_without_embeds() {
        let row = into_row(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "Kenny Omega",
            "image_url": "https://cdn.example/k.png",
            "created_at": "2024-05-01T12:00:00Z",
        }));
        let wrestlers = decode_wrestlers(vec![row]).unwrap();
        assert!(wrestlers[0].promotions.is_empty());
        assert_eq!(
            wrestlers[0].image_url.as_deref(),
            Some("https://cdn.example/k.png")
        );
    }

    #[test]
    fn test_queries_match_schema() {
        assert!(wrestler_join_query().validate().is_ok());
        assert!(count_query(AffiliationKind::Promotion).validate().is_ok());
        assert!(count_query(AffiliationKind::Faction).validate().is_ok());
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(validate_name("Wrestler", "  \t").is_err());
        assert!(validate_name("Wrestler", "wwe").is_ok());
    }
}
