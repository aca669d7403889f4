//! Static schema of the relational store
//!
//! Every adapter resolves embeds and validates identifiers against this
//! description, so it must agree with the server's migrations.

use crate::domain::AffiliationKind;

/// Tables known to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Wrestlers,
    Promotions,
    Factions,
    WrestlerPromotions,
    WrestlerFactions,
}

/// A column in one table referencing `references.id`.
/// All foreign keys cascade on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: Table,
}

const ENTITY_COLUMNS: &[&str] = &["id", "name", "image_url", "created_at"];
const ENTITY_GENERATED: &[&str] = &["id", "created_at"];

const WRESTLER_PROMOTION_KEYS: &[ForeignKey] = &[
    ForeignKey {
        column: "wrestler_id",
        references: Table::Wrestlers,
    },
    ForeignKey {
        column: "promotion_id",
        references: Table::Promotions,
    },
];

const WRESTLER_FACTION_KEYS: &[ForeignKey] = &[
    ForeignKey {
        column: "wrestler_id",
        references: Table::Wrestlers,
    },
    ForeignKey {
        column: "faction_id",
        references: Table::Factions,
    },
];

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Wrestlers,
        Table::Promotions,
        Table::Factions,
        Table::WrestlerPromotions,
        Table::WrestlerFactions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Wrestlers => "wrestlers",
            Table::Promotions => "promotions",
            Table::Factions => "factions",
            Table::WrestlerPromotions => "wrestler_promotions",
            Table::WrestlerFactions => "wrestler_factions",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Wrestlers | Table::Promotions | Table::Factions => ENTITY_COLUMNS,
            Table::WrestlerPromotions => &["wrestler_id", "promotion_id"],
            Table::WrestlerFactions => &["wrestler_id", "faction_id"],
        }
    }

    /// Columns the store fills in when an insert omits them
    pub fn generated_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Wrestlers | Table::Promotions | Table::Factions => ENTITY_GENERATED,
            Table::WrestlerPromotions | Table::WrestlerFactions => &[],
        }
    }

    /// Columns that may hold null; every other column is NOT NULL
    pub fn nullable_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Wrestlers | Table::Promotions | Table::Factions => &["image_url"],
            Table::WrestlerPromotions | Table::WrestlerFactions => &[],
        }
    }

    /// Columns whose combined values are unique per row
    pub fn primary_key(&self) -> &'static [&'static str] {
        match self {
            Table::Wrestlers | Table::Promotions | Table::Factions => &["id"],
            Table::WrestlerPromotions => &["wrestler_id", "promotion_id"],
            Table::WrestlerFactions => &["wrestler_id", "faction_id"],
        }
    }

    pub fn foreign_keys(&self) -> &'static [ForeignKey] {
        match self {
            Table::Wrestlers | Table::Promotions | Table::Factions => &[],
            Table::WrestlerPromotions => WRESTLER_PROMOTION_KEYS,
            Table::WrestlerFactions => WRESTLER_FACTION_KEYS,
        }
    }

    /// Column in `self` referencing `parent`, if any
    pub fn foreign_key_to(&self, parent: Table) -> Option<&'static str> {
        self.foreign_keys()
            .iter()
            .find(|fk| fk.references == parent)
            .map(|fk| fk.column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    /// Entity table for an affiliation kind
    pub fn affiliation(kind: AffiliationKind) -> Table {
        match kind {
            AffiliationKind::Promotion => Table::Promotions,
            AffiliationKind::Faction => Table::Factions,
        }
    }

    /// Join table linking wrestlers to an affiliation kind
    pub fn association(kind: AffiliationKind) -> Table {
        match kind {
            AffiliationKind::Promotion => Table::WrestlerPromotions,
            AffiliationKind::Faction => Table::WrestlerFactions,
        }
    }

    /// Column of the join table holding the affiliation's id
    pub fn association_column(kind: AffiliationKind) -> &'static str {
        match kind {
            AffiliationKind::Promotion => "promotion_id",
            AffiliationKind::Faction => "faction_id",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
