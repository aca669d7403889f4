//! Ringside Domain Library
//!
//! Data core for the wrestling roster admin: wrestlers, promotions,
//! factions and the many-to-many links between them.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Wrestler, Promotion, Faction, EntityRef, Association
//!   - `value_objects/`: AffiliationKind, ImagePath, WrestlerFilter
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `store/`: Relational store with nested join selection
//!   - `blob`: Object storage for images
//!
//! - **Repositories** (`repositories/`): CRUD and association sync over the ports
//!
//! - **Adapters** (`adapters/`): In-memory port implementations
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ringside::{MemoryBlobStore, MemoryStore, NewWrestler, Roster};
//!
//! let roster = Roster::new(Arc::new(MemoryStore::new()), Arc::new(MemoryBlobStore::new()));
//! let aew = roster.promotions.create("AEW", None).await?;
//! let kenny = roster
//!     .wrestlers
//!     .create(NewWrestler {
//!         name: "Kenny Omega".into(),
//!         promotion_ids: vec![aew.id],
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod repositories;

// Re-export commonly used types
pub use adapters::{MemoryBlobStore, MemoryStore};
pub use domain::{
    Affiliation, AffiliationChanges, AffiliationKind, Counted, DomainError, EntityRef, Faction,
    ImagePath, NewWrestler, Promotion, Wrestler, WrestlerFilter, WrestlerUpdate,
};
pub use ports::{BlobStore, Filter, Query, RelationalStore, Row, Selection, Table};
pub use repositories::{
    AffiliationRepository, FactionRepository, PromotionRepository, Roster, RosterCounts,
    WrestlerRepository,
};
