//! Wrestler - A performer and their affiliations
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::EntityRef;

/// Wrestler with both association sets.
///
/// Plain list reads leave `promotions` and `factions` empty; joined reads
/// fill them. They are never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrestler {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub promotions: Vec<EntityRef>,
    #[serde(default)]
    pub factions: Vec<EntityRef>,
}

/// Input for creating a wrestler
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWrestler {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub promotion_ids: Vec<Uuid>,
    #[serde(default)]
    pub faction_ids: Vec<Uuid>,
}

/// New editable state for a wrestler.
///
/// Association lists are the complete desired sets, not deltas.
/// `image_url` is doubly optional: `None` leaves the image untouched,
/// `Some(None)` clears it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WrestlerUpdate {
    pub name: String,
    pub image_url: Option<Option<String>>,
    pub promotion_ids: Vec<Uuid>,
    pub faction_ids: Vec<Uuid>,
}
