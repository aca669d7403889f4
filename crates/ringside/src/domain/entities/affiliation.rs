//! Promotion / Faction - Affiliations a wrestler can hold
//!
//! Both kinds share one shape; the `Affiliation` trait lets repositories
//! and routes be written once for either.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::EntityRef;
use crate::domain::value_objects::AffiliationKind;

/// Common behaviour of promotions and factions
pub trait Affiliation:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: AffiliationKind;

    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn image_url(&self) -> Option<&str>;
    fn created_at(&self) -> DateTime<Utc>;

    fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id(), self.name())
    }
}

/// Promotion - a wrestling company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Faction - a stable or tag team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Affiliation for Promotion {
    const KIND: AffiliationKind = AffiliationKind::Promotion;

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Affiliation for Faction {
    const KIND: AffiliationKind = AffiliationKind::Faction;

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// An entity together with the live number of wrestlers linked to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counted<T> {
    #[serde(flatten)]
    pub item: T,
    pub wrestler_count: i64,
}

/// Partial update for a promotion or faction.
///
/// `image_url` is doubly optional: `None` leaves the image untouched,
/// `Some(None)` clears it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AffiliationChanges {
    pub name: Option<String>,
    pub image_url: Option<Option<String>>,
}

impl AffiliationChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image_url.is_none()
    }
}
