//! Promotion / Faction DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use ringside::{Affiliation, AffiliationChanges, Counted, EntityRef};

/// `{id, name}` reference to a promotion or faction
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntityRefResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<EntityRef> for EntityRefResponse {
    fn from(r: EntityRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// Promotion or faction
#[derive(Debug, Serialize, ToSchema)]
pub struct AffiliationResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AffiliationResponse {
    pub fn from_domain<A: Affiliation>(item: &A) -> Self {
        let EntityRef { id, name } = item.to_ref();
        Self {
            id,
            name,
            image_url: item.image_url().map(str::to_string),
            created_at: item.created_at(),
        }
    }
}

/// Promotion or faction with its number of linked wrestlers
#[derive(Debug, Serialize, ToSchema)]
pub struct CountedAffiliationResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub wrestler_count: i64,
}

impl<A: Affiliation> From<Counted<A>> for CountedAffiliationResponse {
    fn from(counted: Counted<A>) -> Self {
        let AffiliationResponse {
            id,
            name,
            image_url,
            created_at,
        } = AffiliationResponse::from_domain(&counted.item);
        Self {
            id,
            name,
            image_url,
            created_at,
            wrestler_count: counted.wrestler_count,
        }
    }
}

/// Create promotion/faction request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAffiliationRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Update promotion/faction request. Omitted fields stay unchanged;
/// `"image_url": null` clears the image.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAffiliationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
}

impl From<UpdateAffiliationRequest> for AffiliationChanges {
    fn from(req: UpdateAffiliationRequest) -> Self {
        Self {
            name: req.name,
            image_url: req.image_url,
        }
    }
}

/// Both counted lists
#[derive(Debug, Serialize, ToSchema)]
pub struct CountsResponse {
    pub promotions: Vec<CountedAffiliationResponse>,
    pub factions: Vec<CountedAffiliationResponse>,
}

/// Name search over promotions/factions
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AffiliationSearchParams {
    /// Case-insensitive name substring
    #[serde(default)]
    pub q: Option<String>,
}
