//! Wrestler DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use ringside::{NewWrestler, Wrestler, WrestlerFilter, WrestlerUpdate};

use super::EntityRefResponse;

/// Wrestler with its promotions and factions
#[derive(Debug, Serialize, ToSchema)]
pub struct WrestlerResponse {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub promotions: Vec<EntityRefResponse>,
    pub factions: Vec<EntityRefResponse>,
}

impl From<Wrestler> for WrestlerResponse {
    fn from(w: Wrestler) -> Self {
        Self {
            id: w.id,
            name: w.name,
            image_url: w.image_url,
            created_at: w.created_at,
            promotions: w.promotions.into_iter().map(Into::into).collect(),
            factions: w.factions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create wrestler request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWrestlerRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub promotion_ids: Vec<Uuid>,
    #[serde(default)]
    pub faction_ids: Vec<Uuid>,
}

impl From<CreateWrestlerRequest> for NewWrestler {
    fn from(req: CreateWrestlerRequest) -> Self {
        Self {
            name: req.name,
            image_url: req.image_url,
            promotion_ids: req.promotion_ids,
            faction_ids: req.faction_ids,
        }
    }
}

/// Update wrestler request. The id lists are the complete new sets; an
/// omitted list clears that kind of link.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWrestlerRequest {
    pub name: String,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub promotion_ids: Vec<Uuid>,
    #[serde(default)]
    pub faction_ids: Vec<Uuid>,
}

impl From<UpdateWrestlerRequest> for WrestlerUpdate {
    fn from(req: UpdateWrestlerRequest) -> Self {
        Self {
            name: req.name,
            image_url: req.image_url,
            promotion_ids: req.promotion_ids,
            faction_ids: req.faction_ids,
        }
    }
}

/// Wrestler list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WrestlerSearchParams {
    /// Case-insensitive name substring
    pub q: Option<String>,
    pub promotion_id: Option<Uuid>,
    pub faction_id: Option<Uuid>,
}

impl From<WrestlerSearchParams> for WrestlerFilter {
    fn from(params: WrestlerSearchParams) -> Self {
        Self {
            name: params.q,
            promotion_id: params.promotion_id,
            faction_id: params.faction_id,
        }
    }
}
