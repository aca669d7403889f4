//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AffiliationResponse, CountedAffiliationResponse, CountsResponse, CreateAffiliationRequest,
    CreateWrestlerRequest, EntityRefResponse, UpdateAffiliationRequest, UpdateWrestlerRequest,
    UploadResponse, WrestlerResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Promotion endpoints
        super::promotion::list_promotions,
        super::promotion::list_promotion_counts,
        super::promotion::list_promotion_options,
        super::promotion::create_promotion,
        super::promotion::get_promotion,
        super::promotion::update_promotion,
        super::promotion::delete_promotion,
        super::promotion::upload_promotion_image,
        // Faction endpoints
        super::faction::list_factions,
        super::faction::list_faction_counts,
        super::faction::list_faction_options,
        super::faction::create_faction,
        super::faction::get_faction,
        super::faction::update_faction,
        super::faction::delete_faction,
        super::faction::upload_faction_image,
        // Wrestler endpoints
        super::wrestler::list_wrestlers,
        super::wrestler::create_wrestler,
        super::wrestler::get_wrestler,
        super::wrestler::update_wrestler,
        super::wrestler::delete_wrestler,
        super::wrestler::upload_wrestler_image,
        // Count endpoints
        super::counts::get_counts,
    ),
    info(
        title = "Ringside API",
        version = "0.1.0",
        description = "Wrestling roster admin: wrestlers, promotions, factions and their links.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Promotion", description = "Promotions - wrestling companies"),
        (name = "Faction", description = "Factions - stables and tag teams"),
        (name = "Wrestler", description = "Wrestlers and their promotion/faction links"),
        (name = "Counts", description = "Wrestler counts per promotion and faction"),
    ),
    components(
        schemas(
            // Promotion / Faction
            AffiliationResponse,
            CountedAffiliationResponse,
            CreateAffiliationRequest,
            UpdateAffiliationRequest,
            EntityRefResponse,
            CountsResponse,
            // Wrestler
            WrestlerResponse,
            CreateWrestlerRequest,
            UpdateWrestlerRequest,
            // Images
            UploadResponse,
        )
    ),
)]
pub struct ApiDoc;
