use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod config;
mod models;
mod routes;

use adapters::{PgStore, SupabaseStorage};
use config::ServerConfig;
use ringside::Roster;

/// Repositories wired to the production store and blob adapters
pub type AppRoster = Roster<PgStore, SupabaseStorage>;

/// Largest accepted image upload
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<AppRoster>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Ringside API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Ringside API initializing...");

    let config = ServerConfig::from_secrets(&secrets)?;

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {e}"))?;

    tracing::info!("Database migrations completed");

    let store = Arc::new(PgStore::new(pool));
    let blobs = Arc::new(
        SupabaseStorage::new(
            &config.storage_url,
            &config.storage_key,
            config.storage_timeout,
        )
        .map_err(|e| anyhow::anyhow!("Failed to build storage client: {e}"))?,
    );
    tracing::info!("Image storage: {}", config.storage_url);

    let state = AppState {
        roster: Arc::new(Roster::new(store, blobs)),
    };

    let api_routes = Router::new()
        .merge(routes::promotion::router())
        .merge(routes::faction::router())
        .merge(routes::wrestler::router())
        .merge(routes::counts::router())
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Ringside API ready");

    Ok(router.into())
}
