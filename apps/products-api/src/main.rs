//! HTTP service exposing product CRUD and category statistics over MongoDB.

use axum_helpers::server::{close_mongo, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!("Using MongoDB database '{}'", config.mongodb.database());

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    // Liveness sits at the root, next to the documentation UIs
    let app = router.merge(health_router(state.config.app.clone()));

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        close_mongo(state.mongo_client, "main"),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("products-api shutdown complete");
    Ok(())
}
