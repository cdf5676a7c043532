//! Inventory API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{DatabaseConnection, connect_from_config_with_retry, schema};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Schema applied when `DB_BOOTSTRAP_SCHEMA` is set
const SCHEMA: &str = include_str!("../../../manifests/migrations/inventory/001_init.sql");

const EXPECTED_TABLES: [&str; 3] = ["products", "categories", "product_audit"];

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = dotenvy::dotenv();
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        max_connections = config.database.max_connections,
        "Connecting to PostgreSQL"
    );

    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    info!("Database connection established");

    if config.bootstrap_schema {
        info!("Applying embedded schema");
        schema::apply_schema(&db, SCHEMA).await?;
    }

    check_schema(&db).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes)?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db_for_cleanup = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db_for_cleanup.close().await {
                warn!(error = %e, "Failed to close PostgreSQL pool");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}

/// Reports absent tables; `missing_tables` already logs each one.
async fn check_schema(db: &DatabaseConnection) -> eyre::Result<Vec<String>> {
    let missing = schema::missing_tables(db, &EXPECTED_TABLES).await?;
    if missing.is_empty() {
        info!("Schema check passed");
    } else {
        info!(
            missing = missing.len(),
            "Schema incomplete; apply manifests/migrations/inventory or set DB_BOOTSTRAP_SCHEMA"
        );
    }
    Ok(missing)
}
