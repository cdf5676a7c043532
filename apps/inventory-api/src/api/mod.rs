//! API routes module

pub mod health;
pub mod root;

use axum::Router;
use domain_inventory::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));

    handlers::router(service)
        .merge(health::router(state.clone()))
        .merge(root::router(state.config.app.clone()))
}
