//! Health check endpoint

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

/// Probe the database with `SELECT 1`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 503, description = "Database is unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    let (status, Json(body)) = run_health_checks(checks).await;
    (status, Json(body))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

