//! Service metadata endpoint

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde_json::{Value, json};

pub const SERVICE_TITLE: &str = "Inventory Management API";

/// Name, version and the main entry points of the API
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Service metadata"))
)]
pub async fn root(State(app): State<AppInfo>) -> Json<Value> {
    Json(json!({
        "message": SERVICE_TITLE,
        "version": app.version,
        "status": "active",
        "endpoints": {
            "products": "/products",
            "dashboard": "/dashboard/stats",
            "categories": "/categories",
            "documents": "/documents/products/full",
            "health": "/health",
            "docs": "/swagger-ui",
        }
    }))
}

pub fn router(app: AppInfo) -> Router {
    Router::new().route("/", get(root)).with_state(app)
}
