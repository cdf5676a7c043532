//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api;

/// Service-level paths and metadata
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Management API",
        version = "1.0.0",
        description = "Inventory CRUD, dashboard figures and PDF reports",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(api::root::root, api::health::health),
    tags(
        (name = "root", description = "Service metadata"),
        (name = "health", description = "Dependency health")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for Inventory API
///
/// The inventory routes are mounted at the root, so their document is merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_inventory::handlers::ApiDoc::openapi());
        doc
    }
}
