//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI UIs, health probes, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the JSON [`ErrorResponse`] body
//! - **[`extractors`]**: validated JSON/query extractors and the integer id path extractor

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, ShutdownCoordinator, create_production_app, create_router,
    run_health_checks, shutdown_signal,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse, validation_details};

pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};
