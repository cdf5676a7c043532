use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// CORS restricted to `allowed_origins`.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - Exposed: Content-Disposition, so browsers can read report file names
/// - Max age: 1 hour
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600))
}

/// Any origin, any method, any header.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Reads comma-separated origins from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or blank falls back to the permissive layer. An unparsable origin is an error.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var(CORS_ALLOWED_ORIGIN).unwrap_or_default();
    let origins = parse_origins(&raw)?;

    if origins.is_empty() {
        warn!("{CORS_ALLOWED_ORIGIN} not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    }

    info!(origins = %raw, "CORS restricted to configured origins");
    Ok(create_cors_layer(origins))
}

fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid {CORS_ALLOWED_ORIGIN} value '{s}': {e}"),
                )
            })
        })
        .collect()
}
