use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Wraps `routes` with documentation UIs and cross-cutting middleware.
///
/// - OpenAPI JSON at `/api-docs/openapi.json`, served by Swagger UI (`/swagger-ui`),
///   ReDoc (`/redoc`), RapiDoc (`/rapidoc`) and Scalar (`/scalar`)
/// - `routes` mounted at the root, state already applied
/// - JSON 404 fallback
/// - request tracing, security headers, CORS (see [`cors_layer_from_env`]), compression
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` holds an unparsable origin.
pub fn create_router<T>(routes: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` bounded by `shutdown_timeout`.
///
/// ```ignore
/// let db_for_cleanup = db.clone();
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     let _ = db_for_cleanup.close().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal_watcher = coordinator.clone();
    let server_shutdown = coordinator.clone();
    let finisher = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    tokio::spawn(async move { signal_watcher.wait_for_signal().await });

    let cleanup_handle = tokio::spawn(async move {
        coordinator.wait_for_shutdown().await;
        info!(timeout = ?shutdown_timeout, "Running cleanup");
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed"),
            Err(_) => warn!(timeout = ?shutdown_timeout, "Cleanup timed out, forcing shutdown"),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { server_shutdown.wait_for_shutdown().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    // Unblocks cleanup when the server stopped on its own.
    finisher.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    fn router() -> Router {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            create_router::<EmptyDoc>(Router::new().route("/ping", get(|| async { "pong" })))
                .unwrap()
        })
    }

    #[tokio::test]
    async fn test_routes_mounted_at_root() {
        let response = router()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
