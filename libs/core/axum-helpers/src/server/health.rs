use axum::{Json, http::StatusCode};
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

/// A boxed dependency probe; `Err` carries a human-readable reason.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run probes concurrently and fold them into one response.
///
/// Body: `{"status": "healthy" | "unhealthy", "<name>": "connected" | "disconnected"}`,
/// plus `"error"` with the first failure reason. Any failure yields `503`.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![
///     ("database", Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) })),
/// ];
/// let (status, body) = run_health_checks(checks).await;
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<Value>) {
    let (names, futures): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut body = Map::new();
    let mut first_error: Option<String> = None;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                body.insert(name.to_string(), json!("connected"));
            }
            Err(e) => {
                tracing::error!(check = name, error = %e, "Health check failed");
                body.insert(name.to_string(), json!("disconnected"));
                first_error.get_or_insert(e);
            }
        }
    }

    let healthy = first_error.is_none();
    body.insert(
        "status".to_string(),
        json!(if healthy { "healthy" } else { "unhealthy" }),
    );
    if let Some(error) = first_error {
        body.insert("error".to_string(), json!(error));
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Value::Object(body)))
}
