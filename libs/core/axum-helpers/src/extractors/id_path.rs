//! Positive integer path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extracts a single `{id}` path segment as a positive `i64`.
///
/// Non-numeric, zero and negative values are rejected with `400 INVALID_ID`
/// before the handler runs.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::InvalidId(format!(
                "ID must be a positive integer, got '{raw}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/items/{id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        )
    }

    async fn status_for(path: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_positive_id_accepted() {
        assert_eq!(status_for("/items/42").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_ids_rejected() {
        for path in ["/items/0", "/items/-3", "/items/abc", "/items/1.5"] {
            assert_eq!(status_for(path).await, StatusCode::BAD_REQUEST, "{path}");
        }
    }
}
