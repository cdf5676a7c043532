pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1006,
///   "error": "NOT_FOUND",
///   "message": "Product with ID 7 not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation failures, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Errors that handlers return; each variant knows its status and error code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Storage failure; the detail is logged, never sent to the client
    #[error("Database error: {0}")]
    Database(String),

    #[error("Document generation error: {0}")]
    DocumentGeneration(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::QueryExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::InvalidId(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::DocumentGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::InvalidId(_) => ErrorCode::InvalidId,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DocumentGeneration(_) => ErrorCode::DocumentGeneration,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {}", e);
                (e.body_text(), None)
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "Query extraction error: {}", e);
                (e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                (
                    code.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::Database(detail) => {
                tracing::error!(error_code = code.code(), "Database error: {}", detail);
                (code.default_message().to_string(), None)
            }
            AppError::DocumentGeneration(detail) => {
                tracing::error!(
                    error_code = code.code(),
                    "Document generation error: {}",
                    detail
                );
                (code.default_message().to_string(), None)
            }
            AppError::InvalidId(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "{}: {}", code, msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Field name to `[{code, message, params}]`, ordered by field name.
///
/// Struct-level checks appear under `__all__`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    json!({
                        "code": err.code,
                        "message": err.message.clone().unwrap_or_else(|| err.code.clone()),
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(fields)
}

/// Build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
