use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} not found")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Report generation failed: {0}")]
    Report(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DatabaseError> for ProductError {
    fn from(err: DatabaseError) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with ID {id} not found"))
            }
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Report(msg) => AppError::DocumentGeneration(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
