//! Error codes carried by every error response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error identifiers.
///
/// Integer ranges: 1000-1999 client errors, 2000-2999 storage errors,
/// 3000-3999 document generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body or query failed field validation
    ValidationError,
    /// Path identifier is not a positive integer
    InvalidId,
    /// Body is not valid JSON or does not match the expected shape
    InvalidJson,
    /// Query string could not be deserialized
    InvalidQuery,
    BadRequest,
    NotFound,
    /// Storage layer failure
    DatabaseError,
    /// PDF rendering failure
    DocumentGeneration,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DocumentGeneration => "DOCUMENT_GENERATION",
        }
    }

    /// Integer code used in logs
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidJson => 1003,
            Self::InvalidQuery => 1004,
            Self::BadRequest => 1005,
            Self::NotFound => 1006,
            Self::DatabaseError => 2001,
            Self::DocumentGeneration => 3001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid identifier",
            Self::InvalidJson => "Invalid JSON body",
            Self::InvalidQuery => "Invalid query parameters",
            Self::BadRequest => "Bad request",
            Self::NotFound => "Resource not found",
            Self::DatabaseError => "A database error occurred",
            Self::DocumentGeneration => "Failed to generate document",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
