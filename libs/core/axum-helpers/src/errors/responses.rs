//! Reusable OpenAPI response types for handler annotations.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "DATABASE_ERROR",
        "message": "A database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "price": [{
                "code": "range",
                "message": "price must be greater than 0",
                "params": {"exclusive_min": 0.0, "value": -1.0}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid identifier",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_ID",
        "message": "ID must be a positive integer, got 'abc'"
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "error": "NOT_FOUND",
        "message": "Product with ID 42 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
