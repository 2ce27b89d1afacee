//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "error": "Internal Server Error",
        "message": "An unexpected error occurred",
        "path": "/api/v1/properties"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Failed",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "error": "Validation Failed",
        "message": "Invalid input data",
        "path": "/api/v1/properties",
        "errors": [
            "address: Address is required",
            "rentPrice: Rent price must be greater than 0"
        ]
    })
)]
pub struct ValidationFailedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "error": "Bad Request",
        "message": "Invalid UUID: not-a-uuid",
        "path": "/api/v1/properties/not-a-uuid"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "error": "Not Found",
        "message": "Property with id 0190f5c2-7d1e-7c3a-9a55-1f0c2b3d4e5f not found",
        "path": "/api/v1/properties/0190f5c2-7d1e-7c3a-9a55-1f0c2b3d4e5f"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
