use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    QueryParams, UuidPath, ValidatedJson, error_path,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationFailedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity::TAG;
use crate::error::PropertyResult;
use crate::mapper::to_responses;
use crate::models::{
    AddressSearch, CreateProperty, PropertyFilter, PropertyResponse, PropertyStatus,
    PropertyType, UpdateProperty,
};
use crate::repository::PropertyRepository;
use crate::service::PropertyService;

/// OpenAPI documentation for Properties API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_properties,
        create_property,
        get_property,
        update_property,
        delete_property,
        search_properties,
        list_available,
        rent_property,
        vacate_property,
    ),
    components(
        schemas(
            PropertyResponse,
            CreateProperty,
            UpdateProperty,
            PropertyFilter,
            PropertyStatus,
            PropertyType
        ),
        responses(
            NotFoundResponse,
            ValidationFailedResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Rental property listings")
    )
)]
pub struct ApiDoc;

/// Create the property router with all HTTP endpoints
pub fn router<R: PropertyRepository + 'static>(service: PropertyService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/search", get(search_properties))
        .route("/available", get(list_available))
        .route(
            "/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
        .route("/{id}/rent", post(rent_property))
        .route("/{id}/vacate", post(vacate_property))
        .layer(middleware::from_fn(error_path))
        .with_state(shared_service)
}

/// List properties with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PropertyFilter),
    responses(
        (status = 200, description = "Matching properties", body = Vec<PropertyResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_properties<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    QueryParams(filter): QueryParams<PropertyFilter>,
) -> PropertyResult<Json<Vec<PropertyResponse>>> {
    let properties = service.list(filter).await?;
    Ok(Json(to_responses(properties)))
}

/// Create a new property
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Property created successfully", body = PropertyResponse,
            headers(("Location" = String, description = "URL of the new property"))),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<CreateProperty>,
) -> PropertyResult<impl IntoResponse> {
    let property = service.create(request.into()).await?;
    // Relative to wherever the router is mounted
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), property.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PropertyResponse::from(property)),
    ))
}

/// Get a property by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property found", body = PropertyResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    UuidPath(id): UuidPath,
) -> PropertyResult<Json<PropertyResponse>> {
    let property = service.find_by_id(id).await?;
    Ok(Json(property.into()))
}

/// Replace a property
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Property updated successfully", body = PropertyResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(request): ValidatedJson<UpdateProperty>,
) -> PropertyResult<Json<PropertyResponse>> {
    let property = service.update(id, request.into()).await?;
    Ok(Json(property.into()))
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 204, description = "Property deleted successfully"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    UuidPath(id): UuidPath,
) -> PropertyResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search properties by address substring (case-insensitive)
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(AddressSearch),
    responses(
        (status = 200, description = "Properties whose address contains the text", body = Vec<PropertyResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_properties<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    QueryParams(query): QueryParams<AddressSearch>,
) -> PropertyResult<Json<Vec<PropertyResponse>>> {
    let properties = service.search_by_address(&query.address).await?;
    Ok(Json(to_responses(properties)))
}

/// Available properties, cheapest first
#[utoipa::path(
    get,
    path = "/available",
    tag = TAG,
    responses(
        (status = 200, description = "Available properties by ascending rent", body = Vec<PropertyResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_available<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
) -> PropertyResult<Json<Vec<PropertyResponse>>> {
    let properties = service.list_available().await?;
    Ok(Json(to_responses(properties)))
}

/// Mark a property as rented
#[utoipa::path(
    post,
    path = "/{id}/rent",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property is rented", body = PropertyResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn rent_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    UuidPath(id): UuidPath,
) -> PropertyResult<Json<PropertyResponse>> {
    let property = service.mark_rented(id).await?;
    Ok(Json(property.into()))
}

/// Put a property back on the market
#[utoipa::path(
    post,
    path = "/{id}/vacate",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property is available", body = PropertyResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn vacate_property<R: PropertyRepository>(
    State(service): State<Arc<PropertyService<R>>>,
    UuidPath(id): UuidPath,
) -> PropertyResult<Json<PropertyResponse>> {
    let property = service.mark_available(id).await?;
    Ok(Json(property.into()))
}
