use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Rentals API",
        version = "0.1.0",
        description = "API for managing rental property listings"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = crate::api::PROPERTIES_PATH, api = domain_properties::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
