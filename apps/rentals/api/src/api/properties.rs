use axum::Router;
use domain_properties::{PgPropertyRepository, PropertyService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgPropertyRepository::new(state.db.clone());
    let service = PropertyService::new(repository);
    handlers::router(service)
}
