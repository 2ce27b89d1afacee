use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Property with id {0} not found")]
    NotFound(Uuid),

    /// Business-rule violation detected by the service
    #[error("{0}")]
    InvalidInput(String),

    /// Storage failure; the detail is logged, never returned to clients
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PropertyResult<T> = Result<T, PropertyError>;

impl PropertyError {
    pub(crate) fn database(e: impl std::fmt::Display) -> Self {
        PropertyError::Internal(format!("Database error: {}", e))
    }
}

/// Convert PropertyError to AppError for standardized error responses
impl From<PropertyError> for AppError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound(_) => AppError::NotFound(err.to_string()),
            PropertyError::InvalidInput(msg) => AppError::BadRequest(msg),
            PropertyError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for PropertyError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message_names_the_id() {
        let id = Uuid::nil();
        let err = AppError::from(PropertyError::NotFound(id));
        assert!(matches!(
            err,
            AppError::NotFound(ref msg) if msg == "Property with id 00000000-0000-0000-0000-000000000000 not found"
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (PropertyError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                PropertyError::InvalidInput("Address is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PropertyError::Internal("pool closed".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
