pub mod handlers;
pub mod responses;

pub use handlers::{error_path, not_found};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message shown to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Error categories exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    BadRequest,
    Internal,
}

impl ErrorKind {
    /// HTTP status and category label for this kind.
    pub const fn descriptor(self) -> (StatusCode, &'static str) {
        match self {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            ErrorKind::ValidationFailed => (StatusCode::BAD_REQUEST, "Validation Failed"),
            ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, "Bad Request"),
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }

    pub const fn status(self) -> StatusCode {
        self.descriptor().0
    }

    pub const fn label(self) -> &'static str {
        self.descriptor().1
    }
}

/// Uniform error envelope returned for every failed request.
///
/// `path` is left empty by [`AppError::into_response`] and filled in by the
/// [`error_path`] middleware, which knows the path the client requested.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 400,
///   "error": "Validation Failed",
///   "message": "Invalid input data",
///   "path": "/api/v1/properties",
///   "errors": ["rentPrice: Rent price must be greater than 0"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error category label
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Request path as sent by the client
    pub path: String,
    /// Field-level violations, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let (status, label) = kind.descriptor();
        Self {
            status: status.as_u16(),
            error: label.to_string(),
            message: message.into(),
            path: String::new(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Each entry is already formatted as `"<field>: <message>"`.
    #[error("Validation failed: {0:?}")]
    ValidationFailed(Vec<String>),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    fn into_envelope(self) -> ErrorResponse {
        let kind = self.kind();
        match self {
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                ErrorResponse::new(kind, message)
            }
            AppError::ValidationFailed(errors) => {
                tracing::info!(?errors, "Validation failed");
                ErrorResponse::new(kind, "Invalid input data").with_errors(errors)
            }
            AppError::BadRequest(message) => {
                tracing::info!("Bad request: {}", message);
                ErrorResponse::new(kind, message)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal server error: {}", detail);
                ErrorResponse::new(kind, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = self.into_envelope();
        let status =
            StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(&envelope)).into_response();
        response.extensions_mut().insert(envelope);
        response
    }
}

/// Flattens validator errors into sorted `"<field>: <message>"` entries.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err.message.as_deref().unwrap_or(err.code.as_ref());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        messages.sort();
        AppError::ValidationFailed(messages)
    }
}

/// Prefix axum puts before a body that parsed but did not fit the target type.
const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Well-formed JSON with a wrong value is a validation failure on that field.
/// Anything else (bad syntax, wrong content type) stays a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::ValidationFailed(vec![field_violation(&err.body_text())])
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// `"<field>: <message>"` without axum's prefix or serde's position suffix.
fn field_violation(body_text: &str) -> String {
    let detail = body_text.strip_prefix(JSON_DATA_PREFIX).unwrap_or(body_text);
    let detail = match detail.rfind(" at line ") {
        Some(idx) => &detail[..idx],
        None => detail,
    };
    detail.to_string()
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
