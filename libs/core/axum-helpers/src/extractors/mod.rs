//! Custom extractors for Axum handlers.
//!
//! Every rejection is reported as an [`AppError`](crate::errors::AppError) so
//! clients always receive the uniform error envelope.

pub mod query_params;
pub mod uuid_path;
pub mod validated_json;

pub use query_params::QueryParams;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
