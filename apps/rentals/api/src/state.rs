//! Application state management.
//!
//! The state is cloned into every handler that needs it. Clones are cheap:
//! the connection pool is reference-counted.

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
