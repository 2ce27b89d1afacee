//! Properties Domain
//!
//! Rental property listings: records, validation rules, persistence and the
//! HTTP surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, query → filter translation
//! └──────┬──────┘
//!        │  mapper (request → draft, record → response)
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, list policy, status transitions
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, drafts, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_properties::{
//!     handlers,
//!     repository::InMemoryPropertyRepository,
//!     service::PropertyService,
//! };
//!
//! let repository = InMemoryPropertyRepository::new();
//! let service = PropertyService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{PropertyError, PropertyResult};
pub use models::{
    CreateProperty, Property, PropertyDraft, PropertyFilter, PropertyInput, PropertyResponse,
    PropertyStatus, PropertyType, UpdateProperty,
};
pub use postgres::PgPropertyRepository;
pub use repository::{InMemoryPropertyRepository, PropertyRepository};
pub use service::PropertyService;
