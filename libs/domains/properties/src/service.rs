use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{PropertyError, PropertyResult};
use crate::models::{Property, PropertyDraft, PropertyFilter, PropertyStatus, PropertyType};
use crate::repository::PropertyRepository;
use crate::validation::business_rules;

/// Service layer for Property business logic
#[derive(Clone)]
pub struct PropertyService<R: PropertyRepository> {
    repository: Arc<R>,
}

impl<R: PropertyRepository> PropertyService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a property after checking the business rules
    pub async fn create(&self, draft: PropertyDraft) -> PropertyResult<Property> {
        let input = business_rules(draft)?;
        self.repository.create(input).await
    }

    /// Get a property by ID
    pub async fn find_by_id(&self, id: Uuid) -> PropertyResult<Property> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    pub async fn find_all(&self) -> PropertyResult<Vec<Property>> {
        self.repository.find_all().await
    }

    pub async fn find_by_status(&self, status: PropertyStatus) -> PropertyResult<Vec<Property>> {
        self.repository.find_by_status(status).await
    }

    pub async fn find_by_type(&self, property_type: PropertyType) -> PropertyResult<Vec<Property>> {
        self.repository.find_by_type(property_type).await
    }

    /// Case-insensitive address containment
    pub async fn search_by_address(&self, needle: &str) -> PropertyResult<Vec<Property>> {
        self.repository.find_by_address_containing(needle).await
    }

    /// Replace every mutable field of an existing property.
    ///
    /// Same rules as [`create`](Self::create), plus `status` is mandatory.
    pub async fn update(&self, id: Uuid, draft: PropertyDraft) -> PropertyResult<Property> {
        let existing = self.find_by_id(id).await?;

        let input = business_rules(draft)?;
        let status = input
            .status
            .ok_or_else(|| PropertyError::InvalidInput("Status is required".to_string()))?;

        self.repository
            .update(existing.replaced_with(input, status))
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Delete a property
    pub async fn delete(&self, id: Uuid) -> PropertyResult<()> {
        self.find_by_id(id).await?;

        if !self.repository.delete(id).await? {
            // Removed by a concurrent request between the lookup and the delete
            return Err(PropertyError::NotFound(id));
        }

        Ok(())
    }

    /// List with optional status/type filters and an inclusive price window
    pub async fn list(&self, filter: PropertyFilter) -> PropertyResult<Vec<Property>> {
        let mut properties = match (filter.status, filter.property_type) {
            (Some(status), Some(property_type)) => {
                self.repository
                    .find_by_status_and_type(status, property_type)
                    .await?
            }
            (Some(status), None) => self.repository.find_by_status(status).await?,
            (None, Some(property_type)) => self.repository.find_by_type(property_type).await?,
            (None, None) => self.repository.find_all().await?,
        };

        if let Some((min, max)) = filter.price_bounds() {
            properties.retain(|p| p.rent_price >= min && p.rent_price <= max);
        }

        Ok(properties)
    }

    /// Inclusive price range, cheapest first
    pub async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> PropertyResult<Vec<Property>> {
        self.repository.find_by_price_range(min, max).await
    }

    /// Available properties, cheapest first
    pub async fn list_available(&self) -> PropertyResult<Vec<Property>> {
        self.repository
            .find_by_status_ordered_by_price(PropertyStatus::Available)
            .await
    }

    /// Mark a property as rented; no-op if it already is
    pub async fn mark_rented(&self, id: Uuid) -> PropertyResult<Property> {
        let property = self.find_by_id(id).await?;

        if property.status == PropertyStatus::Rented {
            return Ok(property);
        }

        self.repository
            .update(property.mark_as_rented())
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Put a property back on the market; no-op if it already is
    pub async fn mark_available(&self, id: Uuid) -> PropertyResult<Property> {
        let property = self.find_by_id(id).await?;

        if property.is_available() {
            return Ok(property);
        }

        self.repository
            .update(property.mark_as_available())
            .await?
            .ok_or(PropertyError::NotFound(id))
    }
}
