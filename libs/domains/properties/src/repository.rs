use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PropertyResult;
use crate::models::{Property, PropertyInput, PropertyStatus, PropertyType};

/// Repository trait for Property persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Insert a new record; storage assigns id and timestamps
    async fn create(&self, input: PropertyInput) -> PropertyResult<Property>;

    /// Upsert by id; `created_at` of an existing row is never overwritten
    async fn save(&self, property: Property) -> PropertyResult<Property>;

    /// Overwrite an existing row; `None` when the id no longer exists
    async fn update(&self, property: Property) -> PropertyResult<Option<Property>>;

    async fn find_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>>;

    async fn find_all(&self) -> PropertyResult<Vec<Property>>;

    async fn find_by_status(&self, status: PropertyStatus) -> PropertyResult<Vec<Property>>;

    async fn find_by_type(&self, property_type: PropertyType) -> PropertyResult<Vec<Property>>;

    async fn find_by_status_and_type(
        &self,
        status: PropertyStatus,
        property_type: PropertyType,
    ) -> PropertyResult<Vec<Property>>;

    /// Case-insensitive substring match; wildcard characters match literally
    async fn find_by_address_containing(&self, needle: &str) -> PropertyResult<Vec<Property>>;

    /// Inclusive bounds, ascending by price
    async fn find_by_price_range(&self, min: Decimal, max: Decimal)
    -> PropertyResult<Vec<Property>>;

    /// Ascending by price
    async fn find_by_status_ordered_by_price(
        &self,
        status: PropertyStatus,
    ) -> PropertyResult<Vec<Property>>;

    /// Hard delete; returns whether a record was removed
    async fn delete(&self, id: Uuid) -> PropertyResult<bool>;
}

/// In-memory implementation of PropertyRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryPropertyRepository {
    properties: Arc<RwLock<HashMap<Uuid, Property>>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self {
            properties: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn select(&self, predicate: impl Fn(&Property) -> bool) -> Vec<Property> {
        let properties = self.properties.read().await;
        properties
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

fn by_price(mut properties: Vec<Property>) -> Vec<Property> {
    properties.sort_by(|a, b| a.rent_price.cmp(&b.rent_price));
    properties
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn create(&self, input: PropertyInput) -> PropertyResult<Property> {
        let property = Property::new(input);
        self.properties
            .write()
            .await
            .insert(property.id, property.clone());

        tracing::info!(property_id = %property.id, "Created property");
        Ok(property)
    }

    async fn save(&self, property: Property) -> PropertyResult<Property> {
        let mut properties = self.properties.write().await;

        let saved = match properties.get(&property.id) {
            Some(existing) => Property {
                created_at: existing.created_at,
                ..property
            },
            None => property,
        };
        properties.insert(saved.id, saved.clone());

        tracing::info!(property_id = %saved.id, "Saved property");
        Ok(saved)
    }

    async fn update(&self, property: Property) -> PropertyResult<Option<Property>> {
        let mut properties = self.properties.write().await;

        let Some(existing) = properties.get_mut(&property.id) else {
            return Ok(None);
        };
        *existing = Property {
            created_at: existing.created_at,
            ..property
        };

        tracing::info!(property_id = %existing.id, "Updated property");
        Ok(Some(existing.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>> {
        let properties = self.properties.read().await;
        Ok(properties.get(&id).cloned())
    }

    async fn find_all(&self) -> PropertyResult<Vec<Property>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_status(&self, status: PropertyStatus) -> PropertyResult<Vec<Property>> {
        Ok(self.select(|p| p.status == status).await)
    }

    async fn find_by_type(&self, property_type: PropertyType) -> PropertyResult<Vec<Property>> {
        Ok(self.select(|p| p.property_type == property_type).await)
    }

    async fn find_by_status_and_type(
        &self,
        status: PropertyStatus,
        property_type: PropertyType,
    ) -> PropertyResult<Vec<Property>> {
        Ok(self
            .select(|p| p.status == status && p.property_type == property_type)
            .await)
    }

    async fn find_by_address_containing(&self, needle: &str) -> PropertyResult<Vec<Property>> {
        let needle = needle.to_lowercase();
        Ok(self
            .select(|p| p.address.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> PropertyResult<Vec<Property>> {
        let matching = self
            .select(|p| p.rent_price >= min && p.rent_price <= max)
            .await;
        Ok(by_price(matching))
    }

    async fn find_by_status_ordered_by_price(
        &self,
        status: PropertyStatus,
    ) -> PropertyResult<Vec<Property>> {
        Ok(by_price(self.select(|p| p.status == status).await))
    }

    async fn delete(&self, id: Uuid) -> PropertyResult<bool> {
        let mut properties = self.properties.write().await;

        if properties.remove(&id).is_some() {
            tracing::info!(property_id = %id, "Deleted property");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn input(address: &str, property_type: PropertyType, rent_price: Decimal) -> PropertyInput {
        PropertyInput {
            address: address.to_string(),
            property_type,
            bedrooms: None,
            bathrooms: None,
            square_meters: None,
            rent_price,
            status: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_property() {
        let repo = InMemoryPropertyRepository::new();

        let property = repo
            .create(input("123 Main Street", PropertyType::Apartment, dec!(1500)))
            .await
            .unwrap();
        assert_eq!(property.status, PropertyStatus::Available);
        assert_eq!(property.created_at, property.updated_at);

        let fetched = repo.find_by_id(property.id).await.unwrap();
        assert_eq!(fetched, Some(property));
    }

    #[tokio::test]
    async fn test_save_keeps_original_created_at() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo
            .create(input("1 Elm Row", PropertyType::House, dec!(900)))
            .await
            .unwrap();

        let mut tampered = property.clone().mark_as_rented();
        tampered.created_at = tampered.updated_at + chrono::TimeDelta::days(1);
        let saved = repo.save(tampered).await.unwrap();

        assert_eq!(saved.created_at, property.created_at);
        assert_eq!(saved.status, PropertyStatus::Rented);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_never_resurrects_deleted_row() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo
            .create(input("7 Quay Lane", PropertyType::Apartment, dec!(1300)))
            .await
            .unwrap();
        assert!(repo.delete(property.id).await.unwrap());

        let updated = repo.update(property.clone().mark_as_rented()).await.unwrap();

        assert!(updated.is_none());
        assert!(repo.find_by_id(property.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_original_created_at() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo
            .create(input("2 Harbour View", PropertyType::Condo, dec!(1750)))
            .await
            .unwrap();

        let mut changed = property.clone().mark_as_rented();
        changed.created_at = changed.updated_at + chrono::TimeDelta::days(1);
        let updated = repo.update(changed).await.unwrap().unwrap();

        assert_eq!(updated.created_at, property.created_at);
        assert_eq!(updated.status, PropertyStatus::Rented);
        assert_eq!(repo.find_by_id(property.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_address_search_is_case_insensitive() {
        let repo = InMemoryPropertyRepository::new();
        for address in ["12 Main Street", "MAIN SQUARE 4", "3 mainline Ave", "9 Side Road"] {
            repo.create(input(address, PropertyType::Studio, dec!(700)))
                .await
                .unwrap();
        }

        let found = repo.find_by_address_containing("main").await.unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.address.to_lowercase().contains("main")));
    }

    #[tokio::test]
    async fn test_price_queries_are_ascending_and_inclusive() {
        let repo = InMemoryPropertyRepository::new();
        for price in [dec!(2000), dec!(999.99), dec!(1000), dec!(1500), dec!(2000.01)] {
            repo.create(input("Price Lane", PropertyType::Condo, price))
                .await
                .unwrap();
        }

        let prices: Vec<Decimal> = repo
            .find_by_price_range(dec!(1000), dec!(2000))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.rent_price)
            .collect();
        assert_eq!(prices, vec![dec!(1000), dec!(1500), dec!(2000)]);

        let available = repo
            .find_by_status_ordered_by_price(PropertyStatus::Available)
            .await
            .unwrap();
        assert_eq!(available.len(), 5);
        assert!(available.windows(2).all(|w| w[0].rent_price <= w[1].rent_price));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo
            .create(input("5 Gone Street", PropertyType::Townhouse, dec!(1100)))
            .await
            .unwrap();

        assert!(repo.delete(property.id).await.unwrap());
        assert!(!repo.delete(property.id).await.unwrap());
        assert!(repo.find_by_id(property.id).await.unwrap().is_none());
    }
}
