//! Integration tests for Properties domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Enum and decimal columns round-trip through the database
//! - Upserts never rewrite `created_at`
//! - Updates never bring back a deleted row
//! - ILIKE search treats wildcards literally
//! - Price queries are inclusive and ordered
//!
//! Run with `cargo test -- --ignored` on a machine with Docker.

use domain_properties::*;
use rust_decimal::{Decimal, dec};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn input(address: String, property_type: PropertyType, rent_price: Decimal) -> PropertyInput {
    PropertyInput {
        address,
        property_type,
        bedrooms: Some(2),
        bathrooms: Some(1),
        square_meters: Some(64.5),
        rent_price,
        status: None,
        description: Some("Integration fixture".to_string()),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_property() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_find");

    let created = repo
        .create(input(
            builder.address("1A"),
            PropertyType::Apartment,
            dec!(1500.00),
        ))
        .await
        .unwrap();

    assert_eq!(created.status, PropertyStatus::Available);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.find_by_id(created.id).await.unwrap();
    let fetched = assert_some(fetched, "property should exist");

    assert_uuid_eq(fetched.id, created.id, "fetched property id");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_updates_without_touching_created_at() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_update");

    let created = repo
        .create(input(builder.address("2B"), PropertyType::House, dec!(2100)))
        .await
        .unwrap();

    let mut changed = created.clone().mark_as_rented();
    changed.created_at = changed.updated_at + chrono::TimeDelta::days(30);
    let saved = repo.save(changed).await.unwrap();

    assert_eq!(saved.created_at, created.created_at);
    assert_eq!(saved.status, PropertyStatus::Rented);
    assert!(saved.updated_at > created.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_inserts_unknown_id() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_insert");

    let property = Property::new(input(builder.address("3C"), PropertyType::Studio, dec!(700)));
    let saved = repo.save(property.clone()).await.unwrap();

    assert_eq!(saved, property);
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_of_deleted_row_reports_missing() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_deleted");

    let created = repo
        .create(input(builder.address("4D"), PropertyType::Condo, dec!(1250)))
        .await
        .unwrap();
    assert!(repo.delete(created.id).await.unwrap());

    let updated = repo.update(created.clone().mark_as_rented()).await.unwrap();

    assert!(updated.is_none());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_filters_by_status_and_type() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("status_and_type");

    let house = repo
        .create(input(builder.address("h1"), PropertyType::House, dec!(1800)))
        .await
        .unwrap();
    repo.create(input(builder.address("h2"), PropertyType::House, dec!(1900)))
        .await
        .unwrap();
    repo.create(input(builder.address("c1"), PropertyType::Condo, dec!(1400)))
        .await
        .unwrap();
    repo.save(house.clone().mark_as_rented()).await.unwrap();

    let houses = repo.find_by_type(PropertyType::House).await.unwrap();
    assert_eq!(houses.len(), 2);

    let rented = repo.find_by_status(PropertyStatus::Rented).await.unwrap();
    assert_eq!(rented.len(), 1);
    assert_uuid_eq(rented[0].id, house.id, "rented house");

    let available_houses = repo
        .find_by_status_and_type(PropertyStatus::Available, PropertyType::House)
        .await
        .unwrap();
    assert_eq!(available_houses.len(), 1);
    assert_eq!(available_houses[0].address, builder.address("h2"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_address_search_is_case_insensitive_and_literal() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("address_search");

    repo.create(input(builder.address("100%"), PropertyType::Condo, dec!(1000)))
        .await
        .unwrap();
    repo.create(input(builder.address("1000"), PropertyType::Condo, dec!(1000)))
        .await
        .unwrap();

    let marker = builder.marker().to_uppercase();
    let found = repo.find_by_address_containing(&marker).await.unwrap();
    assert_eq!(found.len(), 2);

    let literal = repo.find_by_address_containing("Unit 100%").await.unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].address, builder.address("100%"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_price_range_is_inclusive_and_ascending() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("price_range");

    for (unit, price) in [
        ("a", dec!(2000)),
        ("b", dec!(999.99)),
        ("c", dec!(1000)),
        ("d", dec!(1250.50)),
        ("e", dec!(2000.01)),
    ] {
        repo.create(input(builder.address(unit), PropertyType::Apartment, price))
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

    assert_eq!(prices, vec![dec!(1000), dec!(1250.50), dec!(2000)]);

    let available: Vec<Decimal> = repo
        .find_by_status_ordered_by_price(PropertyStatus::Available)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.rent_price)
        .collect();
    assert_eq!(available.len(), 5);
    assert_ascending(&available, "available prices");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_property() {
    let db = TestDatabase::new().await;
    let repo = PgPropertyRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo
        .create(input(builder.address("gone"), PropertyType::Townhouse, dec!(1600)))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_update_round_trip() {
    let db = TestDatabase::new().await;
    let service = PropertyService::new(PgPropertyRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_update");

    let created = service
        .create(PropertyDraft {
            address: Some(builder.address("old")),
            property_type: Some(PropertyType::House),
            rent_price: Some(dec!(1750)),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            PropertyDraft {
                address: Some(builder.address("new")),
                property_type: Some(PropertyType::Commercial),
                rent_price: Some(dec!(4999.99)),
                status: Some(PropertyStatus::Unavailable),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let fetched = service.find_by_id(created.id).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.created_at, created.created_at);
    assert_eq!(fetched.rent_price, dec!(4999.99));
    assert_eq!(fetched.status, PropertyStatus::Unavailable);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_missing_ids_are_not_found() {
    let db = TestDatabase::new().await;
    let service = PropertyService::new(PgPropertyRepository::new(db.connection()));
    let missing = Uuid::now_v7();

    assert!(matches!(
        service.find_by_id(missing).await,
        Err(PropertyError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(missing).await,
        Err(PropertyError::NotFound(_))
    ));
    assert!(matches!(
        service.mark_rented(missing).await,
        Err(PropertyError::NotFound(_))
    ));
}
