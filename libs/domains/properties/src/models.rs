use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Structural category of a property
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    #[sea_orm(string_value = "APARTMENT")]
    Apartment,
    #[sea_orm(string_value = "HOUSE")]
    House,
    #[sea_orm(string_value = "STUDIO")]
    Studio,
    #[sea_orm(string_value = "CONDO")]
    Condo,
    #[sea_orm(string_value = "TOWNHOUSE")]
    Townhouse,
    #[sea_orm(string_value = "COMMERCIAL")]
    Commercial,
}

/// Lifecycle state of a listing
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    /// Open for new tenants
    #[default]
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    /// Currently let
    #[sea_orm(string_value = "RENTED")]
    Rented,
    /// Temporarily off the market for repairs
    #[sea_orm(string_value = "MAINTENANCE")]
    Maintenance,
    /// Withdrawn by the owner
    #[sea_orm(string_value = "UNAVAILABLE")]
    Unavailable,
}

/// A stored property record
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub address: String,
    pub property_type: PropertyType,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub rent_price: Decimal,
    pub status: PropertyStatus,
    pub description: Option<String>,
    /// Fixed at insert
    pub created_at: DateTime<Utc>,
    /// Strictly increases on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated candidate built from a create or update request.
///
/// Every field is optional so that missing values can be reported by the
/// validation rules instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub address: Option<String>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub rent_price: Option<Decimal>,
    pub status: Option<PropertyStatus>,
    pub description: Option<String>,
}

/// Candidate that passed the business rules; input to repository `create`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInput {
    pub address: String,
    pub property_type: PropertyType,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub rent_price: Decimal,
    /// `None` means [`PropertyStatus::Available`] on create
    pub status: Option<PropertyStatus>,
    pub description: Option<String>,
}

/// Request body for creating a property
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    #[schema(example = "123 Main Street")]
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    #[schema(example = 1500.00)]
    pub rent_price: Option<Decimal>,
    /// Defaults to AVAILABLE
    pub status: Option<PropertyStatus>,
    pub description: Option<String>,
}

/// Request body for replacing a property; `status` is mandatory
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub rent_price: Option<Decimal>,
    pub status: Option<PropertyStatus>,
    pub description: Option<String>,
}

/// External representation of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: Uuid,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub rent_price: Decimal,
    pub status: PropertyStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query filters for listing properties
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PropertyStatus>,
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub property_type: Option<PropertyType>,
    /// Inclusive lower bound on rent price
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on rent price
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
}

/// Parses a query value, treating `?key=` like an absent key.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid value `{}`: {}", raw, e))),
        _ => Ok(None),
    }
}

/// Query for the address search endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressSearch {
    /// Case-insensitive substring of the address
    pub address: String,
}

/// Upper price bound used when only `minPrice` is given.
pub const UNBOUNDED_MAX_PRICE: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 0);

impl PropertyFilter {
    /// Inclusive price bounds, if either one was supplied.
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        if self.min_price.is_none() && self.max_price.is_none() {
            return None;
        }
        Some((
            self.min_price.unwrap_or(Decimal::ZERO),
            self.max_price.unwrap_or(UNBOUNDED_MAX_PRICE),
        ))
    }
}

/// Current time at the precision the database stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` after `previous`, never equal to it.
fn touched(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

impl Property {
    /// Build a fresh record: new id, `created_at == updated_at`, status
    /// defaulting to AVAILABLE.
    pub fn new(input: PropertyInput) -> Self {
        let now = now();
        Self {
            id: Uuid::now_v7(),
            address: input.address,
            property_type: input.property_type,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            square_meters: input.square_meters,
            rent_price: input.rent_price,
            status: input.status.unwrap_or_default(),
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == PropertyStatus::Available
    }

    /// Full replacement of every mutable field. `id` and `created_at` are kept.
    pub fn replaced_with(self, input: PropertyInput, status: PropertyStatus) -> Self {
        Self {
            id: self.id,
            address: input.address,
            property_type: input.property_type,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            square_meters: input.square_meters,
            rent_price: input.rent_price,
            status,
            description: input.description,
            created_at: self.created_at,
            updated_at: touched(self.updated_at),
        }
    }

    pub fn mark_as_rented(self) -> Self {
        self.with_status(PropertyStatus::Rented)
    }

    pub fn mark_as_available(self) -> Self {
        self.with_status(PropertyStatus::Available)
    }

    fn with_status(self, status: PropertyStatus) -> Self {
        let updated_at = touched(self.updated_at);
        Self {
            status,
            updated_at,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use std::str::FromStr;

    fn input() -> PropertyInput {
        PropertyInput {
            address: "123 Main Street".to_string(),
            property_type: PropertyType::Apartment,
            bedrooms: Some(2),
            bathrooms: Some(1),
            square_meters: Some(72.5),
            rent_price: dec!(1500.00),
            status: None,
            description: None,
        }
    }

    #[test]
    fn test_new_property_defaults() {
        let property = Property::new(input());
        assert_eq!(property.status, PropertyStatus::Available);
        assert_eq!(property.created_at, property.updated_at);
        assert!(property.is_available());
    }

    #[test]
    fn test_replaced_with_keeps_identity() {
        let original = Property::new(input());
        let replacement = PropertyInput {
            address: "9 Harbour Road".to_string(),
            property_type: PropertyType::House,
            bedrooms: None,
            bathrooms: None,
            square_meters: None,
            rent_price: dec!(2100),
            status: None,
            description: Some("Sea view".to_string()),
        };

        let updated = original
            .clone()
            .replaced_with(replacement, PropertyStatus::Maintenance);

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.address, "9 Harbour Road");
        assert_eq!(updated.property_type, PropertyType::House);
        assert_eq!(updated.bedrooms, None);
        assert_eq!(updated.status, PropertyStatus::Maintenance);
    }

    #[test]
    fn test_status_transitions_advance_updated_at() {
        let property = Property::new(input());
        let rented = property.clone().mark_as_rented();
        assert_eq!(rented.status, PropertyStatus::Rented);
        assert!(!rented.is_available());
        assert!(rented.updated_at > property.updated_at);

        let vacated = rented.clone().mark_as_available();
        assert!(vacated.is_available());
        assert!(vacated.updated_at > rented.updated_at);
    }

    #[test]
    fn test_touched_never_repeats_a_timestamp() {
        let future = Utc::now() + TimeDelta::hours(1);
        assert_eq!(touched(future), future + TimeDelta::microseconds(1));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(PropertyType::Townhouse.to_string(), "TOWNHOUSE");
        assert_eq!(
            PropertyStatus::from_str("MAINTENANCE").unwrap(),
            PropertyStatus::Maintenance
        );
        assert_eq!(
            serde_json::to_value(PropertyType::Commercial).unwrap(),
            "COMMERCIAL"
        );
    }

    #[test]
    fn test_price_bounds_defaults() {
        let mut filter = PropertyFilter::default();
        assert_eq!(filter.price_bounds(), None);

        filter.min_price = Some(dec!(1000));
        assert_eq!(
            filter.price_bounds(),
            Some((dec!(1000), dec!(999999999)))
        );

        filter.min_price = None;
        filter.max_price = Some(dec!(2000));
        assert_eq!(filter.price_bounds(), Some((Decimal::ZERO, dec!(2000))));
    }

    #[test]
    fn test_filter_treats_blank_values_as_absent() {
        let filter: PropertyFilter = serde_json::from_value(serde_json::json!({
            "status": "",
            "type": "HOUSE",
            "minPrice": " ",
            "maxPrice": "2000"
        }))
        .unwrap();

        assert_eq!(filter.status, None);
        assert_eq!(filter.property_type, Some(PropertyType::House));
        assert_eq!(filter.price_bounds(), Some((Decimal::ZERO, dec!(2000))));

        let unknown = serde_json::from_value::<PropertyFilter>(serde_json::json!({"status": "SOLD"}));
        assert!(unknown.is_err());
    }

    #[test]
    fn test_create_request_accepts_string_or_number_price() {
        let from_number: CreateProperty =
            serde_json::from_str(r#"{"address":"1 A St","type":"HOUSE","rentPrice":1500.5}"#)
                .unwrap();
        let from_string: CreateProperty =
            serde_json::from_str(r#"{"address":"1 A St","type":"HOUSE","rentPrice":"1500.50"}"#)
                .unwrap();

        assert_eq!(from_number.rent_price, Some(dec!(1500.5)));
        assert_eq!(from_string.rent_price, Some(dec!(1500.50)));
        assert_eq!(from_number.property_type, Some(PropertyType::House));
    }
}
