use crate::models::{Property, PropertyStatus, PropertyType};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Tag used for the properties endpoints in the OpenAPI document
pub const TAG: &str = "properties";

/// Sea-ORM Entity for the properties table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub address: String,
    #[sea_orm(column_name = "type")]
    pub property_type: PropertyType,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub rent_price: Decimal,
    pub status: PropertyStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Property
impl From<Model> for Property {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            property_type: model.property_type,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            square_meters: model.square_meters,
            rent_price: model.rent_price,
            status: model.status,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Full row for inserts
impl From<Property> for ActiveModel {
    fn from(property: Property) -> Self {
        let created_at = Set(property.created_at.into());
        ActiveModel {
            created_at,
            ..ActiveModel::for_update(property)
        }
    }
}

impl ActiveModel {
    /// Every column except `created_at`, which is never rewritten.
    pub fn for_update(property: Property) -> Self {
        ActiveModel {
            id: Set(property.id),
            address: Set(property.address),
            property_type: Set(property.property_type),
            bedrooms: Set(property.bedrooms),
            bathrooms: Set(property.bathrooms),
            square_meters: Set(property.square_meters),
            rent_price: Set(property.rent_price),
            status: Set(property.status),
            description: Set(property.description),
            created_at: NotSet,
            updated_at: Set(property.updated_at.into()),
        }
    }
}
