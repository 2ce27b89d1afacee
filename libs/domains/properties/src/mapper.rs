//! Conversions between the wire shapes and the internal records.

use crate::models::{CreateProperty, Property, PropertyDraft, PropertyResponse, UpdateProperty};

impl From<CreateProperty> for PropertyDraft {
    fn from(request: CreateProperty) -> Self {
        Self {
            address: request.address,
            property_type: request.property_type,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            square_meters: request.square_meters,
            rent_price: request.rent_price,
            status: request.status,
            description: request.description,
        }
    }
}

impl From<UpdateProperty> for PropertyDraft {
    fn from(request: UpdateProperty) -> Self {
        Self {
            address: request.address,
            property_type: request.property_type,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            square_meters: request.square_meters,
            rent_price: request.rent_price,
            status: request.status,
            description: request.description,
        }
    }
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            address: property.address,
            property_type: property.property_type,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            square_meters: property.square_meters,
            rent_price: property.rent_price,
            status: property.status,
            description: property.description,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

/// Map a listing of records to responses, keeping order.
pub fn to_responses(properties: Vec<Property>) -> Vec<PropertyResponse> {
    properties.into_iter().map(PropertyResponse::from).collect()
}
