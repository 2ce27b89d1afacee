//! Field rules for property payloads and the service's business rules.
//!
//! Payload rules are an ordered table of named predicates. Every rule runs and
//! every violation is collected, so a client sees all problems at once.
//! Business rules run in the service and stop at the first violation.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{PropertyError, PropertyResult};
use crate::models::{CreateProperty, PropertyDraft, PropertyInput, UpdateProperty};

pub const ADDRESS_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const BEDROOMS_MAX: i32 = 50;
pub const BATHROOMS_MAX: i32 = 20;

/// Smallest accepted rent price.
const MIN_POSITIVE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const SQUARE_METERS_MIN: f64 = 0.01;
const PRICE_INTEGER_DIGITS: u32 = 8;
const PRICE_FRACTION_DIGITS: u32 = 2;

/// A named predicate over a draft. `check` returns `true` when satisfied.
pub struct Rule {
    /// Field name as it appears on the wire
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    pub check: fn(&PropertyDraft) -> bool,
}

/// A failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn address_present(d: &PropertyDraft) -> bool {
    d.address.as_deref().is_some_and(|a| !a.trim().is_empty())
}

fn address_length(d: &PropertyDraft) -> bool {
    d.address
        .as_deref()
        .is_none_or(|a| a.chars().count() <= ADDRESS_MAX_CHARS)
}

fn type_present(d: &PropertyDraft) -> bool {
    d.property_type.is_some()
}

fn bedrooms_min(d: &PropertyDraft) -> bool {
    d.bedrooms.is_none_or(|n| n >= 0)
}

fn bedrooms_max(d: &PropertyDraft) -> bool {
    d.bedrooms.is_none_or(|n| n <= BEDROOMS_MAX)
}

fn bathrooms_min(d: &PropertyDraft) -> bool {
    d.bathrooms.is_none_or(|n| n >= 0)
}

fn bathrooms_max(d: &PropertyDraft) -> bool {
    d.bathrooms.is_none_or(|n| n <= BATHROOMS_MAX)
}

fn square_meters_min(d: &PropertyDraft) -> bool {
    d.square_meters.is_none_or(|m| m >= SQUARE_METERS_MIN)
}

fn rent_price_present(d: &PropertyDraft) -> bool {
    d.rent_price.is_some()
}

fn rent_price_min(d: &PropertyDraft) -> bool {
    d.rent_price.is_none_or(|p| p >= MIN_POSITIVE)
}

fn rent_price_digits(d: &PropertyDraft) -> bool {
    d.rent_price.is_none_or(has_money_shape)
}

fn status_present(d: &PropertyDraft) -> bool {
    d.status.is_some()
}

fn description_length(d: &PropertyDraft) -> bool {
    d.description
        .as_deref()
        .is_none_or(|s| s.chars().count() <= DESCRIPTION_MAX_CHARS)
}

/// At most 8 integer digits and 2 fraction digits; trailing zeros don't count.
fn has_money_shape(price: Decimal) -> bool {
    let normalized = price.normalize();
    let integer_part = normalized.abs().trunc();
    normalized.scale() <= PRICE_FRACTION_DIGITS
        && integer_part < Decimal::from(10u64.pow(PRICE_INTEGER_DIGITS))
}

const fn rule(
    field: &'static str,
    code: &'static str,
    message: &'static str,
    check: fn(&PropertyDraft) -> bool,
) -> Rule {
    Rule {
        field,
        code,
        message,
        check,
    }
}

/// Rules shared by creation and replacement payloads, in reporting order.
pub static FIELD_RULES: &[Rule] = &[
    rule("address", "required", "Address is required", address_present),
    rule(
        "address",
        "length",
        "Address must not exceed 255 characters",
        address_length,
    ),
    rule("type", "required", "Property type is required", type_present),
    rule("bedrooms", "range", "Bedrooms must be 0 or greater", bedrooms_min),
    rule("bedrooms", "range", "Bedrooms must not exceed 50", bedrooms_max),
    rule("bathrooms", "range", "Bathrooms must be 0 or greater", bathrooms_min),
    rule("bathrooms", "range", "Bathrooms must not exceed 20", bathrooms_max),
    rule(
        "squareMeters",
        "range",
        "Square meters must be greater than 0",
        square_meters_min,
    ),
    rule("rentPrice", "required", "Rent price is required", rent_price_present),
    rule(
        "rentPrice",
        "range",
        "Rent price must be greater than 0",
        rent_price_min,
    ),
    rule(
        "rentPrice",
        "digits",
        "Rent price must have at most 8 integer digits and 2 decimal places",
        rent_price_digits,
    ),
    rule(
        "description",
        "length",
        "Description must not exceed 2000 characters",
        description_length,
    ),
];

/// Extra rules for a replacement payload.
pub static REPLACEMENT_RULES: &[Rule] =
    &[rule("status", "required", "Status is required", status_present)];

static NO_RULES: &[Rule] = &[];

/// Which payload is being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Create,
    Update,
}

impl Payload {
    pub fn rules(self) -> impl Iterator<Item = &'static Rule> {
        let extra = match self {
            Payload::Create => NO_RULES,
            Payload::Update => REPLACEMENT_RULES,
        };
        FIELD_RULES.iter().chain(extra)
    }
}

/// Run every rule and collect the failures in table order.
pub fn violations(draft: &PropertyDraft, payload: Payload) -> Vec<Violation> {
    payload
        .rules()
        .filter(|rule| !(rule.check)(draft))
        .map(|rule| Violation {
            field: rule.field,
            code: rule.code,
            message: rule.message,
        })
        .collect()
}

fn check(draft: &PropertyDraft, payload: Payload) -> Result<(), ValidationErrors> {
    let found = violations(draft, payload);
    if found.is_empty() {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();
    for v in found {
        errors.add(
            v.field,
            ValidationError::new(v.code).with_message(Cow::Borrowed(v.message)),
        );
    }
    Err(errors)
}

impl Validate for CreateProperty {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check(&PropertyDraft::from(self.clone()), Payload::Create)
    }
}

impl Validate for UpdateProperty {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check(&PropertyDraft::from(self.clone()), Payload::Update)
    }
}

/// Business rules applied by the service on create and update.
///
/// Stops at the first violation: price, then address, then type.
pub fn business_rules(draft: PropertyDraft) -> PropertyResult<PropertyInput> {
    let rent_price = match draft.rent_price {
        Some(price) if price > Decimal::ZERO => price,
        _ => {
            return Err(PropertyError::InvalidInput(
                "Rent price must be greater than zero".to_string(),
            ));
        }
    };

    let address = match draft.address {
        Some(address) if !address.trim().is_empty() => address,
        _ => return Err(PropertyError::InvalidInput("Address is required".to_string())),
    };

    let property_type = draft
        .property_type
        .ok_or_else(|| PropertyError::InvalidInput("Property type is required".to_string()))?;

    Ok(PropertyInput {
        address,
        property_type,
        bedrooms: draft.bedrooms,
        bathrooms: draft.bathrooms,
        square_meters: draft.square_meters,
        rent_price,
        status: draft.status,
        description: draft.description,
    })
}
