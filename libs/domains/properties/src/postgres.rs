use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{PropertyError, PropertyResult},
    models::{Property, PropertyInput, PropertyStatus, PropertyType},
    repository::PropertyRepository,
};

pub struct PgPropertyRepository {
    db: DatabaseConnection,
}

impl PgPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn all_matching(
        &self,
        query: sea_orm::Select<entity::Entity>,
    ) -> PropertyResult<Vec<Property>> {
        let models = query.all(&self.db).await.map_err(PropertyError::database)?;
        Ok(models.into_iter().map(Property::from).collect())
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with its wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn create(&self, input: PropertyInput) -> PropertyResult<Property> {
        let active_model: entity::ActiveModel = Property::new(input).into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(PropertyError::database)?;

        tracing::info!(property_id = %model.id, "Created property");
        Ok(model.into())
    }

    async fn save(&self, property: Property) -> PropertyResult<Property> {
        let id = property.id;
        let txn = self.db.begin().await.map_err(PropertyError::database)?;

        let existing = entity::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(PropertyError::database)?;

        let model = match existing {
            Some(_) => entity::ActiveModel::for_update(property).update(&txn).await,
            None => entity::ActiveModel::from(property).insert(&txn).await,
        }
        .map_err(PropertyError::database)?;

        txn.commit().await.map_err(PropertyError::database)?;

        tracing::info!(property_id = %id, "Saved property");
        Ok(model.into())
    }

    async fn update(&self, property: Property) -> PropertyResult<Option<Property>> {
        let id = property.id;

        match entity::ActiveModel::for_update(property)
            .update(&self.db)
            .await
        {
            Ok(model) => {
                tracing::info!(property_id = %id, "Updated property");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(PropertyError::database(e)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(PropertyError::database)?;

        Ok(model.map(Property::from))
    }

    async fn find_all(&self) -> PropertyResult<Vec<Property>> {
        self.all_matching(entity::Entity::find()).await
    }

    async fn find_by_status(&self, status: PropertyStatus) -> PropertyResult<Vec<Property>> {
        self.all_matching(entity::Entity::find().filter(entity::Column::Status.eq(status)))
            .await
    }

    async fn find_by_type(&self, property_type: PropertyType) -> PropertyResult<Vec<Property>> {
        self.all_matching(
            entity::Entity::find().filter(entity::Column::PropertyType.eq(property_type)),
        )
        .await
    }

    async fn find_by_status_and_type(
        &self,
        status: PropertyStatus,
        property_type: PropertyType,
    ) -> PropertyResult<Vec<Property>> {
        self.all_matching(
            entity::Entity::find()
                .filter(entity::Column::Status.eq(status))
                .filter(entity::Column::PropertyType.eq(property_type)),
        )
        .await
    }

    async fn find_by_address_containing(&self, needle: &str) -> PropertyResult<Vec<Property>> {
        let pattern = contains_pattern(needle);
        self.all_matching(
            entity::Entity::find().filter(Expr::cust_with_values("address ILIKE $1", [pattern])),
        )
        .await
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> PropertyResult<Vec<Property>> {
        self.all_matching(
            entity::Entity::find()
                .filter(entity::Column::RentPrice.between(min, max))
                .order_by_asc(entity::Column::RentPrice),
        )
        .await
    }

    async fn find_by_status_ordered_by_price(
        &self,
        status: PropertyStatus,
    ) -> PropertyResult<Vec<Property>> {
        self.all_matching(
            entity::Entity::find()
                .filter(entity::Column::Status.eq(status))
                .order_by_asc(entity::Column::RentPrice),
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> PropertyResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(PropertyError::database)?;

        if result.rows_affected > 0 {
            tracing::info!(property_id = %id, "Deleted property");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
