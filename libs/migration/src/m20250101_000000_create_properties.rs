use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PropertyType::Enum)
                    .values(PropertyType::values())
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(PropertyStatus::Enum)
                    .values(PropertyStatus::values())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(pk_uuid(Properties::Id))
                    .col(string_len(Properties::Address, 255))
                    .col(
                        ColumnDef::new(Properties::Type)
                            .enumeration(PropertyType::Enum, PropertyType::values())
                            .not_null(),
                    )
                    .col(integer_null(Properties::Bedrooms))
                    .col(integer_null(Properties::Bathrooms))
                    .col(double_null(Properties::SquareMeters))
                    .col(decimal_len(Properties::RentPrice, 10, 2))
                    .col(
                        ColumnDef::new(Properties::Status)
                            .enumeration(PropertyStatus::Enum, PropertyStatus::values())
                            .not_null()
                            .default("AVAILABLE"),
                    )
                    .col(text_null(Properties::Description))
                    .col(
                        timestamp_with_time_zone(Properties::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Properties::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_status_rent_price")
                    .table(Properties::Table)
                    .col(Properties::Status)
                    .col(Properties::RentPrice)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_type")
                    .table(Properties::Table)
                    .col(Properties::Type)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_rent_price")
                    .table(Properties::Table)
                    .col(Properties::RentPrice)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PropertyStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PropertyType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Address,
    Type,
    Bedrooms,
    Bathrooms,
    SquareMeters,
    RentPrice,
    Status,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PropertyType {
    #[sea_orm(iden = "property_type")]
    Enum,
    #[sea_orm(iden = "APARTMENT")]
    Apartment,
    #[sea_orm(iden = "HOUSE")]
    House,
    #[sea_orm(iden = "STUDIO")]
    Studio,
    #[sea_orm(iden = "CONDO")]
    Condo,
    #[sea_orm(iden = "TOWNHOUSE")]
    Townhouse,
    #[sea_orm(iden = "COMMERCIAL")]
    Commercial,
}

impl PropertyType {
    fn values() -> [Self; 6] {
        [
            Self::Apartment,
            Self::House,
            Self::Studio,
            Self::Condo,
            Self::Townhouse,
            Self::Commercial,
        ]
    }
}

#[derive(DeriveIden)]
enum PropertyStatus {
    #[sea_orm(iden = "property_status")]
    Enum,
    #[sea_orm(iden = "AVAILABLE")]
    Available,
    #[sea_orm(iden = "RENTED")]
    Rented,
    #[sea_orm(iden = "MAINTENANCE")]
    Maintenance,
    #[sea_orm(iden = "UNAVAILABLE")]
    Unavailable,
}

impl PropertyStatus {
    fn values() -> [Self; 4] {
        [
            Self::Available,
            Self::Rented,
            Self::Maintenance,
            Self::Unavailable,
        ]
    }
}
