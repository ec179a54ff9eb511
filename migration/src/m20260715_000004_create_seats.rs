use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20260715_000003_create_halls::Hall;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(SeatCategory::Enum)
                    .values([SeatCategory::Standard, SeatCategory::Premium])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seat::Table)
                    .if_not_exists()
                    .col(pk_auto(Seat::Id))
                    .col(integer(Seat::HallId).not_null())
                    .col(integer(Seat::RowNumber).not_null())
                    .col(integer(Seat::SeatNumber).not_null())
                    .col(
                        ColumnDef::new(Seat::Category)
                            .custom(SeatCategory::Enum)
                            .not_null(),
                    )
                    .col(boolean(Seat::IsAisle).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Seat::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seat_hall")
                            .from(Seat::Table, Seat::HallId)
                            .to(Hall::Table, Hall::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_seat_position")
                    .table(Seat::Table)
                    .col(Seat::HallId)
                    .col(Seat::RowNumber)
                    .col(Seat::SeatNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Seat::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(SeatCategory::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Seat {
    Table,
    Id,
    HallId,
    RowNumber,
    SeatNumber,
    Category,
    IsAisle,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SeatCategory {
    #[sea_orm(iden = "seat_category")]
    Enum,
    #[sea_orm(iden = "standard")]
    Standard,
    #[sea_orm(iden = "premium")]
    Premium,
}
