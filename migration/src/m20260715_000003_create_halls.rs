use sea_orm_migration::{prelude::*, schema::*};

use super::m20260715_000002_create_theaters::Theater;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hall::Table)
                    .if_not_exists()
                    .col(pk_auto(Hall::Id))
                    .col(integer(Hall::TheaterId).not_null())
                    .col(string_len(Hall::Name, 100).not_null())
                    .col(integer(Hall::TotalRows).not_null())
                    .col(
                        timestamp_with_time_zone(Hall::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hall_theater")
                            .from(Hall::Table, Hall::TheaterId)
                            .to(Theater::Table, Theater::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hall::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Hall {
    Table,
    Id,
    TheaterId,
    Name,
    TotalRows,
    CreatedAt,
}
