use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20260715_000003_create_halls::Hall;
use super::m20260715_000005_create_movies::Movie;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ShowStatus::Enum)
                    .values([ShowStatus::Active, ShowStatus::Cancelled, ShowStatus::Completed])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Show::Table)
                    .if_not_exists()
                    .col(pk_auto(Show::Id))
                    .col(integer(Show::MovieId).not_null())
                    .col(integer(Show::HallId).not_null())
                    .col(date(Show::ShowDate).not_null())
                    .col(time(Show::StartTime).not_null())
                    .col(time(Show::EndTime).not_null())
                    .col(double(Show::PriceMultiplier).not_null().default(1.0))
                    .col(
                        ColumnDef::new(Show::Status)
                            .custom(ShowStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Show::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_movie")
                            .from(Show::Table, Show::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_hall")
                            .from(Show::Table, Show::HallId)
                            .to(Hall::Table, Hall::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Alternative search walks a movie's upcoming shows
        manager
            .create_index(
                Index::create()
                    .name("idx_show_movie_date")
                    .table(Show::Table)
                    .col(Show::MovieId)
                    .col(Show::ShowDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Show::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ShowStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Show {
    Table,
    Id,
    MovieId,
    HallId,
    ShowDate,
    StartTime,
    EndTime,
    PriceMultiplier,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ShowStatus {
    #[sea_orm(iden = "show_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "completed")]
    Completed,
}
