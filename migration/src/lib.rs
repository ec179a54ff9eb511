pub use sea_orm_migration::prelude::*;

mod m20260715_000001_create_users;
mod m20260715_000002_create_theaters;
mod m20260715_000003_create_halls;
mod m20260715_000004_create_seats;
mod m20260715_000005_create_movies;
mod m20260715_000006_create_shows;
mod m20260715_000007_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_create_users::Migration),
            Box::new(m20260715_000002_create_theaters::Migration),
            Box::new(m20260715_000003_create_halls::Migration),
            Box::new(m20260715_000004_create_seats::Migration),
            Box::new(m20260715_000005_create_movies::Migration),
            Box::new(m20260715_000006_create_shows::Migration),
            Box::new(m20260715_000007_create_bookings::Migration),
        ]
    }
}
