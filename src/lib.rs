pub mod booking;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};

pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

// `DatabaseConnection` derives `Clone` only when the `mock` feature is NOT
// enabled (sea-orm gates the derive behind `not(feature = "mock")`). The
// dev-dependency enables `mock` for read-path tests, which unifies into the
// library build during `cargo test` and would make `#[derive(Clone)]` on
// `AppState` fail. Axum requires the shared state to be `Clone`, so we provide
// the same element-wise clone the derive would generate; every variant's inner
// value is itself `Clone`. Variants are cfg-gated to exactly mirror the enum.
impl Clone for AppState {
    fn clone(&self) -> Self {
        use sea_orm::DatabaseConnection as Dc;
        let db = match &self.db {
            Dc::SqlxPostgresPoolConnection(c) => Dc::SqlxPostgresPoolConnection(c.clone()),
            // `mock` is a crate feature wired to `sea-orm/mock` and enabled only
            // under `cargo test` (via the self dev-dependency), exactly when the
            // `MockDatabaseConnection` variant exists in the enum.
            #[cfg(feature = "mock")]
            Dc::MockDatabaseConnection(c) => Dc::MockDatabaseConnection(c.clone()),
            Dc::Disconnected => Dc::Disconnected,
        };
        Self {
            db,
            config: self.config.clone(),
        }
    }
}
