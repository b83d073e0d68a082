use sea_orm::DatabaseConnection;

use lever_common::config::Config;
use lever_migrator::{Migrator, MigratorTrait};

/// A fresh, migrated in-memory SQLite database. A single pooled connection
/// keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        ..Default::default()
    };

    let db = lever_services::database::connect(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
