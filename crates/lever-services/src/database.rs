use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use lever_common::config::Config;

pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    tracing::info!(max_connections = config.database_max_connections, "Connecting to database");

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .sqlx_logging(false);

    Database::connect(options).await
}
