use anyhow::bail;
use sea_orm_migration::sea_orm::{ConnectOptions, Database};

use lever_migrator::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let config = lever_common::config::Config::new()?;

    lever_common::observability::tracing::init_tracer(
        env!("CARGO_PKG_NAME").to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
        &config,
    )?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    log::info!("Running migration command `{}`", command);

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        other => bail!("unknown command `{other}`, expected one of: up, down, status"),
    }

    db.close().await?;
    lever_common::observability::tracing::shutdown_tracer();

    Ok(())
}
