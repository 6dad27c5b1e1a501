use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use log::LevelFilter;
use tracing::info;

pub use configs::DatabaseConfig;

/// Pooled connection using the `[database]` settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging)
        .sqlx_logging_level(LevelFilter::Debug);
    let db = Database::connect(opts).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}

/// Single-connection in-memory SQLite; every pooled connection would otherwise get its own database.
pub async fn connect_sqlite_memory() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        idle_timeout_secs: 24 * 3600,
        max_lifetime_secs: 24 * 3600,
        ..DatabaseConfig::default()
    };
    connect_with_config(&cfg).await
}
