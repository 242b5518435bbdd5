//! PostgreSQL pool lifecycle: opened once at startup, shared by every request, closed at shutdown.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::sql::create_items_table;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Open the pool. Fails if no connection can be established, which is fatal at startup.
pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    tracing::info!(max_connections = config.max_connections, "database connection opened");
    Ok(pool)
}

/// Create the items table if it does not exist yet.
pub async fn ensure_items_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(&create_items_table()).execute(pool).await?;
    Ok(())
}

/// Close every pooled connection. Waits for checked-out connections to be returned.
pub async fn close(pool: PgPool) {
    pool.close().await;
    tracing::info!("database connection closed");
}
