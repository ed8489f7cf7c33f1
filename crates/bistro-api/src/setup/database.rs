//! Database setup and initialization

use anyhow::{Context, Result};
use bistro_core::Config;
use sqlx::PgPool;

/// Connect and migrate. An unreachable database is not fatal: the pool is
/// replaced by a lazy one and requests touching the store fail until it is back.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");

    match bistro_db::connect(config).await {
        Ok(pool) => {
            tracing::info!(
                max_connections = config.db_max_connections,
                "Database connected successfully"
            );

            bistro_db::migrate(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(pool)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Database unreachable at startup, continuing in degraded mode"
            );
            bistro_db::connect_lazy(config).context("Invalid DATABASE_URL")
        }
    }
}
