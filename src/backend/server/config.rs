/**
 * Database Configuration
 *
 * This module loads the optional PostgreSQL pool.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. When no
 * pool can be created the server falls back to the in-memory room store.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Database configuration result
///
/// `None` when no database is configured or reachable.
pub type DatabaseConfig = Option<PgPool>;

/// Connect to PostgreSQL and run pending migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the pool is connected and migrated
/// - `None` if `database_url` is `None`, or connecting or migrating fails
pub async fn load_database(database_url: Option<&str>, max_connections: u32) -> DatabaseConfig {
    let database_url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Rooms will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Rooms will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        // A store without its tables would fail every call
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Rooms will be kept in memory.");
        return None;
    }
    tracing::info!("Database migrations completed successfully");

    Some(pool)
}
