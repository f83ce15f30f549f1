//! Database connection pool management.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;
use thiserror::Error;

/// Database connection parameters, assembled by the configuration loader.
///
/// `user`, `password`, `host`, and `port` are carried verbatim from the
/// environment for engines that need them; the embedded engine uses only
/// `name` as a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Engine identifier; the embedded `sqlite` engine is the default.
    pub engine: String,
    /// Database name; a file path for the embedded engine.
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub max_connections: u32,
}

/// Errors opening the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unsupported database engine: {0}")]
    UnsupportedEngine(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Creates a connection pool for the configured database.
///
/// Only the embedded `sqlite` engine is implemented; any other engine
/// identifier is rejected with a descriptive error rather than ignored.
/// Foreign keys are enabled per connection so that the page-reference
/// `ON DELETE` actions actually fire.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    if config.engine != "sqlite" {
        return Err(DbError::UnsupportedEngine(config.engine.clone()));
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.name)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            engine: "sqlite".to_string(),
            name: ":memory:".to_string(),
            user: String::new(),
            password: String::new(),
            host: String::new(),
            port: String::new(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_create_pool_sqlite_memory() {
        let pool = create_pool(&memory_config()).await.unwrap();
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_pool(&memory_config()).await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_unsupported_engine_rejected() {
        let config = DatabaseConfig {
            engine: "postgres".to_string(),
            ..memory_config()
        };
        let err = create_pool(&config).await.unwrap_err();
        assert!(matches!(err, DbError::UnsupportedEngine(ref e) if e == "postgres"));
    }
}
