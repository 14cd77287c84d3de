use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the Postgres connection pool shared by all repositories
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open the pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", Self::redacted_url(url)?);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    /// Connection string with the password stripped, for logging
    fn redacted_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
