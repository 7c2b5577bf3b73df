//! Database connection pool management.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Apply embedded migrations at startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_run_migrations() -> bool {
    true
}

impl DatabaseConfig {
    /// Configuration for the given connection string with default pool tuning.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Process-wide handle to the backing store.
///
/// The pool is opened lazily by the first call to [`Database::ensure_connected`]
/// and reused for the rest of the process lifetime. A failed attempt leaves
/// the handle unconnected, so the error reaches whichever operation needed the
/// connection and a later call tries again.
#[derive(Debug)]
pub struct Database {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Returns the shared pool, opening it on first use.
    pub async fn ensure_connected(&self) -> Result<&PgPool, sqlx::Error> {
        self.pool
            .get_or_try_init(|| async {
                if self.config.url.is_empty() {
                    return Err(sqlx::Error::Configuration(
                        "database connection string is not set".into(),
                    ));
                }

                let pool = create_pool(&self.config).await?;
                info!(
                    max_connections = self.config.max_connections,
                    "Database connection pool opened"
                );
                Ok(pool)
            })
            .await
    }

    /// Applies the embedded migrations, connecting first if needed.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        let pool = self.ensure_connected().await?;
        sqlx::migrate!("./src/migrations").run(pool).await
    }

    /// Returns true once a pool has been opened.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}
