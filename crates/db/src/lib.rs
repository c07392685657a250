//! PostgreSQL persistence for pickup points, receptions, products and users.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgStore;

pub type DbPool = sqlx::PgPool;

/// Default pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
/// Default seconds to wait for a free pooled connection.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
/// Default server-side statement timeout in seconds.
const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 10;

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl DbConfig {
    /// Load database configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `DATABASE_URL`             | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS`       | no       | `20`    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`  | no       | `5`     |
    /// | `DB_STATEMENT_TIMEOUT_SECS`| no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or a numeric value does not parse.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let statement_timeout_secs: u64 = std::env::var("DB_STATEMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_STATEMENT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_STATEMENT_TIMEOUT_SECS must be a valid u64");

        Self {
            url,
            max_connections,
            acquire_timeout_secs,
            statement_timeout_secs,
        }
    }
}

/// Create a connection pool. Every connection carries a `statement_timeout`.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.url)?.options([(
        "statement_timeout",
        (config.statement_timeout_secs * 1000).to_string(),
    )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        statement_timeout_secs = config.statement_timeout_secs,
        "Database pool created"
    );
    Ok(pool)
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
