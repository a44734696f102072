//! Database connection pool management
//!
//! Uses sqlx PgPool with fixed limits. The pool is built on first use and
//! memoized by [`ConnectionProvider`]; concurrent first callers wait on the
//! same initialization instead of building a second pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use super::DbError;
use crate::config::DbConfig;

/// Fixed pool parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            idle_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Where connection parameters come from
#[derive(Debug, Clone)]
enum ConfigSource {
    /// Resolved from `DB_*` variables when the pool is first needed
    Env,
    Fixed(DbConfig),
}

/// Lazily constructed, shared pool handle
#[derive(Debug)]
pub struct ConnectionProvider {
    source: ConfigSource,
    settings: PoolSettings,
    pool: OnceCell<PgPool>,
}

impl ConnectionProvider {
    /// Provider that reads `DB_*` variables on first use.
    pub fn from_env() -> Self {
        Self {
            source: ConfigSource::Env,
            settings: PoolSettings::default(),
            pool: OnceCell::new(),
        }
    }

    /// Provider with explicit configuration.
    pub fn with_config(config: DbConfig) -> Self {
        Self {
            source: ConfigSource::Fixed(config),
            settings: PoolSettings::default(),
            pool: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> PoolSettings {
        self.settings
    }

    /// True once a pool has been built.
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Get the pool, building it on the first call.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the first connection
    /// cannot be established. A failed attempt is not memoized.
    pub async fn get_connection(&self) -> Result<&PgPool, DbError> {
        self.pool.get_or_try_init(|| self.create_pool()).await
    }

    async fn create_pool(&self) -> Result<PgPool, DbError> {
        let config = match &self.source {
            ConfigSource::Env => DbConfig::from_env()?,
            ConfigSource::Fixed(config) => config.clone(),
        };

        if config.is_unverified_tls() {
            tracing::warn!(
                ssl_mode = ?config.ssl_mode,
                "database TLS certificate verification is disabled"
            );
        }

        let pool = create_pool_with_settings(&config, self.settings)
            .await
            .map_err(|e| {
                tracing::error!("Error while setting up database connection: {}", e);
                e
            })?;

        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = self.settings.max_connections,
            "database pool created"
        );
        Ok(pool)
    }
}

/// Create a PostgreSQL connection pool with explicit settings.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool_with_settings(
    config: &DbConfig,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(Some(settings.idle_timeout))
        .acquire_timeout(settings.connect_timeout)
        .connect_with(config.connect_options())
        .await
}
