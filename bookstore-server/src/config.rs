//! Database configuration from the environment
//!
//! Required: `DB_HOST`, `DB_DATABASE`, `DB_USER`, `DB_PASSWORD`, `DB_PORT`.
//! There are no defaults for these; a missing one fails pool construction.
//!
//! Optional:
//!   DB_SSL_MODE        libpq mode name (default: verify-full)
//!   DB_SSL_ROOT_CERT   PEM root certificate for verify-ca / verify-full

use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_DATABASE: &str = "DB_DATABASE";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_SSL_MODE: &str = "DB_SSL_MODE";
pub const DB_SSL_ROOT_CERT: &str = "DB_SSL_ROOT_CERT";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection parameters for the books database
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
    pub ssl_mode: PgSslMode,
    pub ssl_root_cert: Option<PathBuf>,
}

impl DbConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (tests inject a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let host = required(DB_HOST)?;
        let database = required(DB_DATABASE)?;
        let user = required(DB_USER)?;
        let password = required(DB_PASSWORD)?;
        let port = required(DB_PORT)?
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                var: DB_PORT,
                reason: e.to_string(),
            })?;

        let ssl_mode = match lookup(DB_SSL_MODE).filter(|v| !v.is_empty()) {
            Some(mode) => mode.parse::<PgSslMode>().map_err(|e| ConfigError::Invalid {
                var: DB_SSL_MODE,
                reason: e.to_string(),
            })?,
            None => PgSslMode::VerifyFull,
        };

        let ssl_root_cert = lookup(DB_SSL_ROOT_CERT)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            database,
            user,
            password,
            port,
            ssl_mode,
            ssl_root_cert,
        })
    }

    /// Build sqlx connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode);

        match &self.ssl_root_cert {
            Some(path) => options.ssl_root_cert(path),
            None => options,
        }
    }

    /// True when the connection is encrypted but the server certificate is
    /// not checked.
    pub fn is_unverified_tls(&self) -> bool {
        matches!(
            self.ssl_mode,
            PgSslMode::Allow | PgSslMode::Prefer | PgSslMode::Require
        )
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("ssl_mode", &self.ssl_mode)
            .field("ssl_root_cert", &self.ssl_root_cert)
            .finish()
    }
}
