//! Database layer - connection provider and repositories
//!
//! # Design Principles
//!
//! - One pool per provider, built lazily behind a one-time initializer
//! - Single-statement writes with RETURNING - no read-after-write
//! - Storage sits behind the [`BookStore`] trait so the request path can be
//!   exercised without PostgreSQL

pub mod pool;
pub mod repos;

use crate::config::ConfigError;

pub use pool::{ConnectionProvider, PoolSettings};
pub use repos::*;

/// Storage-level failure; messages pass through unchanged
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Server-reported errors render as the bare server message
    #[error("{}", sqlx_message(.0))]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failure reported by a non-SQL store
    #[error("{0}")]
    Unavailable(String),
}

fn sqlx_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_owned(),
        other => other.to_string(),
    }
}
