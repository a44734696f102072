//! bookstore-server: CRUD request handler for the `books` table
//!
//! Takes API Gateway style events, validates book records, runs
//! parameterized SQL through a lazily built PostgreSQL pool, and returns
//! `{statusCode, headers, body}` envelopes.

pub mod config;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod models;
pub mod response;

pub use config::{ConfigError, DbConfig};
pub use db::{BookRepo, BookStore, ConnectionProvider, DbError, MemoryBookStore, PgBookStore};
pub use dispatch::{Dispatcher, RequestEvent};
pub use error::{BookError, BookResult, Operation};
pub use response::{build, ResponseEnvelope};

/// Dispatcher wired to PostgreSQL, configured from `DB_*` variables on the
/// first request.
pub fn postgres_dispatcher() -> Dispatcher<PgBookStore> {
    Dispatcher::new(PgBookStore::new(ConnectionProvider::from_env()))
}
