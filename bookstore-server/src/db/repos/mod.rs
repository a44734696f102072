//! Repository implementations for database access
//!
//! [`BookStore`] is the raw storage seam (one method per SQL statement).
//! [`BookRepo`] layers validation, response messages and error prefixes on
//! top of any store.

pub mod books;
pub mod memory;

use async_trait::async_trait;

use super::DbError;
use crate::models::{Book, NewBook};

pub use books::{BookRepo, PgBookStore};
pub use memory::MemoryBookStore;

/// Storage operations over the `books` table.
///
/// Single-record methods return `None` when no row matched.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError>;

    async fn fetch_one(&self, id: i64) -> Result<Option<Book>, DbError>;

    async fn insert(&self, book: &NewBook) -> Result<Book, DbError>;

    async fn update(&self, id: i64, book: &NewBook) -> Result<Option<Book>, DbError>;

    async fn delete(&self, id: i64) -> Result<Option<Book>, DbError>;
}
