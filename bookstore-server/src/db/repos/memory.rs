//! In-process store for local runs without PostgreSQL

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BookStore, DbError};
use crate::models::{Book, NewBook};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

/// Ordered map of books with a monotonically increasing id sequence.
///
/// Ids are never reused after a delete, matching a SERIAL column.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    table: Mutex<Table>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn row(id: i64, book: &NewBook) -> Book {
    Book {
        id,
        title: book.title.clone(),
        author: book.author.clone(),
        price: book.price,
        isbn: book.isbn.clone(),
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Book>, DbError> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, DbError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let created = row(table.last_id, book);
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, book: &NewBook) -> Result<Option<Book>, DbError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.get_mut(&id).map(|existing| {
            *existing = row(id, book);
            existing.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, DbError> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id))
    }
}
