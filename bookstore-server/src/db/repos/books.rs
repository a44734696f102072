//! Book repository
//!
//! - `PgBookStore`: parameterized SQL against `books`, one statement each
//! - `BookRepo`: the five CRUD operations with validation and messages
//!
//! Columns are listed explicitly with casts so SERIAL/BIGSERIAL ids and
//! NUMERIC/REAL/DOUBLE PRECISION prices all decode into [`Book`].

use async_trait::async_trait;
use serde_json::Value;

use super::{BookStore, DbError};
use crate::db::ConnectionProvider;
use crate::error::{BookError, BookResult, Operation};
use crate::models::{Book, Envelope, NewBook};

const SELECT_ALL: &str = r#"
    SELECT id::int8 AS id, title, author, price::float8 AS price, isbn
    FROM books
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id::int8 AS id, title, author, price::float8 AS price, isbn
    FROM books
    WHERE id = $1
"#;

const INSERT: &str = r#"
    INSERT INTO books (title, author, price, isbn)
    VALUES ($1, $2, $3, $4)
    RETURNING id::int8 AS id, title, author, price::float8 AS price, isbn
"#;

const UPDATE: &str = r#"
    UPDATE books SET title = $1, author = $2, price = $3, isbn = $4
    WHERE id = $5
    RETURNING id::int8 AS id, title, author, price::float8 AS price, isbn
"#;

const DELETE: &str = r#"
    DELETE FROM books
    WHERE id = $1
    RETURNING id::int8 AS id, title, author, price::float8 AS price, isbn
"#;

/// PostgreSQL-backed store
#[derive(Debug)]
pub struct PgBookStore {
    provider: ConnectionProvider,
}

impl PgBookStore {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
        let pool = self.provider.get_connection().await?;
        let rows = sqlx::query_as::<_, Book>(SELECT_ALL).fetch_all(pool).await?;
        Ok(rows)
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Book>, DbError> {
        let pool = self.provider.get_connection().await?;
        let row = sqlx::query_as::<_, Book>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, DbError> {
        let pool = self.provider.get_connection().await?;
        let row = sqlx::query_as::<_, Book>(INSERT)
            .bind(book.title.as_str())
            .bind(book.author.as_str())
            .bind(book.price)
            .bind(book.isbn.as_str())
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, book: &NewBook) -> Result<Option<Book>, DbError> {
        let pool = self.provider.get_connection().await?;
        let row = sqlx::query_as::<_, Book>(UPDATE)
            .bind(book.title.as_str())
            .bind(book.author.as_str())
            .bind(book.price)
            .bind(book.isbn.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<Option<Book>, DbError> {
        let pool = self.provider.get_connection().await?;
        let row = sqlx::query_as::<_, Book>(DELETE)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}

/// Book repository
pub struct BookRepo<S> {
    store: S,
}

impl<S: BookStore> BookRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// List every book. An empty table is not an error.
    pub async fn list_all(&self) -> BookResult<Envelope<Vec<Book>>> {
        let books = self
            .store
            .fetch_all()
            .await
            .map_err(BookError::storage(Operation::ListAll))?;

        tracing::debug!(count = books.len(), "listed books");
        let message = if books.is_empty() {
            "Books record not found"
        } else {
            "Data fetch successfuly"
        };
        Ok(Envelope::new(message, books))
    }

    pub async fn get_by_id(&self, id: i64) -> BookResult<Envelope<Book>> {
        let op = Operation::GetById;
        let book = self
            .store
            .fetch_one(id)
            .await
            .map_err(BookError::storage(op))?
            .ok_or(BookError::NotFound { op })?;

        Ok(Envelope::new("Book found successfully", book))
    }

    /// Validate and insert. Returns the bare created row.
    pub async fn create(&self, record: Option<&Value>) -> BookResult<Book> {
        let book = validated(record)?;
        let created = self
            .store
            .insert(&book)
            .await
            .map_err(BookError::storage(Operation::Create))?;

        tracing::debug!(id = created.id, "created book");
        Ok(created)
    }

    /// Validate and replace every field of an existing book.
    pub async fn update(&self, id: i64, record: Option<&Value>) -> BookResult<Envelope<Book>> {
        let op = Operation::Update;
        let book = validated(record)?;
        let updated = self
            .store
            .update(id, &book)
            .await
            .map_err(BookError::storage(op))?
            .ok_or(BookError::NotFound { op })?;

        tracing::debug!(id, "updated book");
        Ok(Envelope::new("Book record updated successfully", updated))
    }

    /// Delete a book, returning its last state.
    pub async fn delete(&self, id: i64) -> BookResult<Envelope<Book>> {
        let op = Operation::Delete;
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(BookError::storage(op))?
            .ok_or(BookError::NotFound { op })?;

        tracing::debug!(id, "deleted book");
        Ok(Envelope::new("Book record deleted successfully", deleted))
    }
}

fn validated(record: Option<&Value>) -> BookResult<NewBook> {
    NewBook::from_record(record).map_err(|report| BookError::Validation {
        errors: report.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBookStore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that always fails and counts how often it was reached
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    impl BrokenStore {
        fn fail<T>(&self) -> Result<T, DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DbError::Unavailable("DB error".into()))
        }
    }

    #[async_trait]
    impl BookStore for BrokenStore {
        async fn fetch_all(&self) -> Result<Vec<Book>, DbError> {
            self.fail()
        }
        async fn fetch_one(&self, _id: i64) -> Result<Option<Book>, DbError> {
            self.fail()
        }
        async fn insert(&self, _book: &NewBook) -> Result<Book, DbError> {
            self.fail()
        }
        async fn update(&self, _id: i64, _book: &NewBook) -> Result<Option<Book>, DbError> {
            self.fail()
        }
        async fn delete(&self, _id: i64) -> Result<Option<Book>, DbError> {
            self.fail()
        }
    }

    fn record(title: &str) -> Value {
        json!({ "title": title, "author": "Author", "price": 29.99, "isbn": "1234567890" })
    }

    #[tokio::test]
    async fn list_all_reports_rows() {
        let repo = BookRepo::new(MemoryBookStore::new());
        repo.create(Some(&record("Book 1"))).await.unwrap();
        repo.create(Some(&record("Book 2"))).await.unwrap();

        let listing = repo.list_all().await.unwrap();
        assert_eq!(listing.message, "Data fetch successfuly");
        assert_eq!(listing.data.len(), 2);
    }

    #[tokio::test]
    async fn list_all_on_empty_table_is_not_an_error() {
        let repo = BookRepo::new(MemoryBookStore::new());
        let listing = repo.list_all().await.unwrap();
        assert_eq!(listing.message, "Books record not found");
        assert!(listing.data.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_found_and_missing() {
        let repo = BookRepo::new(MemoryBookStore::new());
        let created = repo.create(Some(&record("Test Book"))).await.unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found.message, "Book found successfully");
        assert_eq!(found.data, created);

        let err = repo.get_by_id(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Error fetching book: Book record not found");
    }

    #[tokio::test]
    async fn create_returns_bare_row_with_id() {
        let repo = BookRepo::new(MemoryBookStore::new());
        let created = repo.create(Some(&record("New Book"))).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "New Book");
        assert_eq!(created.price, 29.99);
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_storage() {
        let repo = BookRepo::new(BrokenStore::default());
        let err = repo
            .create(Some(&json!({ "author": "A", "price": 5, "isbn": "1234567890" })))
            .await
            .unwrap_err();

        assert!(matches!(err, BookError::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "Validation failed: Title is required, Title must be a string"
        );
        assert_eq!(repo.store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_storage() {
        let repo = BookRepo::new(BrokenStore::default());
        let err = repo.update(1, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Book data is empty");
        assert_eq!(repo.store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let repo = BookRepo::new(MemoryBookStore::new());
        let created = repo.create(Some(&record("Old"))).await.unwrap();

        let updated = repo
            .update(
                created.id,
                Some(&json!({
                    "title": "Updated Book",
                    "author": "Someone Else",
                    "price": 39.99,
                    "isbn": "9876543210123"
                })),
            )
            .await
            .unwrap();

        assert_eq!(updated.message, "Book record updated successfully");
        assert_eq!(updated.data.id, created.id);
        assert_eq!(updated.data.author, "Someone Else");
        assert_eq!(updated.data.isbn, "9876543210123");
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows() {
        let repo = BookRepo::new(MemoryBookStore::new());

        let err = repo.update(999, Some(&record("X"))).await.unwrap_err();
        assert!(matches!(err, BookError::NotFound { op: Operation::Update }));
        assert_eq!(err.to_string(), "Error updating book: Book record not found");

        let err = repo.delete(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Error deleting book: Book record not found");
    }

    #[tokio::test]
    async fn delete_returns_prior_state() {
        let repo = BookRepo::new(MemoryBookStore::new());
        let created = repo.create(Some(&record("Deleted Book"))).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted.message, "Book record deleted successfully");
        assert_eq!(deleted.data, created);
        assert!(repo.get_by_id(created.id).await.is_err());
    }

    #[tokio::test]
    async fn storage_failures_are_prefixed_per_operation() {
        let repo = BookRepo::new(BrokenStore::default());
        let valid = record("T");

        let messages = [
            repo.list_all().await.unwrap_err().to_string(),
            repo.get_by_id(1).await.unwrap_err().to_string(),
            repo.create(Some(&valid)).await.unwrap_err().to_string(),
            repo.update(1, Some(&valid)).await.unwrap_err().to_string(),
            repo.delete(1).await.unwrap_err().to_string(),
        ];

        assert_eq!(
            messages,
            [
                "Error fetching books: DB error",
                "Error fetching book: DB error",
                "Error while creating inserting book record: DB error",
                "Error updating book: DB error",
                "Error deleting book: DB error",
            ]
        );
    }

    // Integration tests - run with DB_* set
    // cargo test -p bookstore-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn postgres_round_trip() {
        let repo = BookRepo::new(PgBookStore::new(ConnectionProvider::from_env()));

        let created = repo.create(Some(&record("Postgres Book"))).await.unwrap();
        let found = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(found.data, created);

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted.data, created);
    }
}
