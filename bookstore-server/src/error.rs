//! Error types for bookstore-server
//!
//! Every failure is a tagged [`BookError`] variant. The dispatcher picks the
//! status code from the variant; the Display text is what clients see.

use std::fmt;

use thiserror::Error;

use crate::db::DbError;

pub type BookResult<T> = Result<T, BookError>;

/// Repository operation, used as the message prefix for its failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Self::ListAll => "Error fetching books",
            Self::GetById => "Error fetching book",
            Self::Create => "Error while creating inserting book record",
            Self::Update => "Error updating book",
            Self::Delete => "Error deleting book",
        };
        f.write_str(prefix)
    }
}

#[derive(Error, Debug)]
pub enum BookError {
    /// Record failed validation (400)
    #[error("Validation failed: {}", .errors.join(", "))]
    Validation { errors: Vec<String> },

    /// Zero rows for a single-record operation (404)
    #[error("{op}: Book record not found")]
    NotFound { op: Operation },

    /// Request is missing or has a malformed id (400)
    #[error("{message}")]
    BadRequest { message: String },

    /// Method other than GET/POST/PUT/DELETE (500)
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },

    /// Request body is not JSON (500)
    #[error("Invalid request body: {source}")]
    MalformedBody {
        #[from]
        source: serde_json::Error,
    },

    /// Connection or query failure (500)
    #[error("{op}: {source}")]
    Storage {
        op: Operation,
        #[source]
        source: DbError,
    },
}

impl BookError {
    pub fn storage(op: Operation) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Storage { op, source }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}
