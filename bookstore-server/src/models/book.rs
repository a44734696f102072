//! Book record types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{validate, ValidationReport};

/// Book row as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
}

/// Validated field set for insert/update (no id: storage assigns it)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
}

impl NewBook {
    /// Validate a raw JSON record and extract the typed fields.
    ///
    /// Create and update both go through here, so the two write paths
    /// can never drift apart.
    pub fn from_record(record: Option<&Value>) -> Result<Self, ValidationReport> {
        let report = validate(record);
        if !report.is_valid {
            return Err(report);
        }

        // A clean report guarantees every field below is present and typed.
        let field = |name: &str| record.and_then(|r| r.get(name));
        let text = |name: &str| field(name).and_then(Value::as_str).map(str::to_owned);

        match (text("title"), text("author"), field("price").and_then(Value::as_f64), text("isbn")) {
            (Some(title), Some(author), Some(price), Some(isbn)) => Ok(Self {
                title,
                author,
                price,
                isbn,
            }),
            _ => Err(ValidationReport {
                is_valid: false,
                errors: vec!["Book data is empty".to_owned()],
            }),
        }
    }
}

/// `{message, data}` wrapper returned by list/get/update/delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
