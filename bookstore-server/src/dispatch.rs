//! Request dispatch
//!
//! One event in, one envelope out. Routing is a four-way match on the HTTP
//! method; the status code is chosen from the [`BookError`] variant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;

use crate::db::{BookRepo, BookStore};
use crate::error::{BookError, BookResult};
use crate::response::{build, Failure, Missing, Rejection, ResponseEnvelope};

/// API Gateway proxy event (fields this handler reads; others are ignored)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub http_method: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestEvent {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert("id".to_owned(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `id` path parameter, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Parse the body as JSON. A missing or blank body is `None`.
    fn record(&self) -> BookResult<Option<Value>> {
        match self.body.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
        }
    }
}

/// Routes events to the book repository
pub struct Dispatcher<S> {
    repo: BookRepo<S>,
}

impl<S: BookStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Self {
            repo: BookRepo::new(store),
        }
    }

    pub fn repo(&self) -> &BookRepo<S> {
        &self.repo
    }

    /// Handle one event. Never fails: every error becomes a response.
    pub async fn handle(&self, event: RequestEvent) -> ResponseEnvelope {
        let span = tracing::info_span!(
            "request",
            method = %event.http_method,
            path = event.path.as_deref().unwrap_or("")
        );

        async {
            let response = match self.route(&event).await {
                Ok(response) => response,
                Err(err) => error_response(&err),
            };
            tracing::info!(status = response.status_code, "request complete");
            response
        }
        .instrument(span)
        .await
    }

    async fn route(&self, event: &RequestEvent) -> BookResult<ResponseEnvelope> {
        let method = event.http_method.as_str();
        match method {
            "POST" => {
                let record = event.record()?;
                let created = self.repo.create(record.as_ref()).await?;
                Ok(ResponseEnvelope::json(200, &created))
            }
            "GET" => match event.id() {
                Some(raw) => {
                    let found = self.repo.get_by_id(parse_id(raw)?).await?;
                    Ok(ResponseEnvelope::json(200, &found))
                }
                None => {
                    let listing = self.repo.list_all().await?;
                    Ok(ResponseEnvelope::json(200, &listing))
                }
            },
            "PUT" => {
                let id = required_id(event, method)?;
                let record = event.record()?;
                let updated = self.repo.update(id, record.as_ref()).await?;
                Ok(ResponseEnvelope::json(200, &updated))
            }
            "DELETE" => {
                let id = required_id(event, method)?;
                let deleted = self.repo.delete(id).await?;
                Ok(ResponseEnvelope::json(200, &deleted))
            }
            other => Err(BookError::UnsupportedMethod {
                method: other.to_owned(),
            }),
        }
    }
}

fn required_id(event: &RequestEvent, method: &str) -> BookResult<i64> {
    let raw = event
        .id()
        .ok_or_else(|| BookError::bad_request(format!("Book id is required for {}", method)))?;
    parse_id(raw)
}

fn parse_id(raw: &str) -> BookResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| BookError::bad_request(format!("Invalid book id: {}", raw)))
}

/// Map an error to its response by variant.
pub fn error_response(err: &BookError) -> ResponseEnvelope {
    match err {
        BookError::Validation { .. } | BookError::BadRequest { .. } => build(
            400,
            &Rejection {
                success: false,
                message: err.to_string(),
            },
        ),
        BookError::NotFound { .. } => build(
            404,
            &Missing {
                message: "Book record not found",
                data: None,
            },
        ),
        BookError::UnsupportedMethod { .. }
        | BookError::MalformedBody { .. }
        | BookError::Storage { .. } => {
            tracing::error!(error = %err, "request failed");
            ResponseEnvelope::json(
                500,
                &Failure {
                    error: err.to_string(),
                },
            )
        }
    }
}
