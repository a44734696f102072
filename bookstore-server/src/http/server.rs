//! Axum adapter for running the handler as a plain HTTP server
//!
//! Each request on `/books` or `/books/{id}` is turned into a
//! [`RequestEvent`], dispatched, and the envelope is written back as-is:
//! - Request tracing
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::db::BookStore;
use crate::dispatch::{Dispatcher, RequestEvent};
use crate::response::ResponseEnvelope;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
        }
    }
}

/// Build the router over a shared dispatcher.
pub fn router<S: BookStore + 'static>(dispatcher: Arc<Dispatcher<S>>) -> Router {
    Router::new()
        .route("/books", any(books::<S>))
        .route("/books/{id}", any(book::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Arc::new(Dispatcher::new(MemoryBookStore::new()));
/// run_server(dispatcher, ServerConfig::default()).await?;
/// ```
pub async fn run_server<S: BookStore + 'static>(
    dispatcher: Arc<Dispatcher<S>>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = router(dispatcher);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// ANY /books
async fn books<S: BookStore>(
    State(dispatcher): State<Arc<Dispatcher<S>>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let event = to_event(&method, &uri, None, body);
    into_http(dispatcher.handle(event).await)
}

/// ANY /books/{id}
async fn book<S: BookStore>(
    State(dispatcher): State<Arc<Dispatcher<S>>>,
    Path(id): Path<String>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let event = to_event(&method, &uri, Some(id), body);
    into_http(dispatcher.handle(event).await)
}

fn to_event(method: &Method, uri: &Uri, id: Option<String>, body: String) -> RequestEvent {
    let mut event = RequestEvent::new(method.as_str(), uri.path());
    if let Some(id) = id {
        event = event.with_id(id);
    }
    if !body.is_empty() {
        event = event.with_body(body);
    }
    event
}

fn into_http(envelope: ResponseEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, envelope.body).into_response();

    for (name, value) in &envelope.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }
    response
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
