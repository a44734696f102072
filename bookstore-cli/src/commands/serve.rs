//! HTTP server command
//!
//! Runs the handler behind a local axum server so it can be exercised with
//! curl instead of an API Gateway deployment.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use bookstore_server::http::{run_server, ServerConfig};
use bookstore_server::{postgres_dispatcher, Dispatcher, MemoryBookStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "BOOKSTORE_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Keep books in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
    };

    if args.memory {
        tracing::warn!("Using in-memory book store - data is not persisted");
        run_server(Arc::new(Dispatcher::new(MemoryBookStore::new())), config)
            .await
            .context("Server error")?;
    } else {
        tracing::info!("Using PostgreSQL book store (pool created on first request)");
        run_server(Arc::new(postgres_dispatcher()), config)
            .await
            .context("Server error")?;
    }

    Ok(())
}
