//! One-shot invocation
//!
//! Reads a single event (file or stdin), dispatches it, prints the envelope.
//!
//!   echo '{"httpMethod":"GET","path":"/books"}' | bookstore invoke --memory

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;

use bookstore_server::{postgres_dispatcher, Dispatcher, MemoryBookStore, RequestEvent};

#[derive(Parser, Debug)]
pub struct InvokeArgs {
    /// Event JSON file (reads stdin if omitted)
    #[arg(long, short = 'e', value_name = "PATH")]
    pub event: Option<PathBuf>,

    /// Use an empty in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,
}

pub async fn run_invoke(args: InvokeArgs) -> Result<()> {
    let raw = read_input(args.event.as_ref()).await?;
    let event: RequestEvent =
        serde_json::from_str(&raw).context("Event is not a valid request event")?;

    let response = if args.memory {
        Dispatcher::new(MemoryBookStore::new()).handle(event).await
    } else {
        postgres_dispatcher().handle(event).await
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Read a file, or all of stdin when no path is given
pub async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
