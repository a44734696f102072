//! bookstore - Books CRUD handler entry points
//!
//! - Lambda runtime loop (default when no subcommand is given)
//! - Local HTTP server (`serve`)
//! - Single event invocation (`invoke`)
//! - Record validation (`validate`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "bookstore",
    author,
    version,
    about = "CRUD handler for the books table (AWS Lambda or local HTTP)",
    long_about = "Validate book records, persist them in PostgreSQL, and answer API Gateway \
                  style events. Database settings come from DB_HOST, DB_DATABASE, DB_USER, \
                  DB_PASSWORD and DB_PORT."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve Lambda invocations (default)
    Lambda,
    /// Run a local HTTP server on /books and /books/{id}
    Serve(commands::serve::ServeArgs),
    /// Dispatch one event from a file or stdin and print the response
    Invoke(commands::invoke::InvokeArgs),
    /// Check a book record against the validation rules
    Validate(commands::validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Lambda);

    init_tracing(&TracingConfig {
        debug: cli.debug,
        lambda: matches!(command, Commands::Lambda),
    })
    .ok();
    config::load_dotenv();

    match command {
        Commands::Lambda => commands::run_lambda().await?,
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Invoke(args) => commands::run_invoke(args).await?,
        Commands::Validate(args) => commands::run_validate(args).await?,
    }
    Ok(())
}
