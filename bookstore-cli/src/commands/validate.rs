//! Validate a book record without touching the database

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;

use bookstore_server::models::validate;

use super::invoke::read_input;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Book record JSON file (reads stdin if omitted)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Print the validation report; fails when the record is invalid
pub async fn run_validate(args: ValidateArgs) -> Result<()> {
    let raw = read_input(args.file.as_ref()).await?;
    let record: Option<Value> = if raw.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&raw).context("Record is not valid JSON")?)
    };

    let report = validate(record.as_ref());
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_valid {
        bail!("record has {} validation error(s)", report.errors.len());
    }
    Ok(())
}
