//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `sqlmap_runner` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Reading the request payload (JSON object/array, or a plain URL list)
//! - Writing the result JSON
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use sqlmap_runner::config::Opt;
use sqlmap_runner::initialization::init_logger_with;
use sqlmap_runner::{run_batch, run_urls, BatchResult, ScanRequest, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists) so
    // SQLMAP_PATH and friends can be configured without exporting them
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();

    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let mut settings = Settings::from_env();
    if let Some(max_concurrency) = opt.max_concurrency {
        settings.max_concurrency = max_concurrency.max(1);
    }

    let input = read_input(&opt.file).context("Failed to read request input")?;

    let batch = if opt.urls {
        let urls: Vec<String> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        log::info!("Scanning {} target URL(s)", urls.len());
        run_urls(urls, &settings).await
    } else {
        let requests = parse_requests(&input)?;
        run_batch(requests, &settings).await
    };

    write_output(&batch, opt.output.as_deref())?;

    if batch.ok {
        Ok(())
    } else {
        // Partial or total failure: results were still written in full
        process::exit(1);
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Accepts a single JSON object or an array of them, the two request
/// shapes collaborators send.
fn parse_requests(input: &str) -> Result<Vec<ScanRequest>> {
    let value: Value = serde_json::from_str(input).context("Invalid JSON body")?;
    let requests = match value {
        Value::Array(_) => {
            serde_json::from_value(value).context("Invalid scan request in batch")?
        }
        Value::Object(_) => {
            let request: ScanRequest =
                serde_json::from_value(value).context("Invalid scan request")?;
            vec![request]
        }
        _ => anyhow::bail!("Request body must be an object or list"),
    };
    Ok(requests)
}

fn write_output(batch: &BatchResult, output: Option<&Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(batch).context("Failed to serialize results")?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
