//! trackbatch - batch FedEx tracking lookups into a flat CSV report.
//!
//! Reads a newline-separated list of tracking numbers, queries the FedEx
//! Track API in batches of 30, and writes one CSV row per shipment with
//! status, dates, delay, and package details.

mod api;
mod app;
mod batch;
mod config;
mod models;
mod report;
mod utils;

use std::io;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Set up logging with environment-based filter
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    app::run(&config).await
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("trackbatch starting");

    if let Err(e) = run().await {
        error!("Run failed: {:#}", e);
        std::process::exit(1);
    }

    println!("done");
}
