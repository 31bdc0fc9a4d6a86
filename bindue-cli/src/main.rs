//! Command-line check that reports which bins are due for collection on a given day.

mod args;
mod report;

use std::{io, sync::Arc};

use anyhow::{Context, Result};
use bindue_core::{BinDueService, CollectionPagePort};
use bindue_provider_north_lanarkshire::{self as north_lanarkshire, SavedPagePort};
use chrono::Local;
use clap::Parser;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Format};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let port: Arc<dyn CollectionPagePort> = match &cli.html {
        Some(path) => Arc::new(
            SavedPagePort::from_file(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => {
            let client = Client::builder()
                .user_agent(concat!("bindue/", env!("CARGO_PKG_VERSION")))
                .build()?;
            north_lanarkshire::page_port(client, &cli.property)
        }
    };

    let reference = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let service = BinDueService::new(port, cli.categories()).with_extractor(cli.extractor());
    info!(
        council = %service.council().name,
        %reference,
        categories = service.categories().len(),
        "checking bin collections"
    );

    let check = service
        .check(reference)
        .await
        .context("Failed to load the collection schedule")?;

    let output = match cli.format {
        Format::Text => report::render_text(&check, cli.upcoming),
        Format::Json => report::render_json(service.council(), &check)?,
    };
    emit(&output);

    Ok(())
}

#[expect(clippy::print_stdout, reason = "the report is the program's output")]
fn emit(output: &str) {
    println!("{output}");
}

// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
