// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG, default "crawly=info")
// 2. Parse command-line arguments using clap
// 3. Build the link filter, HTTP fetcher and crawler
// 4. Crawl until every worker has run out of work
// 5. Exit 0 once the crawl finishes, 2 if it could not start
//
// Failed fetches along the way do not change the exit code; they are only
// logged.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod fetch;
mod filter;
#[cfg(test)]
mod testutil;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::Crawler;
use fetch::HttpFetcher;
use filter::PrefixFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crawly=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut filter = PrefixFilter::new(cli.url.clone());
    if !cli.exclude.is_empty() {
        filter = filter.with_excluded(cli.exclude.iter().cloned());
    }

    let fetcher = HttpFetcher::new(cli.fetch_timeout()).context("Failed to create HTTP client")?;

    let crawler = Crawler::builder(cli.crawl_config(), fetcher)
        .filter(filter)
        .build()
        .context("Invalid crawl configuration")?;

    let config = crawler.config();
    tracing::info!(
        seed = %cli.url,
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        timeout_ms = config.timeout.as_millis() as u64,
        "Starting crawl"
    );

    crawler.crawl(&cli.url).await;

    let stats = crawler.stats();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        tracing::info!(
            fetched = stats.fetched,
            failed = stats.failed,
            dropped = stats.dropped,
            seen = stats.seen,
            "Crawl finished"
        );
    }

    Ok(())
}
