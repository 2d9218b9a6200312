// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::config::CrawlConfig;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "crawly",
    version,
    about = "Crawl a website with a fixed pool of concurrent workers",
    long_about = "crawly fetches pages starting from a seed URL, follows links that stay under \
                  that URL, and stops once no worker has found new work within the timeout."
)]
pub struct Cli {
    /// Seed URL; only links starting with it are followed
    #[arg(short, long, default_value = "http://www.google.com")]
    pub url: String,

    /// Number of concurrent workers
    #[arg(short = 'c', long, default_value_t = 1)]
    pub concurrency: usize,

    /// Pending queue size (0 = synchronous handoff between workers)
    #[arg(short = 'b', long = "buffer-size", default_value_t = 0)]
    pub buffer_size: usize,

    /// Idle time in milliseconds after which a worker gives up, also the
    /// bound on every queue operation
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Maximum link dispatch tasks in flight (defaults to the worker count)
    #[arg(long)]
    pub dispatch_limit: Option<usize>,

    /// Skip URLs containing this text (repeatable; replaces the built-in list)
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Print the final crawl statistics as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let config = CrawlConfig::default()
            .with_workers(self.concurrency)
            .with_queue_capacity(self.buffer_size)
            .with_timeout(Duration::from_millis(self.timeout_ms));

        match self.dispatch_limit {
            Some(limit) => config.with_dispatch_limit(limit),
            None => config,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["crawly"]);
        assert_eq!(cli.url, "http://www.google.com");
        assert!(cli.exclude.is_empty());

        let config = cli.crawl_config();
        assert_eq!(config, CrawlConfig::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "crawly",
            "-u",
            "https://shop.example.com",
            "-c",
            "8",
            "-b",
            "32",
            "--timeout-ms",
            "250",
            "--exclude",
            "logout",
            "--exclude",
            "cart",
            "--json",
        ]);

        let config = cli.crawl_config();
        assert_eq!(config.workers, 8);
        assert_eq!(config.dispatch_limit, 8);
        assert_eq!(config.queue_capacity, 32);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(cli.exclude, vec!["logout", "cart"]);
        assert!(cli.json);
    }

    #[test]
    fn test_dispatch_limit_override() {
        let cli = Cli::parse_from(["crawly", "-c", "4", "--dispatch-limit", "1"]);
        assert_eq!(cli.crawl_config().dispatch_limit, 1);
    }
}
