// src/error.rs
// =============================================================================
// Error types shared across the crawler.
//
// None of these ever abort a crawl. Fetch errors and queue timeouts are
// absorbed by the worker that hit them and turned into log lines; config
// errors only happen before the crawl starts.
// =============================================================================

use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve or parse a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered, but not with a 2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// DNS failure, refused connection, TLS handshake problem, ...
    #[error("connection failed: {0}")]
    Connect(String),

    /// The body could not be read.
    #[error("failed to read body: {0}")]
    Body(String),

    /// Anything else reqwest reports.
    #[error("{0}")]
    Other(String),
}

/// Invalid crawl configuration, detected before any worker starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("dispatch limit must be at least 1")]
    NoDispatchSlots,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// A blocking queue operation gave up after waiting `0`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("queue operation timed out after {0:?}")]
pub struct QueueTimeout(pub Duration);
