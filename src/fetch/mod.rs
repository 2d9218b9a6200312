// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's window onto the network.
//
// The crawl engine only knows two contracts:
// - Fetcher: turn a URL into a Document (or a FetchError)
// - Document: hand back the outbound links as plain strings
//
// Submodules:
// - http: the reqwest-backed Fetcher used by the binary
// - html: pulls href values out of an HTML page with scraper
// =============================================================================

mod html;
mod http;

use std::future::Future;

use crate::error::FetchError;

pub use html::HtmlDocument;
pub use http::HttpFetcher;

/// A fetched page, reduced to what the crawler needs from it.
pub trait Document {
    /// Outbound hyperlinks, in document order. May be empty, may repeat, may
    /// contain things that are not valid URLs at all.
    fn links(&self) -> Vec<String>;
}

/// Retrieves and parses a page.
///
/// The crawler puts no timeout on this call; implementations are expected
/// to bound their own latency.
pub trait Fetcher: Send + Sync + 'static {
    type Document: Document + Send;

    fn fetch(&self, url: &str) -> impl Future<Output = Result<Self::Document, FetchError>> + Send;
}
