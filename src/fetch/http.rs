// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP for the crawler.
//
// Key functionality:
// - Makes GET requests with a shared, connection-pooling reqwest Client
// - Bounds every request with a client-side timeout, so a hung server
//   cannot pin a worker forever
// - Maps failure modes (non-2xx, timeout, connect, ...) onto FetchError
// - Parses the body into an HtmlDocument
// =============================================================================

use std::time::Duration;

use reqwest::Client;

use super::{Fetcher, HtmlDocument};
use crate::error::FetchError;

const USER_AGENT: &str = concat!("crawly/", env!("CARGO_PKG_VERSION"));

/// Fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    //
    // Client is cheap to clone (it's a reference counter internally), so
    // every worker shares the same connection pool.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Other(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    type Document = HtmlDocument;

    async fn fetch(&self, url: &str) -> Result<HtmlDocument, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Relative links resolve against where we ended up, not where we started
        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(HtmlDocument::parse(&html, &final_url))
    }
}

// Categorizes different error types from reqwest
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        FetchError::Body(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}
