// src/testutil.rs
// =============================================================================
// Test doubles for the crawl engine.
//
// - GraphFetcher: an in-memory link graph with per-page latency and
//   failures, recording every fetch it serves
// - RecordingReporter: keeps every CrawlEvent as an owned value
//
// Both are Clone and share their recordings through Arc<Mutex<_>>, so a
// test can hand one copy to the crawler and inspect the other afterwards.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::crawl::{CrawlEvent, CrawlReporter, OfferOutcome};
use crate::error::FetchError;
use crate::fetch::{Document, Fetcher};

/// A page served by [`GraphFetcher`].
#[derive(Debug, Clone)]
pub struct GraphPage {
    links: Vec<String>,
}

impl Document for GraphPage {
    fn links(&self) -> Vec<String> {
        self.links.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphFetcher {
    pages: HashMap<String, Vec<String>>,
    latency: HashMap<String, Duration>,
    failing: HashSet<String>,
    default_latency: Duration,
    log: Arc<Mutex<Vec<String>>>,
}

impl GraphFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page and its outbound links.
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.pages
            .insert(url.to_string(), links.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Makes every fetch of `url` fail.
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn with_latency(mut self, url: &str, latency: Duration) -> Self {
        self.latency.insert(url.to_string(), latency);
        self
    }

    pub fn with_default_latency(mut self, latency: Duration) -> Self {
        self.default_latency = latency;
        self
    }

    /// Every URL fetched so far, in the order the fetches started.
    pub fn fetched(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.log.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl Fetcher for GraphFetcher {
    type Document = GraphPage;

    async fn fetch(&self, url: &str) -> Result<GraphPage, FetchError> {
        self.log.lock().unwrap().push(url.to_string());

        let latency = self.latency.get(url).copied().unwrap_or(self.default_latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.failing.contains(url) {
            return Err(FetchError::Connect("connection refused".to_string()));
        }

        match self.pages.get(url) {
            Some(links) => Ok(GraphPage {
                links: links.clone(),
            }),
            None => Err(FetchError::Status(404)),
        }
    }
}

/// Owned copy of a [`CrawlEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Started(usize),
    Seed(String, OfferOutcome),
    Fetched(usize, String),
    Failed(usize, String),
    Offered(usize, String, OfferOutcome),
    Dropped(usize, String),
    Exited(usize),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    /// Outcomes of every worker offer of `url`, in report order.
    pub fn offers_of(&self, url: &str) -> Vec<OfferOutcome> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Offered(_, u, outcome) if u == url => Some(outcome),
                _ => None,
            })
            .collect()
    }

    /// (worker, url) for every dropped link.
    pub fn dropped(&self) -> Vec<(usize, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Dropped(worker, url) => Some((worker, url)),
                _ => None,
            })
            .collect()
    }

    pub fn exited(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Exited(worker) => Some(worker),
                _ => None,
            })
            .collect()
    }
}

impl CrawlReporter for RecordingReporter {
    fn report(&self, event: CrawlEvent<'_>) {
        let recorded = match event {
            CrawlEvent::WorkerStarted { worker } => Recorded::Started(worker),
            CrawlEvent::SeedOffered { url, outcome } => Recorded::Seed(url.to_string(), outcome),
            CrawlEvent::Fetched { worker, url, .. } => Recorded::Fetched(worker, url.to_string()),
            CrawlEvent::FetchFailed { worker, url, .. } => Recorded::Failed(worker, url.to_string()),
            CrawlEvent::LinkOffered {
                worker,
                url,
                outcome,
            } => Recorded::Offered(worker, url.to_string(), outcome),
            CrawlEvent::LinkDropped { worker, url } => Recorded::Dropped(worker, url.to_string()),
            CrawlEvent::WorkerExited { worker } => Recorded::Exited(worker),
        };
        self.events.lock().unwrap().push(recorded);
    }
}
