// src/crawl/report.rs
// =============================================================================
// Observability for the crawl: events, reporters and counters.
//
// Workers never log directly. They emit CrawlEvents to a CrawlReporter, so
// the binary can log through `tracing` while tests record the exact sequence
// of offers, drops and exits.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use super::frontier::OfferOutcome;

/// Something a worker did that is worth telling the outside world about.
#[derive(Debug, Clone, Copy)]
pub enum CrawlEvent<'a> {
    WorkerStarted {
        worker: usize,
    },
    /// The coordinator offered the seed URL.
    SeedOffered {
        url: &'a str,
        outcome: OfferOutcome,
    },
    Fetched {
        worker: usize,
        url: &'a str,
        latency: Duration,
        /// URLs still buffered in the pending queue after this fetch.
        pending: usize,
    },
    FetchFailed {
        worker: usize,
        url: &'a str,
        latency: Duration,
        error: &'a crate::error::FetchError,
    },
    LinkOffered {
        worker: usize,
        url: &'a str,
        outcome: OfferOutcome,
    },
    /// A link passed filter and dedup but the queue stayed full past the
    /// timeout. It stays marked as seen and is never retried.
    LinkDropped {
        worker: usize,
        url: &'a str,
    },
    /// The worker waited a full timeout without getting work and quit.
    WorkerExited {
        worker: usize,
    },
}

/// Receives crawl events. The default implementation ignores them.
pub trait CrawlReporter: Send + Sync + 'static {
    fn report(&self, event: CrawlEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that drops every event.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

#[cfg(test)]
impl CrawlReporter for NullReporter {}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl CrawlReporter for TracingReporter {
    fn report(&self, event: CrawlEvent<'_>) {
        match event {
            CrawlEvent::WorkerStarted { worker } => {
                tracing::debug!(worker, "Worker started");
            }
            CrawlEvent::SeedOffered { url, outcome } => match outcome {
                OfferOutcome::Accepted => tracing::info!(%url, "Crawl started"),
                OfferOutcome::Rejected => tracing::warn!(%url, "Seed rejected by link filter"),
                OfferOutcome::TimedOut => tracing::warn!(%url, "No worker took the seed in time"),
            },
            CrawlEvent::Fetched {
                worker,
                url,
                latency,
                pending,
            } => {
                tracing::info!(
                    worker,
                    latency_ms = latency.as_millis() as u64,
                    pending,
                    %url,
                    "Fetched"
                );
            }
            CrawlEvent::FetchFailed {
                worker,
                url,
                latency,
                error,
            } => {
                tracing::warn!(
                    worker,
                    latency_ms = latency.as_millis() as u64,
                    %url,
                    %error,
                    "Fetch failed"
                );
            }
            CrawlEvent::LinkOffered {
                worker,
                url,
                outcome,
            } => {
                tracing::trace!(worker, %url, ?outcome, "Link offered");
            }
            CrawlEvent::LinkDropped { worker, url } => {
                tracing::warn!(worker, %url, "Queue full, link dropped");
            }
            CrawlEvent::WorkerExited { worker } => {
                tracing::info!(worker, "No work within timeout, worker exiting");
            }
        }
    }
}

/// Snapshot of the crawl counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Pages fetched successfully.
    pub fetched: u64,
    /// Fetches that returned an error.
    pub failed: u64,
    /// Offers that reached the pending queue (the seed included).
    pub accepted: u64,
    /// Offers turned away by the filter or because the URL was already seen.
    pub rejected: u64,
    /// Offers that timed out waiting for queue space.
    pub dropped: u64,
    /// Distinct URLs ever scheduled.
    pub seen: u64,
}

// Live counters behind CrawlStats. Relaxed ordering is enough: the values
// are only read as a whole after the workers have been joined.
#[derive(Debug, Default)]
pub(crate) struct StatsCounter {
    fetched: AtomicU64,
    failed: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
    dropped: AtomicU64,
}

impl StatsCounter {
    pub(crate) fn record_fetch(&self, ok: bool) {
        let counter = if ok { &self.fetched } else { &self.failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_offer(&self, outcome: OfferOutcome) {
        let counter = match outcome {
            OfferOutcome::Accepted => &self.accepted,
            OfferOutcome::Rejected => &self.rejected,
            OfferOutcome::TimedOut => &self.dropped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, seen: usize) -> CrawlStats {
        CrawlStats {
            fetched: self.fetched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            seen: seen as u64,
        }
    }
}
