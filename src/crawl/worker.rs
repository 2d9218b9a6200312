// src/crawl/worker.rs
// =============================================================================
// The worker loop: take a URL, fetch it, feed its links back.
//
// Loop, per worker:
// 1. take() from the frontier, waiting up to `timeout`
//    - nothing arrived -> assume the crawl is exhausted and exit
// 2. fetch the URL, timing it
//    - error -> report it and go back to 1 (the URL stays seen)
// 3. hand the page's links to a dispatch task that offers them to the
//    frontier, then go straight back to 1
//
// The exit rule is a heuristic. A worker cannot tell "nothing left" from
// "everyone else is mid-fetch and about to produce work" except by waiting,
// so if fetches routinely outlast `timeout`, idle workers leave early and
// the crawl can end before the graph is fully explored.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::task::TaskTracker;

use super::frontier::{Frontier, OfferOutcome};
use super::report::{CrawlEvent, CrawlReporter, StatsCounter};
use crate::fetch::{Document, Fetcher};

/// Everything the workers of one crawl share.
pub(crate) struct CrawlState<F, R> {
    pub(crate) frontier: Frontier,
    pub(crate) fetcher: F,
    pub(crate) reporter: R,
    pub(crate) stats: StatsCounter,
    pub(crate) timeout: Duration,
    /// Caps the number of dispatch tasks offering links at once.
    pub(crate) dispatch_slots: Arc<Semaphore>,
    /// Dispatch tasks outlive the worker that spawned them; the coordinator
    /// waits on this before declaring the crawl done.
    pub(crate) dispatches: TaskTracker,
}

impl<F, R> CrawlState<F, R>
where
    F: Fetcher,
    R: CrawlReporter,
{
    // Offers one link and accounts for the outcome
    pub(crate) async fn offer_link(&self, worker: usize, url: &str) -> OfferOutcome {
        let outcome = self.frontier.offer(url, self.timeout).await;
        self.stats.record_offer(outcome);
        self.reporter.report(CrawlEvent::LinkOffered {
            worker,
            url,
            outcome,
        });
        if outcome == OfferOutcome::TimedOut {
            self.reporter.report(CrawlEvent::LinkDropped { worker, url });
        }
        outcome
    }
}

/// Runs worker `id` until it goes a full timeout without work.
pub(crate) async fn run<F, R>(id: usize, state: Arc<CrawlState<F, R>>)
where
    F: Fetcher,
    R: CrawlReporter,
{
    state.reporter.report(CrawlEvent::WorkerStarted { worker: id });

    loop {
        let url = match state.frontier.take(state.timeout).await {
            Ok(url) => url,
            Err(_) => break,
        };

        let started = Instant::now();
        let result = state.fetcher.fetch(&url).await;
        let latency = started.elapsed();

        let document = match result {
            Ok(document) => document,
            Err(error) => {
                state.stats.record_fetch(false);
                state.reporter.report(CrawlEvent::FetchFailed {
                    worker: id,
                    url: &url,
                    latency,
                    error: &error,
                });
                continue;
            }
        };

        state.stats.record_fetch(true);
        state.reporter.report(CrawlEvent::Fetched {
            worker: id,
            url: &url,
            latency,
            pending: state.frontier.pending(),
        });

        let links = document.links();
        if !links.is_empty() {
            dispatch(id, links, &state);
        }
    }

    state.reporter.report(CrawlEvent::WorkerExited { worker: id });
}

// Offers `links` from a separate task so the worker can go back to taking
// work. The task, not the worker, waits for a dispatch slot: at most
// `dispatch_limit` tasks offer at once, and a worker never stalls on one.
fn dispatch<F, R>(worker: usize, links: Vec<String>, state: &Arc<CrawlState<F, R>>)
where
    F: Fetcher,
    R: CrawlReporter,
{
    let state_for_task = Arc::clone(state);
    state.dispatches.spawn(async move {
        let _permit = match Arc::clone(&state_for_task.dispatch_slots).acquire_owned().await {
            Ok(permit) => permit,
            // The semaphore is never closed
            Err(_) => return,
        };
        for link in &links {
            state_for_task.offer_link(worker, link).await;
        }
    });
}
