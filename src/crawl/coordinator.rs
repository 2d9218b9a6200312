// src/crawl/coordinator.rs
// =============================================================================
// The crawl coordinator: start the workers, plant the seed, wait.
//
// `crawl()` returns once every worker has timed out waiting for work and
// every in-flight link dispatch has finished. Individual fetch failures never
// reach the caller; they only show up in the reporter and in the stats.
//
// There is no way to stop a crawl early. It ends when it runs out of work.
// =============================================================================

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;

use super::frontier::Frontier;
use super::report::{CrawlEvent, CrawlReporter, CrawlStats, StatsCounter, TracingReporter};
use super::worker::{self, CrawlState};
use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::fetch::Fetcher;
use crate::filter::{AllowAll, LinkFilter};

/// One crawl's worth of state: configuration, frontier, fetcher, reporter.
///
/// Crawlers share nothing with each other, so several can run side by side.
pub struct Crawler<F, R = TracingReporter> {
    config: CrawlConfig,
    state: Arc<CrawlState<F, R>>,
}

/// Assembles a [`Crawler`] from its collaborators.
pub struct CrawlerBuilder<F, R> {
    config: CrawlConfig,
    fetcher: F,
    filter: Box<dyn LinkFilter>,
    reporter: R,
}

impl<F: Fetcher> Crawler<F, TracingReporter> {
    /// Starts a builder with an allow-all filter and tracing output.
    pub fn builder(config: CrawlConfig, fetcher: F) -> CrawlerBuilder<F, TracingReporter> {
        CrawlerBuilder {
            config,
            fetcher,
            filter: Box::new(AllowAll),
            reporter: TracingReporter,
        }
    }
}

impl<F, R> CrawlerBuilder<F, R>
where
    F: Fetcher,
    R: CrawlReporter,
{
    pub fn filter(mut self, filter: impl LinkFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn reporter<R2: CrawlReporter>(self, reporter: R2) -> CrawlerBuilder<F, R2> {
        CrawlerBuilder {
            config: self.config,
            fetcher: self.fetcher,
            filter: self.filter,
            reporter,
        }
    }

    pub fn build(self) -> Result<Crawler<F, R>, ConfigError> {
        self.config.validate()?;

        let state = CrawlState {
            frontier: Frontier::from_boxed_filter(self.config.queue_capacity, self.filter),
            fetcher: self.fetcher,
            reporter: self.reporter,
            stats: StatsCounter::default(),
            timeout: self.config.timeout,
            dispatch_slots: Arc::new(Semaphore::new(self.config.dispatch_limit)),
            dispatches: TaskTracker::new(),
        };

        Ok(Crawler {
            config: self.config,
            state: Arc::new(state),
        })
    }
}

impl<F, R> Crawler<F, R>
where
    F: Fetcher,
    R: CrawlReporter,
{
    // Crawls outward from `seed` until quiescence
    //
    // Order matters: the workers are already waiting when the seed is
    // offered, so even a zero-capacity queue can hand it over.
    //
    // The seen set lives as long as the Crawler. Calling crawl() again on
    // the same instance never refetches a URL from an earlier run.
    pub async fn crawl(&self, seed: &str) {
        self.state.dispatches.reopen();

        let workers: Vec<_> = (0..self.config.workers)
            .map(|id| tokio::spawn(worker::run(id, Arc::clone(&self.state))))
            .collect();

        let outcome = self.state.frontier.offer(seed, self.state.timeout).await;
        self.state.stats.record_offer(outcome);
        self.state.reporter.report(CrawlEvent::SeedOffered { url: seed, outcome });

        for result in join_all(workers).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Worker task failed");
            }
        }

        self.state.dispatches.close();
        self.state.dispatches.wait().await;
    }

    /// Counters so far; final once `crawl()` has returned.
    pub fn stats(&self) -> CrawlStats {
        self.state.stats.snapshot(self.state.frontier.seen_count())
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn has_seen(&self, url: &str) -> bool {
        self.state.frontier.has_seen(url)
    }
}
