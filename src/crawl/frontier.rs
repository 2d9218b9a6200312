// src/crawl/frontier.rs
// =============================================================================
// The frontier: everything the crawl knows about, and everything still to do.
//
// It combines:
// - the link filter (which URLs are eligible at all)
// - the seen set (which URLs have already been scheduled)
// - the pending queue (which URLs are waiting for a worker)
//
// Each distinct URL reaches the queue at most once for the whole crawl.
// The seen-set check and insert are a single atomic step, and they happen
// before the queue insert is attempted.
// =============================================================================

use std::time::Duration;

use super::queue::PendingQueue;
use super::seen::SeenSet;
use crate::error::QueueTimeout;
#[cfg(test)]
use crate::filter::AllowAll;
use crate::filter::LinkFilter;

/// What happened to an offered URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Newly seen and placed on the pending queue.
    Accepted,
    /// Filtered out, or already seen. Nothing changed.
    Rejected,
    /// Newly seen, but the queue had no room within the timeout. The URL
    /// stays seen and is lost to this crawl.
    TimedOut,
}

/// Shared work queue plus deduplication set.
pub struct Frontier {
    filter: Box<dyn LinkFilter>,
    seen: SeenSet,
    queue: PendingQueue,
}

impl Frontier {
    #[cfg(test)]
    pub fn new(capacity: usize) -> Self {
        Self::with_filter(capacity, AllowAll)
    }

    #[cfg(test)]
    pub fn with_filter(capacity: usize, filter: impl LinkFilter + 'static) -> Self {
        Self::from_boxed_filter(capacity, Box::new(filter))
    }

    pub fn from_boxed_filter(capacity: usize, filter: Box<dyn LinkFilter>) -> Self {
        Self {
            filter,
            seen: SeenSet::new(),
            queue: PendingQueue::new(capacity),
        }
    }

    // Proposes `url` for crawling
    //
    // Steps:
    // 1. Filter says no -> Rejected, nothing recorded
    // 2. Already seen -> Rejected
    // 3. Mark as seen (atomic with step 2)
    // 4. Enqueue, waiting up to `timeout` -> Accepted or TimedOut
    pub async fn offer(&self, url: &str, timeout: Duration) -> OfferOutcome {
        if !self.filter.is_allowed(url) {
            return OfferOutcome::Rejected;
        }

        if !self.seen.insert(url) {
            return OfferOutcome::Rejected;
        }

        match self.queue.push(url.to_string(), timeout).await {
            Ok(()) => OfferOutcome::Accepted,
            Err(QueueTimeout(_)) => OfferOutcome::TimedOut,
        }
    }

    /// Waits up to `timeout` for the next pending URL.
    pub async fn take(&self, timeout: Duration) -> Result<String, QueueTimeout> {
        self.queue.pop(timeout).await
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// URLs buffered in the pending queue right now.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl std::fmt::Debug for Frontier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("seen", &self.seen.len())
            .field("pending", &self.queue.len())
            .field("capacity", &self.queue.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn test_offer_then_take() {
        let frontier = Frontier::new(4);
        assert_eq!(frontier.offer("http://x/a", TIMEOUT).await, OfferOutcome::Accepted);
        assert_eq!(frontier.take(TIMEOUT).await.unwrap(), "http://x/a");
        assert!(frontier.take(TIMEOUT).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_offer_rejected() {
        let frontier = Frontier::new(4);
        assert_eq!(frontier.offer("http://x/a", TIMEOUT).await, OfferOutcome::Accepted);
        assert_eq!(frontier.offer("http://x/a", TIMEOUT).await, OfferOutcome::Rejected);
        assert_eq!(frontier.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_runs_before_seen_set() {
        let frontier = Frontier::with_filter(4, |url: &str| !url.ends_with("/c"));
        assert_eq!(frontier.offer("http://x/c", TIMEOUT).await, OfferOutcome::Rejected);
        assert_eq!(frontier.offer("http://x/c", TIMEOUT).await, OfferOutcome::Rejected);
        assert!(!frontier.has_seen("http://x/c"));
        assert_eq!(frontier.seen_count(), 0);
        assert_eq!(frontier.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_offer_stays_seen() {
        let frontier = Frontier::new(0);
        // No consumer waiting: the handoff cannot happen
        assert_eq!(frontier.offer("http://x/a", TIMEOUT).await, OfferOutcome::TimedOut);
        assert!(frontier.has_seen("http://x/a"));
        // And it is never retried
        assert_eq!(frontier.offer("http://x/a", TIMEOUT).await, OfferOutcome::Rejected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_offers_enqueue_once() {
        let frontier = Arc::new(Frontier::new(64));

        let offers: Vec<_> = (0..32)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                tokio::spawn(async move {
                    frontier.offer("http://x/same", Duration::from_secs(1)).await
                })
            })
            .collect();

        let mut accepted = 0;
        let mut rejected = 0;
        for offer in futures::future::join_all(offers).await {
            match offer.unwrap() {
                OfferOutcome::Accepted => accepted += 1,
                OfferOutcome::Rejected => rejected += 1,
                OfferOutcome::TimedOut => panic!("queue had plenty of room"),
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(rejected, 31);
        assert_eq!(frontier.pending(), 1);
    }
}
