// src/config.rs
// =============================================================================
// Knobs for a single crawl.
//
// The CLI builds one of these from its flags; tests build them directly.
// =============================================================================

use std::time::Duration;

use crate::error::ConfigError;

/// Idle time after which a worker assumes the crawl is over.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Pending queue size; 0 means every handoff is synchronous.
    pub queue_capacity: usize,
    /// Bound on every take and offer, and the worker idle-exit threshold.
    pub timeout: Duration,
    /// Maximum number of link dispatch tasks in flight at once.
    pub dispatch_limit: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            queue_capacity: 0,
            timeout: DEFAULT_TIMEOUT,
            dispatch_limit: 1,
        }
    }
}

impl CrawlConfig {
    /// Sets the worker count. The dispatch limit follows it unless set
    /// explicitly afterwards.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self.dispatch_limit = workers;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dispatch_limit(mut self, limit: usize) -> Self {
        self.dispatch_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.dispatch_limit == 0 {
            return Err(ConfigError::NoDispatchSlots);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CrawlConfig::default();
        assert_eq!(config.workers, 1);
        assert_eq!(config.queue_capacity, 0);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dispatch_limit_follows_workers() {
        let config = CrawlConfig::default().with_workers(8);
        assert_eq!(config.dispatch_limit, 8);

        let config = CrawlConfig::default().with_workers(8).with_dispatch_limit(2);
        assert_eq!(config.dispatch_limit, 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            CrawlConfig::default().with_workers(0).validate(),
            Err(ConfigError::NoWorkers)
        );
        assert_eq!(
            CrawlConfig::default().with_dispatch_limit(0).validate(),
            Err(ConfigError::NoDispatchSlots)
        );
        assert_eq!(
            CrawlConfig::default().with_timeout(Duration::ZERO).validate(),
            Err(ConfigError::ZeroTimeout)
        );
    }
}
