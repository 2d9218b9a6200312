// src/crawl/seen.rs
// =============================================================================
// The set of every URL this crawl has ever scheduled.
//
// URLs go in once and never come out, even if their fetch later fails.
// Membership is exact string equality; no normalization happens here.
// =============================================================================

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Concurrency-safe, grow-only set of URLs.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: RwLock<HashSet<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as seen. Returns `true` only for the caller that inserted
    /// it first; every later (or concurrent) caller gets `false`.
    pub fn insert(&self, url: &str) -> bool {
        // Cheap shared-lock rejection: most offers are for known URLs
        if self.contains(url) {
            return false;
        }

        // The membership check and the insert happen under one write lock;
        // HashSet::insert reports whether the value was new
        let mut urls = self.urls.write().unwrap_or_else(PoisonError::into_inner);
        urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
