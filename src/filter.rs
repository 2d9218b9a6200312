// src/filter.rs
// =============================================================================
// Link filters decide which discovered URLs are eligible for crawling.
//
// A filter is evaluated on every offered URL before the seen-set is touched,
// from many workers at once, so it must be stateless (or internally
// synchronized) and cheap.
// =============================================================================

/// Predicate restricting which URLs may be crawled.
pub trait LinkFilter: Send + Sync {
    fn is_allowed(&self, url: &str) -> bool;
}

// Any plain closure works as a filter:
//   Crawler::builder(config, fetcher).filter(|url: &str| !url.contains("logout"))
impl<F> LinkFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_allowed(&self, url: &str) -> bool {
        self(url)
    }
}

/// The default filter: every URL is allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl LinkFilter for AllowAll {
    fn is_allowed(&self, _url: &str) -> bool {
        true
    }
}

/// Substrings that mark shop pages not worth crawling.
pub const DEFAULT_EXCLUDES: &[&str] = &["socialshare", "product_compare", "cart", "wishlist"];

/// Keeps the crawl under a base URL and away from excluded paths.
///
/// A URL is allowed when it starts with `base` and contains none of the
/// `excluded` substrings. The comparison is on raw strings, with no
/// normalization.
#[derive(Debug, Clone)]
pub struct PrefixFilter {
    base: String,
    excluded: Vec<String>,
}

impl PrefixFilter {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            excluded: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the default exclusion list.
    pub fn with_excluded<I, S>(mut self, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = excluded.into_iter().map(Into::into).collect();
        self
    }
}

impl LinkFilter for PrefixFilter {
    fn is_allowed(&self, url: &str) -> bool {
        url.starts_with(&self.base) && !self.excluded.iter().any(|term| url.contains(term.as_str()))
    }
}
