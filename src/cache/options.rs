//! Per-query cache options.

use std::time::Duration;

use crate::config::{
    DEFAULT_CACHE_TIME, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY_MS, DEFAULT_STALE_TIME,
};

/// How a query uses the cache.
///
/// There are deliberately no refetch-on-focus or refetch-on-reconnect
/// switches: a query only ever fetches when it starts observing a key whose
/// cached data is missing or stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Cached data younger than this is served without a request
    pub stale_time: Duration,
    /// An entry nobody observes is evicted after this long
    pub cache_time: Duration,
    /// Retries after the first failed attempt
    pub retry: usize,
    /// Delay before the first retry; doubles for each further retry
    pub retry_delay: Duration,
    /// Disabled queries never fetch
    pub enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            cache_time: DEFAULT_CACHE_TIME,
            retry: DEFAULT_RETRY_COUNT,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            enabled: true,
        }
    }
}

impl QueryOptions {
    /// Same options with `enabled` replaced.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
