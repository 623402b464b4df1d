//! Query cache.
//!
//! An explicit data-fetch cache keyed by query: each entry holds the last data,
//! the last error and when the data was fetched. Callers *observe* the key
//! they currently care about; an observed key is fetched only if its data is
//! missing or older than the stale time, and an entry nobody observes is
//! dropped once it has been unobserved for longer than the cache time.
//!
//! The cache knows nothing about the UI. It is a plain owned value; the view
//! that owns it is its only writer.

mod options;
mod retry;

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use log::{debug, warn};
use tokio::time::Instant;

pub use options::QueryOptions;
pub use retry::{get_retry_strategy, run_with_retry};

/// What a query currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<V, E> {
    /// No data and no error yet (never fetched, or disabled).
    Pending,
    /// Data is available. It may be stale, and a later refetch may have failed.
    Success(Arc<V>),
    /// The last fetch failed and there is no data to fall back on.
    Error(E),
}

impl<V, E> QueryState<V, E> {
    /// Data, if any.
    pub fn data(&self) -> Option<&Arc<V>> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Whether the query is still waiting for its first result.
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }
}

#[derive(Debug)]
struct CacheEntry<V, E> {
    data: Option<Arc<V>>,
    error: Option<E>,
    last_fetched: Option<Instant>,
    observers: usize,
    released_at: Option<Instant>,
    fetching: bool,
}

impl<V, E> CacheEntry<V, E> {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            last_fetched: None,
            observers: 0,
            released_at: Some(Instant::now()),
            fetching: false,
        }
    }

    fn is_stale(&self, options: &QueryOptions, now: Instant) -> bool {
        match (self.data.as_ref(), self.last_fetched) {
            (Some(_), Some(fetched)) => now.saturating_duration_since(fetched) >= options.stale_time,
            _ => true,
        }
    }
}

/// Cache of query results keyed by `K`.
#[derive(Debug)]
pub struct QueryCache<K, V, E> {
    entries: HashMap<K, CacheEntry<V, E>>,
}

impl<K, V, E> Default for QueryCache<K, V, E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V, E> QueryCache<K, V, E>
where
    K: Eq + Hash + Clone + Display,
    E: Clone + Display,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry exists for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Starts observing `key`, creating its entry if needed.
    pub fn observe(&mut self, key: &K) {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(CacheEntry::new);
        entry.observers += 1;
        entry.released_at = None;
    }

    /// Stops observing `key`; its retention clock starts when the last
    /// observer leaves.
    pub fn release(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.observers = entry.observers.saturating_sub(1);
            if entry.observers == 0 {
                entry.released_at = Some(Instant::now());
            }
        }
    }

    /// Whether observing `key` under `options` calls for a request.
    ///
    /// Disabled queries never fetch, and neither does a key whose fetch is
    /// already in flight. Otherwise a fetch is due when there is no data or
    /// the data is at least `stale_time` old.
    pub fn needs_fetch(&self, key: &K, options: &QueryOptions) -> bool {
        if !options.enabled {
            return false;
        }
        self.entries
            .get(key)
            .is_none_or(|entry| !entry.fetching && entry.is_stale(options, Instant::now()))
    }

    /// Whether a fetch for `key` has started and not yet settled.
    pub fn is_fetching(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.fetching)
    }

    /// Records the outcome of a fetch for `key`.
    ///
    /// Success replaces the data and clears the error. Failure keeps any
    /// earlier data and stores the error. Either way the key is no longer
    /// in flight.
    pub fn settle(&mut self, key: &K, result: Result<V, E>) {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(CacheEntry::new);
        entry.fetching = false;
        match result {
            Ok(data) => {
                debug!("Query {} settled with data", key);
                entry.data = Some(Arc::new(data));
                entry.error = None;
                entry.last_fetched = Some(Instant::now());
            }
            Err(e) => {
                warn!("Query {} failed: {}", key, e);
                entry.error = Some(e);
            }
        }
    }

    /// Current state of `key`.
    pub fn state(&self, key: &K) -> QueryState<V, E> {
        match self.entries.get(key) {
            Some(CacheEntry {
                data: Some(data), ..
            }) => QueryState::Success(Arc::clone(data)),
            Some(CacheEntry {
                error: Some(e), ..
            }) => QueryState::Error(e.clone()),
            _ => QueryState::Pending,
        }
    }

    /// Data for `key`, if any.
    pub fn data(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).and_then(|entry| entry.data.clone())
    }

    /// Last error recorded for `key`, if any.
    pub fn error(&self, key: &K) -> Option<&E> {
        self.entries.get(key).and_then(|entry| entry.error.as_ref())
    }

    /// Starts a fetch of `key` through `fetcher` if its data is missing or stale.
    ///
    /// Returns `None` on a cache hit. Otherwise the key is marked in flight and
    /// the returned future runs the fetch with the retries of `options`. It
    /// does not borrow the cache: the caller awaits it whenever it likes and
    /// hands the outcome back through [`settle`](Self::settle).
    pub fn fetch_task<F, Fut>(
        &mut self,
        key: &K,
        options: &QueryOptions,
        fetcher: F,
    ) -> Option<impl Future<Output = (K, Result<V, E>)>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if !self.needs_fetch(key, options) {
            debug!("Query {} served from cache", key);
            return None;
        }
        self.entries
            .entry(key.clone())
            .or_insert_with(CacheEntry::new)
            .fetching = true;

        let key = key.clone();
        let options = options.clone();
        Some(async move {
            let result = run_with_retry(&options, fetcher).await;
            (key, result)
        })
    }

    /// Evicts entries that have had no observer for longer than `cache_time`.
    ///
    /// Returns the number of entries removed.
    pub fn collect_garbage(&mut self, cache_time: std::time::Duration) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let expired = entry.observers == 0
                && entry
                    .released_at
                    .is_some_and(|released| now.saturating_duration_since(released) > cache_time);
            if expired {
                debug!("Evicting unobserved query {}", key);
            }
            !expired
        });
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    type TestCache = QueryCache<String, Vec<u32>, String>;

    fn key(s: &str) -> String {
        s.to_string()
    }

    fn no_retry() -> QueryOptions {
        QueryOptions {
            retry: 0,
            ..Default::default()
        }
    }

    /// Runs a fetch of `k` to completion and settles it. `None` means a cache hit.
    async fn fetch_and_settle<F, Fut>(
        cache: &mut TestCache,
        k: &str,
        options: &QueryOptions,
        fetcher: F,
    ) -> Option<Result<(), String>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<u32>, String>>,
    {
        let (key, result) = cache.fetch_task(&key(k), options, fetcher)?.await;
        let outcome = result.as_ref().map(|_| ()).map_err(String::clone);
        cache.settle(&key, result);
        Some(outcome)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_observe_fetches() {
        let mut cache = TestCache::new();
        let calls = Cell::new(0);
        cache.observe(&key("all"));
        let outcome = fetch_and_settle(&mut cache, "all", &no_retry(), || {
            calls.set(calls.get() + 1);
            async { Ok(vec![1, 2, 3]) }
        })
        .await;
        assert_eq!(outcome, Some(Ok(())));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.data(&key("all")).as_deref(), Some(&vec![1, 2, 3]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_data_is_not_refetched() {
        let mut cache = TestCache::new();
        let calls = Cell::new(0);
        let options = no_retry();
        for _ in 0..3 {
            fetch_and_settle(&mut cache, "all", &options, || {
                calls.set(calls.get() + 1);
                async { Ok(vec![1]) }
            })
            .await;
            tokio::time::advance(Duration::from_secs(10 * 60)).await;
        }
        assert_eq!(calls.get(), 1, "data younger than an hour comes from the cache");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_data_is_refetched() {
        let mut cache = TestCache::new();
        let options = no_retry();
        cache.settle(&key("all"), Ok(vec![1]));
        assert!(!cache.needs_fetch(&key("all"), &options));

        tokio::time::advance(options.stale_time).await;
        assert!(cache.needs_fetch(&key("all"), &options));

        let outcome = fetch_and_settle(&mut cache, "all", &options, || async { Ok(vec![2]) }).await;
        assert_eq!(outcome, Some(Ok(())));
        assert_eq!(cache.data(&key("all")).as_deref(), Some(&vec![2]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_query_never_fetches() {
        let mut cache = TestCache::new();
        let calls = Cell::new(0);
        let options = QueryOptions::default().enabled(false);
        let outcome = fetch_and_settle(&mut cache, "search", &options, || {
            calls.set(calls.get() + 1);
            async { Ok(vec![1]) }
        })
        .await;
        assert_eq!(outcome, None);
        assert_eq!(calls.get(), 0);
        assert!(!cache.contains(&key("search")));
        assert!(cache.state(&key("search")).is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_retried_once_then_reported() {
        let mut cache = TestCache::new();
        let calls = Cell::new(0);
        let options = QueryOptions::default();
        let outcome = fetch_and_settle(&mut cache, "bad", &options, || {
            calls.set(calls.get() + 1);
            async { Err("404".to_string()) }
        })
        .await;
        assert_eq!(outcome, Some(Err("404".to_string())));
        assert_eq!(calls.get(), 2, "first attempt plus one retry");
        assert_eq!(cache.state(&key("bad")), QueryState::Error("404".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refetch_keeps_old_data() {
        let mut cache = TestCache::new();
        let options = no_retry();
        cache.settle(&key("all"), Ok(vec![1]));
        tokio::time::advance(options.stale_time).await;

        let outcome =
            fetch_and_settle(&mut cache, "all", &options, || async { Err("down".to_string()) }).await;
        assert!(matches!(outcome, Some(Err(_))));
        assert_eq!(cache.data(&key("all")).as_deref(), Some(&vec![1]));
        assert_eq!(cache.error(&key("all")), Some(&"down".to_string()));
        assert!(cache.state(&key("all")).data().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_key_is_not_fetched_twice() {
        let mut cache = TestCache::new();
        let options = no_retry();
        let first = cache
            .fetch_task(&key("slow"), &options, || async { Ok(vec![1]) })
            .expect("first fetch starts");
        assert!(cache.is_fetching(&key("slow")));
        assert!(cache
            .fetch_task(&key("slow"), &options, || async { Ok(vec![2]) })
            .is_none());

        let (k, result) = first.await;
        cache.settle(&k, result);
        assert!(!cache.is_fetching(&key("slow")));
        assert_eq!(cache.data(&key("slow")).as_deref(), Some(&vec![1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_error() {
        let mut cache = TestCache::new();
        cache.settle(&key("q"), Err("nope".to_string()));
        assert!(cache.needs_fetch(&key("q"), &no_retry()));
        cache.settle(&key("q"), Ok(vec![5]));
        assert_eq!(cache.error(&key("q")), None);
        assert_eq!(cache.state(&key("q")), QueryState::Success(Arc::new(vec![5])));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unobserved_entries_evicted_after_cache_time() {
        let mut cache = TestCache::new();
        let cache_time = QueryOptions::default().cache_time;

        cache.observe(&key("kept"));
        cache.settle(&key("kept"), Ok(vec![1]));
        cache.observe(&key("dropped"));
        cache.settle(&key("dropped"), Ok(vec![2]));
        cache.release(&key("dropped"));

        tokio::time::advance(cache_time).await;
        assert_eq!(cache.collect_garbage(cache_time), 0, "not past the limit yet");

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.collect_garbage(cache_time), 1);
        assert!(cache.contains(&key("kept")));
        assert!(!cache.contains(&key("dropped")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reobserve_stops_eviction_clock() {
        let mut cache = TestCache::new();
        let cache_time = Duration::from_secs(60);
        cache.observe(&key("q"));
        cache.settle(&key("q"), Ok(vec![1]));
        cache.release(&key("q"));
        tokio::time::advance(Duration::from_secs(30)).await;
        cache.observe(&key("q"));
        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(cache.collect_garbage(cache_time), 0);
        assert_eq!(cache.len(), 1);
    }
}
