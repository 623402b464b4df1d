//! Retry strategy for query fetches.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;

use super::QueryOptions;
use crate::config::RETRY_MAX_DELAY;

/// Creates the backoff schedule for a query.
///
/// Yields `options.retry` delays: `retry_delay`, then twice that, and so on,
/// each capped at `RETRY_MAX_DELAY`. An empty schedule means a single attempt.
pub fn get_retry_strategy(options: &QueryOptions) -> impl Iterator<Item = Duration> {
    // ExponentialBackoff yields base^n * factor starting at n = 1, so base 2 with
    // half the delay as factor gives delay, 2*delay, 4*delay, ...
    let half_delay_ms = u64::try_from(options.retry_delay.as_millis() / 2).unwrap_or(u64::MAX);
    ExponentialBackoff::from_millis(2)
        .factor(half_delay_ms)
        .max_delay(RETRY_MAX_DELAY)
        .take(options.retry)
}

/// Runs `fetcher` until it succeeds or the retry schedule is exhausted.
///
/// The last error is returned when every attempt fails.
pub async fn run_with_retry<V, E, F, Fut>(options: &QueryOptions, mut fetcher: F) -> Result<V, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    let mut attempt = 0usize;
    let max_attempts = options.retry + 1;
    Retry::spawn(get_retry_strategy(options), move || {
        attempt += 1;
        let fut = fetcher();
        async move {
            let result = fut.await;
            if let Err(e) = &result {
                debug!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
            }
            result
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn options(retry: usize, delay_ms: u64) -> QueryOptions {
        QueryOptions {
            retry,
            retry_delay: Duration::from_millis(delay_ms),
            ..Default::default()
        }
    }

    #[test]
    fn test_retry_strategy_doubles_from_base_delay() {
        let delays: Vec<Duration> = get_retry_strategy(&options(3, 1000)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000)
            ]
        );
    }

    #[test]
    fn test_retry_strategy_capped() {
        let delays: Vec<Duration> = get_retry_strategy(&options(10, 1000)).collect();
        assert_eq!(delays.len(), 10);
        assert!(delays.iter().all(|d| *d <= RETRY_MAX_DELAY));
        assert_eq!(delays[9], RETRY_MAX_DELAY);
    }

    #[test]
    fn test_retry_strategy_zero_retries() {
        assert_eq!(get_retry_strategy(&options(0, 1000)).count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_retry_gives_up_after_retries() {
        let calls = AtomicUsize::new(0);
        let result: Result<(), String> = run_with_retry(&options(1, 1000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("boom".to_string()) }
        })
        .await;
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2, "one attempt plus one retry");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_retry_recovers_on_second_attempt() {
        let calls = AtomicUsize::new(0);
        let result: Result<u32, String> = run_with_retry(&options(1, 1000), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err("transient".to_string())
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_retry_waits_before_retrying() {
        let start = tokio::time::Instant::now();
        let _: Result<(), String> =
            run_with_retry(&options(2, 1000), || async { Err("down".to_string()) }).await;
        // 1s + 2s of backoff on the paused clock
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "waited {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(4), "waited {:?}", elapsed);
    }
}
