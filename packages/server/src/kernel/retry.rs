//! Bounded retry with exponential backoff.
//!
//! The only retry policy in the pipeline: rate-limited text-generation calls
//! are retried a fixed number of times, everything else fails immediately.
//! Implemented once and parameterized by a retryability predicate, since the
//! same pattern recurs at both optimizer call sites.

use std::future::Future;
use std::time::Duration;

/// Retries after the initial attempt.
pub const RATE_LIMIT_RETRIES: u32 = 3;

/// First backoff delay; doubles per retry (2s, 4s, 8s).
pub const RATE_LIMIT_BASE_DELAY: Duration = Duration::from_secs(2);

/// Run `op`, retrying up to `max_retries` times while `is_retryable` holds,
/// sleeping `base_delay * 2^n` between attempts. The final error is returned
/// unchanged once retries are exhausted or the error is not retryable.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    max_retries: u32,
    base_delay: Duration,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries && is_retryable(&e) => {
                let delay = base_delay * 2u32.pow(attempt);
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Retryable failure, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, TestError> =
            retry_with_backoff(3, Duration::from_secs(2), |_| true, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, TestError> = retry_with_backoff(
            3,
            Duration::from_secs(2),
            |e| *e == TestError::Transient,
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(TestError::Transient)
                    } else {
                        Ok(42)
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_retry_bound() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, TestError> =
            retry_with_backoff(3, Duration::from_secs(2), |_| true, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Transient) }
            })
            .await;

        assert_eq!(result.unwrap_err(), TestError::Transient);
        // Initial attempt plus the fixed retry bound, never more.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_errors_fail_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, TestError> = retry_with_backoff(
            3,
            Duration::from_secs(2),
            |e| *e == TestError::Transient,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Fatal) }
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), TestError::Fatal);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
