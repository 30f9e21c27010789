use backon::{BackoffBuilder, Retryable};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::IsRetryable;

/// Bounded retry with linear backoff: the n-th retry waits `base_delay * n`, no jitter.
///
/// `max_attempts` counts the first try, so `3` means at most two retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(2000))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(cfg.retry_max_attempts, cfg.retry_base_delay())
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Runs `op` until it succeeds, `should_retry` rejects the error, or attempts run out.
    pub async fn run<T, E, Fut, F, P>(self, op: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&E) -> bool,
        E: Display,
    {
        op.retry(self)
            .when(should_retry)
            .notify(|err: &E, dur: Duration| {
                tracing::error!("[Retry] {err} retry after {dur:?}");
            })
            .await
    }

    /// [`run`](Self::run) with the error's own [`IsRetryable`] classification.
    pub async fn run_classified<T, E, Fut, F>(self, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: IsRetryable + Display,
    {
        self.run(op, |err: &E| err.is_retryable()).await
    }
}

impl BackoffBuilder for RetryPolicy {
    type Backoff = LinearBackoff;

    fn build(self) -> Self::Backoff {
        LinearBackoff {
            base_delay: self.base_delay,
            retries_left: self.max_attempts.saturating_sub(1),
            attempt: 0,
        }
    }
}

/// Delay sequence produced by [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base_delay: Duration,
    retries_left: usize,
    attempt: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.retries_left == 0 {
            return None;
        }
        self.retries_left -= 1;
        self.attempt = self.attempt.saturating_add(1);
        Some(self.base_delay.saturating_mul(self.attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Flaky(bool);

    impl Display for Flaky {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(if self.0 { "transient" } else { "fatal" })
        }
    }

    impl IsRetryable for Flaky {
        fn is_retryable(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn delays_grow_linearly_without_jitter() {
        let delays: Vec<_> = RetryPolicy::new(4, Duration::from_millis(2000))
            .build()
            .collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(2000),
                Duration::from_millis(4000),
                Duration::from_millis(6000),
            ]
        );
    }

    #[test]
    fn single_attempt_never_sleeps() {
        assert_eq!(RetryPolicy::new(1, Duration::from_secs(1)).build().count(), 0);
        assert_eq!(RetryPolicy::new(0, Duration::from_secs(1)).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_attempt_budget() {
        let calls = Cell::new(0);
        let result: Result<(), Flaky> = RetryPolicy::default()
            .run_classified(|| {
                calls.set(calls.get() + 1);
                async { Err(Flaky(true)) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_short_circuits() {
        let calls = Cell::new(0);
        let start = tokio::time::Instant::now();
        let result: Result<(), Flaky> = RetryPolicy::default()
            .run_classified(|| {
                calls.set(calls.get() + 1);
                async { Err(Flaky(false)) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_predicate_overrides_classification() {
        let calls = Cell::new(0);
        let result: Result<u8, Flaky> = RetryPolicy::new(5, Duration::from_millis(10))
            .run(
                || {
                    let n = calls.get() + 1;
                    calls.set(n);
                    async move { if n < 4 { Err(Flaky(false)) } else { Ok(7) } }
                },
                |_| true,
            )
            .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.get(), 4);
    }
}
