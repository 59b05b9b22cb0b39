use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Controls how often and how long a failed operation is retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries allowed after the first failure
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,

    /// Ceiling the backoff never exceeds, in milliseconds
    pub max_delay_ms: u64,

    /// Factor applied to the delay after each failed attempt
    pub backoff_multiplier: f64,

    /// Randomize each delay so replicas do not retry in lockstep
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Defaults: 3 retries, 100ms initial delay doubling up to 5s, jitter on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the delay before the first retry
    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Override the delay ceiling
    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    /// Turn jitter off, for tests that assert on timing
    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Runs `operation` until it succeeds or the retry budget is spent.
///
/// The delay between attempts grows by `backoff_multiplier` each time,
/// capped at `max_delay_ms`. The terminal error is returned unchanged.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_backoff, RetryConfig};
///
/// let config = RetryConfig::new().with_max_retries(5);
///
/// let client = retry_with_backoff(
///     || async { database::mongodb::connect(&mongo_url).await },
///     config,
/// ).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempts = 0;
    let mut base_delay = config.initial_delay_ms;

    loop {
        match operation().await {
            Ok(value) => {
                if attempts > 0 {
                    debug!("Operation succeeded after {} retries", attempts);
                }
                return Ok(value);
            }
            Err(e) => {
                attempts += 1;

                if attempts > config.max_retries {
                    warn!(
                        "Operation failed after {} attempts: {}",
                        config.max_retries, e
                    );
                    return Err(e);
                }

                let wait = if config.use_jitter {
                    apply_jitter(base_delay)
                } else {
                    base_delay
                };

                debug!(
                    "Attempt {}/{} failed: {}. Next try in {}ms",
                    attempts, config.max_retries, e, wait
                );

                tokio::time::sleep(Duration::from_millis(wait)).await;

                base_delay = ((base_delay as f64 * config.backoff_multiplier) as u64)
                    .min(config.max_delay_ms);
            }
        }
    }
}

/// Scales a delay by a pseudo-random factor in [0.5, 1.0].
///
/// Hashing the current time through `RandomState` is random enough to spread
/// retries out without pulling in a dedicated rng crate.
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let hash = RandomState::new().hash_one(std::time::SystemTime::now());
    let factor = 0.5 + (hash % 50) as f64 / 100.0;

    (delay as f64 * factor) as u64
}

/// [`retry_with_backoff`] with the default [`RetryConfig`].
///
/// # Example
/// ```ignore
/// use database::common::retry::retry;
///
/// let client = retry(|| async {
///     database::mongodb::connect(&mongo_url).await
/// }).await?;
/// ```
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_first_success_needs_no_retry() {
        let calls = AtomicU32::new(0);

        let result = retry(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>("done")
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_within_retry_budget() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig::new().with_initial_delay(10).without_jitter();

        let result = retry_with_backoff(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(format!("attempt {} failed", n + 1))
                } else {
                    Ok("done")
                }
            },
            config,
        )
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_budget_spent() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(10)
            .without_jitter();

        let result = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>("always fails")
            },
            config,
        )
        .await;

        assert_eq!(result.unwrap_err(), "always fails");
        // One initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_builder_overrides_defaults() {
        let config = RetryConfig::new()
            .with_max_retries(5)
            .with_initial_delay(200)
            .with_max_delay(10000)
            .without_jitter();

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 10000);
        assert!(!config.use_jitter);
    }

    #[test]
    fn test_jitter_stays_within_half_to_full_delay() {
        for _ in 0..10 {
            let jittered = apply_jitter(1000);
            assert!((500..=1000).contains(&jittered));
        }
    }

    #[tokio::test]
    async fn test_delays_grow_between_attempts() {
        let config = RetryConfig::new()
            .with_max_retries(3)
            .with_initial_delay(50)
            .without_jitter();
        let start = std::time::Instant::now();

        let _ = retry_with_backoff(
            || async { Err::<String, _>("fail") },
            config,
        )
        .await;

        // Sleeps of 50 + 100 + 200 ms before giving up
        assert!(start.elapsed().as_millis() >= 300);
    }
}
