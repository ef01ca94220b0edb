//! Bounded retry with jittered exponential backoff
//!
//! Wraps a single retryable operation. The policy decides which errors are
//! transient; the executor enforces both an attempt ceiling and a total
//! time budget so a flapping endpoint cannot hold a caller hostage.
//!
//! Backoff is exponential with equal jitter (delay/2 + uniform(0,
//! delay/2)), the standard choice for avoiding thundering-herd retries.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors produced by the retry executor. Every variant carries the last
/// underlying error so nothing is swallowed.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// All retry attempts have been exhausted
    #[error("all {attempts} retry attempts exhausted: {last}")]
    AttemptsExhausted { attempts: u32, last: E },

    /// The operation failed with a non-retryable error
    #[error("non-retryable error: {last}")]
    NonRetryable { last: E },

    /// The total retry time budget was exceeded
    #[error("retry time budget exceeded after {elapsed:?}: {last}")]
    TimeBudgetExceeded { elapsed: Duration, last: E },
}

impl<E> RetryError<E> {
    /// The last error the operation returned.
    pub fn into_inner(self) -> E {
        match self {
            Self::AttemptsExhausted { last, .. }
            | Self::NonRetryable { last }
            | Self::TimeBudgetExceeded { last, .. } => last,
        }
    }
}

/// Decision for whether to retry an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry with the configured backoff delay
    Retry,
    /// Retry after a specific delay (e.g. from a Retry-After header)
    RetryAfter(Duration),
    /// Surface the error immediately
    Stop,
}

/// Determines whether an error should be retried
pub trait RetryPolicy<E> {
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision;
}

impl<F, E> RetryPolicy<E> for F
where
    F: Fn(&E, u32) -> RetryDecision,
{
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision {
        self(error, attempt)
    }
}

/// Jitter applied to the calculated backoff delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// No jitter (deterministic; useful in tests)
    None,
    /// Equal jitter: delay/2 + uniform(0, delay/2)
    Equal,
    /// Full jitter: uniform(0, delay)
    Full,
}

impl Jitter {
    fn apply(self, delay: Duration) -> Duration {
        let millis = delay.as_millis() as u64;
        if millis == 0 {
            return delay;
        }
        let mut rng = rand::thread_rng();
        match self {
            Self::None => delay,
            Self::Equal => Duration::from_millis(millis / 2 + rng.gen_range(0..=millis / 2)),
            Self::Full => Duration::from_millis(rng.gen_range(0..=millis)),
        }
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempt ceiling (initial try + retries)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Multiplier applied per retry
    pub factor: f64,
    /// Per-retry delay cap
    pub max_delay: Duration,
    /// Jitter applied to each delay
    pub jitter: Jitter,
    /// Total time budget across all attempts and delays
    pub max_total_time: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            factor: 2.0,
            max_delay: Duration::from_secs(10),
            jitter: Jitter::Equal,
            max_total_time: Some(Duration::from_secs(60)),
        }
    }
}

impl RetryConfig {
    /// Config for confirmation-style calls: up to 8 attempts within the
    /// default time budget.
    #[must_use]
    pub fn confirmation() -> Self {
        Self { max_attempts: 8, ..Self::default() }
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    #[must_use]
    pub fn no_jitter(mut self) -> Self {
        self.jitter = Jitter::None;
        self
    }

    #[must_use]
    pub fn max_total_time(mut self, budget: Duration) -> Self {
        self.max_total_time = Some(budget);
        self
    }

    /// Backoff delay (before jitter) for the given 0-based attempt.
    fn delay_for(&self, attempt: u32) -> Duration {
        let millis = self.initial_delay.as_millis() as f64 * self.factor.powi(attempt as i32);
        let capped = millis.min(self.max_delay.as_millis() as f64) as u64;
        Duration::from_millis(capped)
    }
}

/// Retry executor binding a config to a policy
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
}

impl<P> RetryExecutor<P> {
    pub fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// Execute `operation`, retrying per the policy until it succeeds, the
    /// policy stops it, or a budget runs out.
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(retries = attempt, "operation succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    let attempts_made = attempt + 1;
                    if attempts_made >= self.config.max_attempts {
                        warn!(attempts = attempts_made, error = %error,
                            "retry attempts exhausted");
                        return Err(RetryError::AttemptsExhausted {
                            attempts: attempts_made,
                            last: error,
                        });
                    }

                    let delay = match self.policy.should_retry(&error, attempt) {
                        RetryDecision::Stop => {
                            debug!(error = %error, "error is not retryable");
                            return Err(RetryError::NonRetryable { last: error });
                        }
                        RetryDecision::Retry => {
                            self.config.jitter.apply(self.config.delay_for(attempt))
                        }
                        RetryDecision::RetryAfter(custom) => custom,
                    };

                    if let Some(budget) = self.config.max_total_time {
                        if started.elapsed() + delay >= budget {
                            warn!(elapsed = ?started.elapsed(), error = %error,
                                "retry time budget exceeded");
                            return Err(RetryError::TimeBudgetExceeded {
                                elapsed: started.elapsed(),
                                last: error,
                            });
                        }
                    }

                    warn!(attempt = attempts_made, ?delay, error = %error,
                        "operation failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Convenience wrapper constructing an executor for a single call.
pub async fn retry_with_policy<F, Fut, T, E, P>(
    config: RetryConfig,
    policy: P,
    operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: RetryPolicy<E>,
    E: fmt::Display,
{
    RetryExecutor::new(config, policy).execute(operation).await
}
