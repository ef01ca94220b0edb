//! Resilience primitives for outbound calls

pub mod retry;

pub use retry::{
    retry_with_policy, Jitter, RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryPolicy,
};
