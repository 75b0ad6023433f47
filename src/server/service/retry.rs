//! Retry logic with exponential backoff for upstream operations.
//!
//! This module provides the `RetryPolicy` for executing a single network operation with a
//! per-attempt timeout, automatic retry of transient failures and exponential backoff. It
//! integrates with the error system to determine which errors are retryable.

use std::{future::Future, time::Duration};

use dioxus_logger::tracing;

use crate::server::error::{fetch::FetchError, retry::ErrorRetryStrategy, Error};

/// Policy for executing operations with automatic retry logic.
///
/// The policy holds no mutable state, so a single instance can be shared by any number of
/// concurrent operations.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3 (default), including the first attempt
/// - **Timeout**: 120 seconds per attempt (default), not cumulative across attempts
/// - **Backoff strategy**: Exponential starting at 1 second (1s, 2s, 4s, ...), capped at 60 seconds
/// - **Retry conditions**: Only errors with `ErrorRetryStrategy::Retry` are retried
/// - **Permanent failures**: Errors with `ErrorRetryStrategy::Fail` return immediately
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Upper bound for a single attempt
    timeout: Duration,
    /// Backoff before the first retry (doubles with each retry)
    initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            timeout: Self::DEFAULT_TIMEOUT,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
    pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
    pub const MAX_BACKOFF: Duration = Duration::from_secs(60);

    /// Creates a retry policy; `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, timeout: Duration, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            timeout,
            initial_backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delay before the given retry (1-based), doubling from `initial_backoff` up to
    /// [`Self::MAX_BACKOFF`].
    fn backoff(&self, retry: u32) -> Duration {
        2_u32
            .checked_pow(retry.saturating_sub(1))
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .map_or(Self::MAX_BACKOFF, |backoff| backoff.min(Self::MAX_BACKOFF))
    }

    /// Executes an operation with automatic retry logic and exponential backoff.
    ///
    /// Runs the provided async operation up to `max_attempts` times. Each attempt is bounded
    /// by the per-attempt timeout; an attempt that exceeds it is dropped and counts as a
    /// transient [`FetchError::Timeout`].
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "market section fetch")
    /// - `operation` - Async function producing a fresh attempt each time it is called
    ///
    /// # Returns
    /// - `Ok(R)` - The first successful attempt
    /// - `Err(Error)` - The permanent error, or the last error once all attempts are exhausted
    pub async fn execute<R, F, Fut>(&self, description: &str, operation: F) -> Result<R, Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<R, Error>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            let result = match tokio::time::timeout(self.timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(self.timeout).into()),
            };

            match result {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::error!("Permanent error for {}: {}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.backoff(attempt_count);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}
