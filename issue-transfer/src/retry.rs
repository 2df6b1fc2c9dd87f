//! Bounded retry with a fixed delay.

use crate::host::ApiError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default delay between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Fixed retry policy: up to `retries` extra attempts, `delay` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Returns the number of retries after the first attempt.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `operation`, repeating it while it fails with a retryable error
    /// and retries remain.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted or the error is not
    /// retryable.
    pub async fn run<T, F, Fut>(&self, what: &str, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        operation = what,
                        attempt,
                        max_retries = self.retries,
                        delay_secs = self.delay.as_secs_f64(),
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES, DEFAULT_DELAY)
    }
}
