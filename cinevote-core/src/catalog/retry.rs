use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::{CoreError, Result};

/// How a single attempt failed.
#[derive(Debug)]
pub enum AttemptError {
    /// Transport failure or non-success status; worth another attempt.
    Retryable(String),
    /// Returned immediately without further attempts.
    Fatal(CoreError),
}

/// Fixed-delay retry with a bounded number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Runs `operation` until it succeeds, fails fatally, or the attempts
    /// are used up. Exhaustion is reported as `CatalogUnavailable` carrying
    /// the last failure.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt_fn: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            match attempt_fn().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Retryable(reason)) if attempt < max_attempts => {
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %reason,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(AttemptError::Retryable(reason)) => {
                    error!(
                        operation,
                        attempts = attempt,
                        error = %reason,
                        "Giving up after max attempts"
                    );
                    return Err(CoreError::CatalogUnavailable {
                        attempts: attempt,
                        reason,
                    });
                }
            }
        }
    }
}
