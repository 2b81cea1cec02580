use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::Result;

/// Fixed-delay retry settings for calls to the transcript backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first one
    pub max_attempts: u32,

    /// Pause after each failed attempt except the last
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Something that can pause between attempts
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// Every failure is treated as retryable. `on_retry` is told about each failed
/// attempt that will be retried; the error of the final attempt is returned as is.
pub async fn retry<T, F, Fut, R>(
    policy: &RetryPolicy,
    delay: &dyn Delay,
    mut op: F,
    mut on_retry: R,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: FnMut(u32, &anyhow::Error),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                tracing::debug!(
                    "Attempt {}/{} failed, giving up: {:#}",
                    attempt,
                    max_attempts,
                    err
                );
                return Err(err);
            }
            Err(err) => {
                tracing::warn!("Attempt {}/{} failed: {:#}", attempt, max_attempts, err);
                on_retry(attempt, &err);
                delay.wait(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
