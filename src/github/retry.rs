//! Bounded retry for endpoints that answer "accepted, try later".
//!
//! GitHub computes repository statistics lazily and answers `202 Accepted`
//! until they are ready. The policy here is a plain value so it can be
//! exercised without a network or real delays.

use crate::error::{Error, Result};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Abstraction over waiting between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Retry policy: how many attempts, how long to wait, and which statuses retry.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub retry_on: fn(StatusCode) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_secs(5),
            retry_on: is_still_computing,
        }
    }
}

/// GitHub's "statistics are being generated" answer.
pub fn is_still_computing(status: StatusCode) -> bool {
    status == StatusCode::ACCEPTED
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            ..Self::default()
        }
    }

    /// Run `op` until it returns a non-retryable status or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. Transport errors are not
    /// retried. Exhausting the attempts yields [`Error::NotReady`].
    pub async fn run<T, F, Fut, S>(&self, sleeper: &S, mut op: F) -> Result<(StatusCode, T)>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<(StatusCode, T)>>,
        S: Sleeper,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let (status, value) = op(attempt).await?;

            if !(self.retry_on)(status) {
                return Ok((status, value));
            }

            if attempt >= max_attempts {
                return Err(Error::NotReady { attempts: attempt });
            }

            debug!(
                "Attempt {}/{} returned {}, retrying in {:?}",
                attempt, max_attempts, status, self.delay
            );
            sleeper.sleep(self.delay).await;
            attempt += 1;
        }
    }
}
