//! Bounded retry for filesystem operations.
//!
//! Renaming a just-extracted file can fail transiently while a virus scanner or
//! indexer holds it open. The operation is retried on a fixed interval until it
//! succeeds or the time budget runs out. The wait is a timer, so other tasks
//! on the runtime keep running.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::StencilResult;

/// Delay between attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Total time budget per operation.
pub const RETRY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedRetry {
    interval: Duration,
    timeout: Duration,
}

impl Default for ManagedRetry {
    fn default() -> Self {
        Self::new(RETRY_INTERVAL, RETRY_TIMEOUT)
    }
}

impl ManagedRetry {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Run `op` until it succeeds, it fails with a non-retryable error, or the
    /// budget is spent. The last error is returned on exhaustion.
    pub async fn run<T, F>(&self, mut op: F) -> StencilResult<T>
    where
        F: FnMut() -> StencilResult<T>,
    {
        let started = Instant::now();
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() || started.elapsed() >= self.timeout => {
                    return Err(e);
                }
                Err(e) => {
                    debug!(
                        error = %e,
                        "retrying after {}ms",
                        self.interval.as_millis()
                    );
                    sleep(self.interval).await;
                }
            }
        }
    }
}
