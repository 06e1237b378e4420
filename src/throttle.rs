use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep, Instant};

pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Minimum spacing between calls made through one session.
///
/// [`Throttle::acquire`] holds the lock until the returned guard records the
/// completion time, so concurrent callers queue up instead of racing on a
/// stale timestamp.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

#[derive(Debug)]
pub struct ThrottleGuard<'a> {
    last_request: MutexGuard<'a, Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the interval since the last recorded request has passed.
    pub async fn acquire(&self) -> ThrottleGuard<'_> {
        let last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::trace!(wait_ms = wait.as_millis() as u64, "throttling request");
                sleep(wait).await;
            }
        }

        ThrottleGuard { last_request }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MIN_INTERVAL)
    }
}

impl ThrottleGuard<'_> {
    /// Marks now as the time of the last request and releases the lock.
    pub fn record(mut self) {
        *self.last_request = Some(Instant::now());
    }
}
