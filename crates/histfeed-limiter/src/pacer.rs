//! Sliding-window request pacer.

use std::collections::VecDeque;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::trace;

/// Length of the trailing window over which the limit is enforced.
const WINDOW: Duration = Duration::from_secs(1);

/// Admission controller enforcing at most `limit` grants in any trailing
/// one-second window, across arbitrarily many concurrent callers.
///
/// The entire check-then-append runs under one lock; two callers can never
/// jointly observe a free slot and both take it. `acquire` never fails, it
/// only delays — callers wanting a bounded wait wrap it with their own
/// cancellation. A caller cancelled while waiting has not recorded a grant.
pub struct RequestPacer {
    limit: usize,
    window: Mutex<VecDeque<Instant>>,
}

impl RequestPacer {
    /// Create a pacer granting at most `limit` admissions per second.
    ///
    /// # Panics
    /// Panics if `limit` is zero.
    pub fn new(limit: usize) -> Self {
        assert!(limit > 0, "pacer limit must be positive");
        Self {
            limit,
            window: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    /// Wait for an admission slot and record the grant.
    ///
    /// Returns the grant timestamp. Grants are handed out in roughly the
    /// order requested under contention, but no hard FIFO order is
    /// guaranteed.
    pub async fn acquire(&self) -> Instant {
        loop {
            let wake_at = {
                let mut window = self.window.lock().await;
                let now = Instant::now();
                Self::evict(&mut window, now);
                if window.len() < self.limit {
                    window.push_back(now);
                    return now;
                }
                // The oldest grant leaves the window exactly one period
                // after it was recorded.
                window[0] + WINDOW
            };
            trace!(limit = self.limit, "admission window saturated, waiting");
            sleep_until(wake_at).await;
        }
    }

    /// Number of grants still inside the trailing window. Read-only view
    /// for diagnostics and tests.
    pub async fn active_grants(&self) -> usize {
        let window = self.window.lock().await;
        let now = Instant::now();
        window.iter().filter(|&&t| t + WINDOW > now).count()
    }

    /// Configured per-second limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn evict(window: &mut VecDeque<Instant>, now: Instant) {
        while window.front().is_some_and(|&t| t + WINDOW <= now) {
            window.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_grants_within_limit_are_immediate() {
        let pacer = RequestPacer::new(5);
        let start = Instant::now();
        for _ in 0..5 {
            pacer.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(200));
        assert_eq!(pacer.active_grants().await, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_saturated_acquire_waits_full_window() {
        let pacer = RequestPacer::new(5);
        for _ in 0..5 {
            pacer.acquire().await;
        }
        let start = Instant::now();
        pacer.acquire().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(900), "waited {:?}", waited);
        assert!(waited <= Duration::from_millis(1100), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_batch_respects_window_bound() {
        let pacer = Arc::new(RequestPacer::new(10));
        let start = Instant::now();

        let grants = join_all((0..50).map(|_| {
            let pacer = Arc::clone(&pacer);
            async move { pacer.acquire().await }
        }))
        .await;

        // 50 grants at 10/s need at least ceil(50/10) - 1 = 4 seconds.
        assert!(start.elapsed() >= Duration::from_secs(4));

        let mut grants = grants;
        grants.sort();
        for pair in grants.windows(11) {
            let spread = pair[10] - pair[0];
            assert!(
                spread >= WINDOW,
                "11 grants inside one window, spread {:?}",
                spread
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interleaved_tasks_never_exceed_limit() {
        let pacer = Arc::new(RequestPacer::new(3));
        let handles: Vec<_> = (0..9)
            .map(|_| {
                let pacer = Arc::clone(&pacer);
                tokio::spawn(async move { pacer.acquire().await })
            })
            .collect();

        let mut grants = Vec::new();
        for handle in handles {
            grants.push(handle.await.unwrap());
        }
        grants.sort();
        for pair in grants.windows(4) {
            assert!(pair[3] - pair[0] >= WINDOW);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_waiter_records_no_grant() {
        let pacer = Arc::new(RequestPacer::new(1));
        pacer.acquire().await;

        let waiter = {
            let pacer = Arc::clone(&pacer);
            tokio::spawn(async move { pacer.acquire().await })
        };
        // Let the waiter reach its retry-sleep, then cancel it.
        tokio::time::sleep(Duration::from_millis(10)).await;
        waiter.abort();
        assert!(waiter.await.is_err());

        assert_eq!(pacer.active_grants().await, 1);

        // The slot frees on schedule; the cancelled waiter left no trace.
        let start = Instant::now();
        pacer.acquire().await;
        assert!(start.elapsed() <= Duration::from_millis(1100));
        assert_eq!(pacer.active_grants().await, 1);
    }

    #[test]
    #[should_panic(expected = "pacer limit must be positive")]
    fn test_zero_limit_panics() {
        RequestPacer::new(0);
    }
}
