use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Sliding-window rate limiter: at most `max_calls` per `window`.
///
/// Doubles as the scan job's inter-fetch pacer via [`RateLimiter::min_gap`]:
/// one call per window means provider calls are spaced a fixed minimum
/// apart. Built on tokio time, so tests run it under a paused clock.
#[derive(Clone)]
pub struct RateLimiter {
    history: Arc<Mutex<VecDeque<Instant>>>,
    max_calls: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::new())),
            max_calls,
            window,
        }
    }

    /// A limiter that spaces successive calls at least `gap` apart
    pub fn min_gap(gap: Duration) -> Self {
        Self::new(1, gap)
    }

    /// Wait until a call slot is free, then claim it
    pub async fn acquire(&self) {
        loop {
            let mut history = self.history.lock().await;
            let now = Instant::now();

            while history
                .front()
                .is_some_and(|&t| now.duration_since(t) >= self.window)
            {
                history.pop_front();
            }

            if history.len() < self.max_calls {
                history.push_back(now);
                return;
            }

            // Sleep until the oldest call leaves the window, then re-check
            let oldest = *history.front().expect("history non-empty at capacity");
            drop(history);
            tokio::time::sleep_until(oldest + self.window).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn min_gap_spaces_successive_calls() {
        let limiter = RateLimiter::min_gap(Duration::from_secs(1));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        // Third call cannot land before two full gaps have elapsed
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn burst_within_limit_is_immediate() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn over_limit_call_waits_for_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(30));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(30));
    }
}
