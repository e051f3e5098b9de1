/// Sliding-window rate limiter for outbound Gemini calls
///
/// This module implements the process-local limiter consulted before every
/// external generation call. It keeps an ordered list of request instants;
/// on each acquisition attempt it prunes instants older than the window from
/// the front, rejects when the remaining count has reached the threshold,
/// and records the new instant otherwise.
///
/// # Characteristics
///
/// - Sliding window: counts events in the trailing window (default 60s),
///   not fixed calendar buckets
/// - Approximate: acquisitions are serialized by a `Mutex`, but the limiter
///   makes no atomicity promise across the actual API call
/// - Process-local: state resets on restart and is not shared across
///   instances
///
/// # Example
///
/// ```
/// use snaptosell_shared::rate_limit::RateLimiter;
///
/// let limiter = RateLimiter::per_minute(30);
/// match limiter.try_acquire() {
///     Ok(()) => { /* proceed with the upstream call */ }
///     Err(e) => println!("throttled, retry in {}s", e.retry_after),
/// }
/// ```
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default number of upstream requests allowed per window
pub const DEFAULT_MAX_REQUESTS_PER_MINUTE: u32 = 30;

/// Default window width
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Error returned when the window is full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitExceeded {
    /// Seconds until the oldest recorded request leaves the window
    pub retry_after: u64,

    /// The configured per-window limit
    pub limit: u32,
}

impl fmt::Display for RateLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate limit of {} requests per window exceeded. Try again in {} seconds",
            self.limit, self.retry_after
        )
    }
}

impl std::error::Error for RateLimitExceeded {}

/// Sliding-window limiter over request instants
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        RateLimiter {
            max_requests,
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Creates a limiter allowing `max_requests` per 60-second window
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, DEFAULT_WINDOW)
    }

    /// The configured per-window limit
    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    /// Attempts to record a request
    ///
    /// Prunes instants older than the window, then either records the new
    /// instant or rejects with the time until a slot frees up.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitExceeded`] when the trailing window already holds
    /// the configured number of requests.
    pub fn try_acquire(&self) -> Result<(), RateLimitExceeded> {
        self.try_acquire_at(Instant::now())
    }

    /// Number of requests currently inside the window
    pub fn current_usage(&self) -> usize {
        self.usage_at(Instant::now())
    }

    fn try_acquire_at(&self, now: Instant) -> Result<(), RateLimitExceeded> {
        let mut timestamps = self.timestamps.lock().unwrap();

        Self::prune(&mut timestamps, now, self.window);

        if timestamps.len() >= self.max_requests as usize {
            let retry_after = timestamps
                .front()
                .map(|oldest| {
                    let free_at = *oldest + self.window;
                    free_at.saturating_duration_since(now).as_secs().max(1)
                })
                .unwrap_or(1);

            tracing::warn!(
                limit = self.max_requests,
                retry_after,
                "Outbound rate limit reached"
            );

            return Err(RateLimitExceeded {
                retry_after,
                limit: self.max_requests,
            });
        }

        timestamps.push_back(now);
        Ok(())
    }

    fn usage_at(&self, now: Instant) -> usize {
        let mut timestamps = self.timestamps.lock().unwrap();
        Self::prune(&mut timestamps, now, self.window);
        timestamps.len()
    }

    /// Drops instants that have slid out of the window. The deque is
    /// ordered oldest-first, so pruning stops at the first survivor.
    fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        let cutoff = now.checked_sub(window);
        let Some(cutoff) = cutoff else {
            return;
        };

        while let Some(oldest) = timestamps.front() {
            if *oldest <= cutoff {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::per_minute(DEFAULT_MAX_REQUESTS_PER_MINUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A base instant far enough from process start that subtracting the
    /// window never underflows.
    fn base() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    #[test]
    fn test_acquire_under_limit() {
        let limiter = RateLimiter::per_minute(3);
        let now = base();

        assert!(limiter.try_acquire_at(now).is_ok());
        assert!(limiter.try_acquire_at(now).is_ok());
        assert!(limiter.try_acquire_at(now).is_ok());
        assert_eq!(limiter.usage_at(now), 3);
    }

    #[test]
    fn test_rejects_at_threshold() {
        let limiter = RateLimiter::per_minute(30);
        let now = base();

        for _ in 0..30 {
            assert!(limiter.try_acquire_at(now).is_ok());
        }

        let err = limiter.try_acquire_at(now).unwrap_err();
        assert_eq!(err.limit, 30);
        assert!(err.retry_after >= 1);
    }

    #[test]
    fn test_allows_again_after_window() {
        let limiter = RateLimiter::per_minute(2);
        let now = base();

        assert!(limiter.try_acquire_at(now).is_ok());
        assert!(limiter.try_acquire_at(now).is_ok());
        assert!(limiter.try_acquire_at(now).is_err());

        // Once the window has fully passed, both slots free up
        let later = now + Duration::from_secs(61);
        assert!(limiter.try_acquire_at(later).is_ok());
        assert_eq!(limiter.usage_at(later), 1);
    }

    #[test]
    fn test_window_slides_rather_than_resets() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = base();

        assert!(limiter.try_acquire_at(now).is_ok());
        assert!(limiter
            .try_acquire_at(now + Duration::from_secs(30))
            .is_ok());

        // 61s after the first request: only the first has slid out
        let t = now + Duration::from_secs(61);
        assert!(limiter.try_acquire_at(t).is_ok());
        assert!(limiter.try_acquire_at(t).is_err());
    }

    #[test]
    fn test_retry_after_reflects_oldest_request() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = base();

        assert!(limiter.try_acquire_at(now).is_ok());

        let err = limiter
            .try_acquire_at(now + Duration::from_secs(20))
            .unwrap_err();
        assert_eq!(err.retry_after, 40);
    }

    #[test]
    fn test_error_display() {
        let err = RateLimitExceeded {
            retry_after: 12,
            limit: 30,
        };
        assert_eq!(
            err.to_string(),
            "Rate limit of 30 requests per window exceeded. Try again in 12 seconds"
        );
    }
}
