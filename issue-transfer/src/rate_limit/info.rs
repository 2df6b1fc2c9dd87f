//! Rate limit information.

/// Rate limit information for a specific resource.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds to wait at `now` before issuing more requests, if any.
    ///
    /// Returns `None` while at least `threshold` requests remain or once the
    /// reset time has passed.
    #[must_use]
    pub fn wait_secs(&self, now: u64, threshold: u32) -> Option<u64> {
        if self.remaining >= threshold || self.reset <= now {
            return None;
        }
        Some(self.reset - now)
    }
}
